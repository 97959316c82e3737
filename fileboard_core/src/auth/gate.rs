use std::sync::Arc;

use http::{header::AUTHORIZATION, HeaderMap};

use crate::error::{AppError, Result};

use super::verifier::{IdentityVerifier, VerifiedIdentity};

/// Policy deciding whether a verified identity may mutate the board.
pub trait Authorizer: Send + Sync {
    fn allows(&self, identity: &VerifiedIdentity) -> bool;
}

/// Exact, case-sensitive match against the one configured admin email.
pub struct SingleAdmin {
    admin_email: String,
}

impl SingleAdmin {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }
}

impl Authorizer for SingleAdmin {
    fn allows(&self, identity: &VerifiedIdentity) -> bool {
        identity.email == self.admin_email
    }
}

/// Wraps the identity verifier with the admin policy. Upload and delete
/// handlers call [`AdminGate::authorize`] before touching disk or metadata,
/// so a rejected request has no side effect.
#[derive(Clone)]
pub struct AdminGate {
    verifier: Arc<dyn IdentityVerifier>,
    authorizer: Arc<dyn Authorizer>,
}

impl AdminGate {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            verifier,
            authorizer,
        }
    }

    pub async fn authorize(&self, headers: &HeaderMap) -> Result<VerifiedIdentity> {
        let token = extract_bearer_token(headers)?;

        let identity = self.verifier.verify(&token).await?;

        if !self.authorizer.allows(&identity) {
            return Err(AppError::Forbidden(
                "You are not the authorized administrator".to_string(),
            ));
        }

        Ok(identity)
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated("Invalid Authorization header format".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthenticated("Authorization header must start with 'Bearer '".to_string())
    })?;

    if token.is_empty() {
        return Err(AppError::Unauthenticated("Empty token".to_string()));
    }

    Ok(token.to_string())
}
