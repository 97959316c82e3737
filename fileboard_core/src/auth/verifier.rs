use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Identity decoded from a bearer token by the external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub email: String,
}

/// The identity provider, treated as an opaque collaborator: a token goes in,
/// a verified identity or an authentication failure comes out.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity>;
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: String,
    email: String,
    #[allow(dead_code)]
    exp: u64,
}

/// Verifies bearer tokens as HS256 JWTs carrying `sub`, `email` and `exp`
/// claims.
pub struct JwtIdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Builds the verifier for a possibly-absent credential. A missing secret
    /// degrades to rejecting every token rather than failing startup.
    pub fn from_secret(secret: &str) -> Arc<dyn IdentityVerifier> {
        if secret.is_empty() {
            tracing::warn!("Identity provider credential missing - rejecting all tokens");
            Arc::new(RejectAllVerifier)
        } else {
            Arc::new(Self::new(secret))
        }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthenticated(format!("Invalid authentication token: {}", e)))?;

        Ok(VerifiedIdentity {
            subject: data.claims.sub,
            email: data.claims.email,
        })
    }
}

/// Stand-in verifier used when no provider credential is configured.
pub struct RejectAllVerifier;

#[async_trait]
impl IdentityVerifier for RejectAllVerifier {
    async fn verify(&self, _token: &str) -> Result<VerifiedIdentity> {
        Err(AppError::Unauthenticated(
            "Identity verification is not configured".to_string(),
        ))
    }
}
