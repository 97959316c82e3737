use crate::error::{AppError, Result};

/// Reduces a client-supplied filename to its base component, stripping any
/// directory part. Used on the upload path, where a path-like name is
/// silently corrected.
pub fn sanitize(raw: &str) -> Result<String> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("");

    if base.is_empty() || base == "." || base == ".." {
        return Err(AppError::InvalidName("Invalid filename".to_string()));
    }

    Ok(base.to_string())
}

/// Requires the input to already be a plain base name. Used on the delete
/// path, where any path-like input is rejected rather than corrected.
///
/// The asymmetry with [`sanitize`] is deliberate: both entry points defend
/// against directory traversal, but delete never second-guesses its caller.
pub fn require_base_name(raw: &str) -> Result<String> {
    let name = sanitize(raw)?;

    if name != raw {
        return Err(AppError::InvalidName("Invalid filename format".to_string()));
    }

    Ok(name)
}
