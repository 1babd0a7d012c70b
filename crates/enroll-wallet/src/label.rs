use enroll_core::{EnrollError, Result};

/// Check that `label` can be used as a wallet key.
///
/// Labels become file names, so they must be non-empty, must not start with
/// a dot and must not contain path separators or NUL.
pub fn validate_label(label: &str) -> Result<()> {
    let bad = label.is_empty()
        || label.starts_with('.')
        || label.contains(['/', '\\', '\0']);

    if bad {
        Err(EnrollError::InvalidLabel(label.to_string()))
    } else {
        Ok(())
    }
}
