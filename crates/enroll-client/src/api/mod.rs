//! CA REST endpoints.

mod cainfo;
mod enroll;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use enroll_core::{EnrollError, Result};

/// Decode a base64 field the CA uses to carry PEM text
fn decode_pem_field(encoded: &str, field: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| EnrollError::InvalidResponse(format!("{field} is not valid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|_| EnrollError::InvalidResponse(format!("{field} is not UTF-8 PEM")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_padded_base64_with_whitespace() {
        let encoded = format!(" {} \n", STANDARD.encode("-----BEGIN CERTIFICATE-----"));
        assert_eq!(
            decode_pem_field(&encoded, "Cert").unwrap(),
            "-----BEGIN CERTIFICATE-----"
        );
    }

    #[test]
    fn names_field_on_bad_base64() {
        let err = decode_pem_field("%%%", "CAChain").unwrap_err();
        assert!(err.to_string().contains("CAChain"));
    }
}
