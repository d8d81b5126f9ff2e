//! Registration-time validation and credential hashing.
//!
//! Sessions, tokens, and password reset live outside this crate; the store
//! only ever sees the salted digest produced here.

use crate::error::ValidationError;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("name", "must not be empty"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ValidationError::new(
            "name",
            "must contain only letters and spaces",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("email", "is not a valid address"))
    }
}

/// At least 8 characters mixing letters, digits, and symbols.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());
    if long_enough && has_letter && has_digit && has_symbol {
        Ok(())
    } else {
        Err(ValidationError::new(
            "password",
            "must be 8+ characters with letters, numbers and symbols",
        ))
    }
}

/// Salted BLAKE3 digest, stored as `<salt-hex>$<digest-hex>`.
pub fn hash_credential(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    let mut hasher = blake3::Hasher::new();
    hasher.update(&salt);
    hasher.update(password.as_bytes());
    format!("{}${}", hex::encode(salt), hasher.finalize().to_hex())
}

/// Check a password against a stored `<salt-hex>$<digest-hex>` credential.
pub fn verify_credential(stored: &str, password: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let mut hasher = blake3::Hasher::new();
    hasher.update(&salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().as_str() == digest_hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_letters_and_spaces() {
        assert!(validate_name("Avery Lee").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name("Avery2").is_err());
        assert_eq!(validate_name("O'Brien").unwrap_err().field, "name");
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email("avery@example.com").is_ok());
        assert!(validate_email("avery.lee@dept.example.com").is_ok());
        assert!(validate_email("avery").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("avery@example").is_err());
        assert!(validate_email("avery @example.com").is_err());
    }

    #[test]
    fn password_needs_mixed_classes_and_length() {
        assert!(validate_password("Practice1!").is_ok());
        assert!(validate_password("password").is_err());
        assert!(validate_password("12345678!").is_err());
        assert!(validate_password("Pa1!").is_err());
    }

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let first = hash_credential("Practice1!");
        let second = hash_credential("Practice1!");
        assert_ne!(first, second);
        assert!(first.contains('$'));
        assert!(verify_credential(&first, "Practice1!"));
        assert!(verify_credential(&second, "Practice1!"));
        assert!(!verify_credential(&first, "Practice2!"));
    }

    #[test]
    fn malformed_stored_credential_never_verifies() {
        assert!(!verify_credential("not-a-credential", "Practice1!"));
        assert!(!verify_credential("zz$zz", "Practice1!"));
    }
}
