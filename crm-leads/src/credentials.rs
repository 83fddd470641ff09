//! One-time passwords and bcrypt hashing for user credentials.

use bcrypt::{hash, verify};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::AccessResult;

pub fn one_time_password(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn hash_password(password: &str, cost: u32) -> AccessResult<String> {
    Ok(hash(password, cost)?)
}

pub fn verify_password(password: &str, hashed: &str) -> AccessResult<bool> {
    Ok(verify(password, hashed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_time_passwords_are_alphanumeric_and_fresh() {
        let a = one_time_password(16);
        let b = one_time_password(16);

        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_verifies_only_the_original() {
        let hashed = hash_password("s3cret", 4).unwrap();

        assert_ne!(hashed, "s3cret");
        assert!(verify_password("s3cret", &hashed).unwrap());
        assert!(!verify_password("guess", &hashed).unwrap());
    }

    #[test]
    fn out_of_range_cost_is_a_credential_error() {
        let err = hash_password("s3cret", 2).unwrap_err();
        assert!(matches!(err, crate::AccessError::Credential(_)));
    }
}
