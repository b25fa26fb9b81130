/// bcrypt cost used when the configuration does not override it.
pub const DEFAULT_COST: u32 = 10;

/// Hash a password with bcrypt. The salt is generated per call.
pub fn hash(password: &str, cost: u32) -> Result<String, String> {
    bcrypt::hash(password, cost).map_err(|e| format!("Hashing failed: {e}"))
}

/// Verify a password against a stored bcrypt hash.
///
/// A mismatch is `Ok(false)`; only a malformed hash is an error.
pub fn verify(password: &str, hash: &str) -> Result<bool, String> {
    bcrypt::verify(password, hash).map_err(|e| format!("Invalid hash: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the suite fast; the format is identical.
    const TEST_COST: u32 = 4;

    #[test]
    fn verifies_the_original_password() {
        let hashed = hash("secret", TEST_COST).unwrap();
        assert!(verify("secret", &hashed).unwrap());
    }

    #[test]
    fn rejects_a_wrong_password() {
        let hashed = hash("secret", TEST_COST).unwrap();
        assert!(!verify("wrong", &hashed).unwrap());
    }

    #[test]
    fn salts_every_hash() {
        let a = hash("secret", TEST_COST).unwrap();
        let b = hash("secret", TEST_COST).unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("secret"));
    }

    #[test]
    fn encodes_the_cost_factor() {
        let hashed = hash("secret", DEFAULT_COST).unwrap();
        assert!(hashed.starts_with("$2b$10$"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify("secret", "not-a-bcrypt-hash").is_err());
    }
}
