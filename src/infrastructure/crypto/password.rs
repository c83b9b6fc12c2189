//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// Salted bcrypt hashing with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// `cost` must be within bcrypt's 4..=31 range.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, self.cost)
    }

    /// Compare `password` against a stored hash.
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn matches(&self, password: &str, password_hash: &str) -> bool {
        verify(password, password_hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hashed = hasher.hash("secure_password_123").unwrap();

        assert_ne!(hashed, "secure_password_123");
        assert!(hasher.matches("secure_password_123", &hashed));
        assert!(!hasher.matches("wrong_password", &hashed));
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = PasswordHasher::new(4);
        let a = hasher.hash("secret").unwrap();
        let b = hasher.hash("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!PasswordHasher::default().matches("secret", "not-a-bcrypt-hash"));
    }
}
