//! Argon2id password hashing with a tunable cost.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid hashing cost: {0}")]
    Cost(argon2::Error),
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("invalid password hash: {0}")]
    Malformed(argon2::password_hash::Error),
}

/// Argon2 work factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashCost {
    #[must_use]
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check the work factors against the limits Argon2 accepts.
    ///
    /// # Errors
    /// Returns [`PasswordError::Cost`] if any factor is out of range.
    pub fn validate(&self) -> Result<(), PasswordError> {
        self.params().map(|_| ())
    }

    fn params(&self) -> Result<Params, PasswordError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(PasswordError::Cost)
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self::new(
            Params::DEFAULT_M_COST,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher {
    cost: HashCost,
}

impl Hasher {
    #[must_use]
    pub const fn new(cost: HashCost) -> Self {
        Self { cost }
    }

    #[must_use]
    pub const fn cost(&self) -> HashCost {
        self.cost
    }

    /// Hash `password` with a fresh random salt, returning a PHC string.
    ///
    /// # Errors
    /// Returns an error if the configured cost is invalid or hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.cost.params()?);
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(PasswordError::Hash)?;
        Ok(hash.to_string())
    }

    /// Verify `password` against a stored PHC string.
    ///
    /// The parameters encoded in the hash win over the configured cost, so
    /// hashes created before a cost change keep verifying.
    ///
    /// # Errors
    /// Returns [`PasswordError::Malformed`] if `hash` is not a PHC string.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(PasswordError::Malformed)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
