use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Work factor used when none is configured.
pub const DEFAULT_WORK_FACTOR: u32 = 12;

/// Lowest supported work factor.
pub const MIN_WORK_FACTOR: u32 = 1;

/// Highest supported work factor.
pub const MAX_WORK_FACTOR: u32 = 64;

/// Longest plaintext accepted for hashing, in bytes.
pub const MAX_INPUT_BYTES: usize = 1024;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// The work factor is the Argon2 time cost: the number of passes over memory.
/// Memory and parallelism stay at the Argon2 defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHasher {
    work_factor: u32,
}

impl PasswordHasher {
    /// Create a new password hasher with the default work factor.
    ///
    /// # Returns
    /// PasswordHasher instance configured with a work factor of 12
    pub fn new() -> Self {
        Self {
            work_factor: DEFAULT_WORK_FACTOR,
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `work_factor` - Argon2 time cost, within `MIN_WORK_FACTOR..=MAX_WORK_FACTOR`
    ///
    /// # Returns
    /// PasswordHasher configured with the given cost
    ///
    /// # Errors
    /// * `InvalidWorkFactor` - Work factor outside the supported range
    pub fn with_work_factor(work_factor: u32) -> Result<Self, PasswordError> {
        if !(MIN_WORK_FACTOR..=MAX_WORK_FACTOR).contains(&work_factor) {
            return Err(PasswordError::InvalidWorkFactor {
                min: MIN_WORK_FACTOR,
                max: MAX_WORK_FACTOR,
                actual: work_factor,
            });
        }

        // Reject cost combinations argon2 itself would refuse
        Self::params_for(work_factor)?;

        Ok(Self { work_factor })
    }

    fn params_for(work_factor: u32) -> Result<Params, PasswordError> {
        Params::new(
            Params::DEFAULT_M_COST,
            work_factor,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Configured work factor.
    pub fn work_factor(&self) -> u32 {
        self.work_factor
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation, so hashing the same input
    /// twice yields different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `InputTooLong` - Password exceeds `MAX_INPUT_BYTES`
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_INPUT_BYTES {
            return Err(PasswordError::InputTooLong {
                max: MAX_INPUT_BYTES,
                actual: password.len(),
            });
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The cost parameters are read from the stored hash, not from this hasher.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid or verification failed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        Ok(Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Self::params_for(self.work_factor)?,
        ))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
