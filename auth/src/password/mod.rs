pub mod argon2;
pub mod errors;

pub use self::argon2::PasswordHasher;
pub use self::argon2::DEFAULT_WORK_FACTOR;
pub use self::argon2::MAX_INPUT_BYTES;
pub use self::argon2::MAX_WORK_FACTOR;
pub use self::argon2::MIN_WORK_FACTOR;
pub use errors::PasswordError;
