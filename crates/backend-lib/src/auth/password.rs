// ============================
// linkkeeper-backend/src/auth/password.rs
// ============================
//! Salted password hashing and verification.
//!
//! Stored credentials are a hex SHA-512 digest of `password ++ salt` together
//! with the salt itself. The salt is 4 to 10 ASCII letters.
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Shortest salt `hash_password` will draw
pub const MIN_SALT_LENGTH: usize = 4;

/// Longest salt `hash_password` will draw
pub const MAX_SALT_LENGTH: usize = 10;

/// Salt alphabet: ASCII letters, lower case first
const SALT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A password digest together with the salt that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltedHash {
    /// Lowercase hex SHA-512 digest, 128 characters
    pub hash: String,
    /// Salt appended to the password before hashing
    pub salt: String,
}

/// Random string of `length` ASCII letters
pub fn random_string(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}

/// Random salt with a length drawn uniformly from `MIN_SALT_LENGTH..=MAX_SALT_LENGTH`
pub fn generate_salt() -> String {
    let length = rand::rng().random_range(MIN_SALT_LENGTH..=MAX_SALT_LENGTH);
    random_string(length)
}

fn digest_hex(password: &str, salt: &str) -> String {
    let mut salted = String::with_capacity(password.len() + salt.len());
    salted.push_str(password);
    salted.push_str(salt);
    let digest = Sha512::digest(salted.as_bytes());
    salted.zeroize();
    hex::encode(digest)
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> SaltedHash {
    let salt = generate_salt();
    SaltedHash {
        hash: digest_hex(password, &salt),
        salt,
    }
}

/// Verify a password against a stored hash and salt.
///
/// The comparison is case-sensitive and runs in constant time with respect to
/// the digest contents.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let computed = digest_hex(password, salt);
    computed.as_bytes().ct_eq(expected_hash.as_bytes()).into()
}

impl SaltedHash {
    /// Check a candidate password against this hash
    pub fn verify(&self, password: &str) -> bool {
        verify_password(password, &self.salt, &self.hash)
    }
}
