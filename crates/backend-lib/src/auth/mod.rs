// ============================
// linkkeeper-backend/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod gate;
pub mod password;
mod static_tokens;

pub use gate::{
    token_gate, AuthContext, TokenGate, TokenValidator, TOKEN_REQUIRED_MESSAGE,
    TOKEN_UNRESOLVED_MESSAGE,
};
pub use password::{
    generate_salt, hash_password, random_string, verify_password, SaltedHash, MAX_SALT_LENGTH,
    MIN_SALT_LENGTH,
};
pub use static_tokens::{StaticTokenValidator, TOKEN_INVALID_MESSAGE, TOKEN_MALFORMED_MESSAGE};
