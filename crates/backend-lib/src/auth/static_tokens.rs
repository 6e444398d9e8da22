//! Token validator backed by the configured static token table.
use async_trait::async_trait;
use linkkeeper_common::Identity;
use subtle::ConstantTimeEq;

use super::gate::TokenValidator;
use crate::config::TokenMapping;

pub const TOKEN_MALFORMED_MESSAGE: &str = "Token is malformed error";
pub const TOKEN_INVALID_MESSAGE: &str = "Token is invalid error";

pub struct StaticTokenValidator {
    tokens: Vec<TokenMapping>,
}

impl StaticTokenValidator {
    pub fn new(tokens: Vec<TokenMapping>) -> Self {
        Self { tokens }
    }

    /// Strip an optional `Bearer` scheme
    fn extract_token(header_value: &str) -> &str {
        let trimmed = header_value.trim();
        match trimmed.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            None if trimmed.eq_ignore_ascii_case("bearer") => "",
            _ => trimmed,
        }
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    type Identity = Identity;

    async fn validate_token(&self, header_value: &str) -> (Option<Identity>, String) {
        let token = Self::extract_token(header_value);
        if token.is_empty() || token.contains(char::is_whitespace) {
            return (None, TOKEN_MALFORMED_MESSAGE.to_string());
        }

        // scan every entry so lookup time does not depend on where the match sits
        let mut found = None;
        for mapping in &self.tokens {
            if bool::from(mapping.token.as_bytes().ct_eq(token.as_bytes())) {
                found = Some(mapping);
            }
        }

        match found {
            Some(mapping) => (
                Some(Identity {
                    uid: mapping.uid.clone(),
                    name: mapping.name.clone(),
                }),
                String::new(),
            ),
            None => (None, TOKEN_INVALID_MESSAGE.to_string()),
        }
    }
}
