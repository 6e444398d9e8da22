// ============================
// linkkeeper-backend/src/lib.rs
// ============================
//! Core functionality for the linkkeeper bookmark API.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod remote;
pub mod router;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use linkkeeper_common::Identity;

use crate::auth::{StaticTokenValidator, TokenGate, TokenValidator};
use crate::config::Settings;
use crate::storage::LinkStore;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Link storage backend
    pub store: S,
    /// Token gate in front of the link routes
    pub gate: TokenGate<Identity>,
    /// Loaded settings
    pub settings: Arc<Settings>,
}

impl<S: LinkStore> AppState<S> {
    /// Create state that validates tokens against the configured token table
    pub fn new(store: S, settings: Settings) -> Self {
        let validator = Arc::new(StaticTokenValidator::new(settings.tokens.clone()));
        Self::with_validator(store, settings, validator)
    }

    /// Create state with a custom token validator
    pub fn with_validator(
        store: S,
        settings: Settings,
        validator: Arc<dyn TokenValidator<Identity = Identity>>,
    ) -> Self {
        Self {
            store,
            gate: TokenGate::new(validator),
            settings: Arc::new(settings),
        }
    }
}
