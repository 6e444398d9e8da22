// ============================
// linkkeeper-backend/src/auth/gate.rs
// ============================
//! Bearer token gate.
//!
//! The gate reads the `Authorization` header, hands it to a [`TokenValidator`]
//! and attaches the outcome to the request as an [`AuthContext`]. It never
//! rejects a request itself: handlers look at the context and decide.
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use futures_util::future::BoxFuture;
use ::metrics::counter;
use tracing::debug;

use crate::error::AppError;
use crate::metrics;

/// Message used when the request carries no `Authorization` header
pub const TOKEN_REQUIRED_MESSAGE: &str = "Token is required error";

/// Message used when a validator accepts a token but returns no identity
pub const TOKEN_UNRESOLVED_MESSAGE: &str = "Token has no identity error";

/// Resolves an `Authorization` header value to an identity.
///
/// An empty reason string means the token is valid.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    type Identity: Clone + Send + Sync + 'static;

    async fn validate_token(&self, header_value: &str) -> (Option<Self::Identity>, String);
}

/// Outcome of evaluating the gate for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext<I> {
    /// Resolved principal, absent unless the token validated
    pub identity: Option<I>,
    /// Why the request is unauthenticated
    pub error_message: Option<String>,
}

impl<I> AuthContext<I> {
    pub fn authenticated(identity: I) -> Self {
        Self {
            identity: Some(identity),
            error_message: None,
        }
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self {
            identity: None,
            error_message: Some(reason.into()),
        }
    }

    /// Identity, or the gate's reason as an error
    pub fn require(&self) -> Result<&I, AppError> {
        match &self.identity {
            Some(identity) => Ok(identity),
            None => Err(AppError::Unauthenticated(
                self.error_message
                    .clone()
                    .unwrap_or_else(|| TOKEN_REQUIRED_MESSAGE.to_string()),
            )),
        }
    }
}

/// Token gate shared by every protected route
pub struct TokenGate<I> {
    validator: Arc<dyn TokenValidator<Identity = I>>,
}

impl<I> Clone for TokenGate<I> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<I: Clone + Send + Sync + 'static> TokenGate<I> {
    pub fn new(validator: Arc<dyn TokenValidator<Identity = I>>) -> Self {
        Self { validator }
    }

    /// Classify the request headers
    pub async fn evaluate(&self, headers: &HeaderMap) -> AuthContext<I> {
        let Some(raw) = headers.get(header::AUTHORIZATION) else {
            debug!("request without authorization header");
            counter!(metrics::AUTH_GATE_MISSING).increment(1);
            return AuthContext::unauthenticated(TOKEN_REQUIRED_MESSAGE);
        };

        // header format belongs to the validator; non-UTF-8 bytes become U+FFFD
        let header_value = String::from_utf8_lossy(raw.as_bytes());
        let (identity, reason) = self.validator.validate_token(&header_value).await;
        if !reason.is_empty() {
            debug!(%reason, "token rejected");
            counter!(metrics::AUTH_GATE_REJECTED).increment(1);
            return AuthContext::unauthenticated(reason);
        }

        match identity {
            Some(identity) => {
                counter!(metrics::AUTH_GATE_ACCEPTED).increment(1);
                AuthContext::authenticated(identity)
            },
            // validator accepted the token without resolving anyone
            None => {
                counter!(metrics::AUTH_GATE_REJECTED).increment(1);
                AuthContext::unauthenticated(TOKEN_UNRESOLVED_MESSAGE)
            },
        }
    }

    /// Wrap an operation so it always runs with a freshly evaluated context.
    ///
    /// The returned operation takes the same request and yields the inner
    /// operation's output unchanged.
    pub fn guard<B, Op, Fut>(
        &self,
        operation: Op,
    ) -> impl Fn(axum::http::Request<B>) -> BoxFuture<'static, Fut::Output> + Clone + Send + Sync
    where
        B: Send + 'static,
        Op: Fn(axum::http::Request<B>, AuthContext<I>) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future + Send + 'static,
    {
        let gate = self.clone();
        move |request: axum::http::Request<B>| -> BoxFuture<'static, Fut::Output> {
            let gate = gate.clone();
            let operation = operation.clone();
            Box::pin(async move {
                let context = gate.evaluate(request.headers()).await;
                operation(request, context).await
            })
        }
    }
}

/// Axum middleware form of the gate.
///
/// Inserts the [`AuthContext`] into request extensions and always runs the
/// next service.
pub async fn token_gate<I: Clone + Send + Sync + 'static>(
    State(gate): State<TokenGate<I>>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = gate.evaluate(request.headers()).await;
    request.extensions_mut().insert(context);
    next.run(request).await
}

impl<S, I> FromRequestParts<S> for AuthContext<I>
where
    S: Send + Sync,
    I: Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext<I>>()
            .cloned()
            .ok_or_else(|| AppError::Internal("token gate is not installed on this route".to_string()))
    }
}
