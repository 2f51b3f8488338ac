//! Bearer credential verification.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{StockError, StockResult};

/// The verified caller. `user_id` scopes every document the caller owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
}

/// Verifies a bearer credential and yields the caller's identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> StockResult<Identity>;
}

/// Identity provider backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, Identity>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as a credential for `user_id`.
    pub fn with_token(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.with_identity(
            token,
            Identity {
                user_id: user_id.into(),
                email: None,
            },
        )
    }

    pub fn with_identity(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }

    /// Build from `token=owner` or `token=owner:email` entries.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> StockResult<Self> {
        pairs.iter().try_fold(Self::new(), |provider, pair| {
            let pair = pair.as_ref();
            let invalid = || {
                StockError::config(format!(
                    "invalid token mapping '{pair}', expected token=owner[:email]"
                ))
            };
            let (token, subject) = pair.split_once('=').ok_or_else(invalid)?;
            let (owner, email) = match subject.split_once(':') {
                Some((owner, email)) => (owner.trim(), Some(email.trim())),
                None => (subject.trim(), None),
            };
            let token = token.trim();
            if token.is_empty() || owner.is_empty() || email.is_some_and(str::is_empty) {
                return Err(invalid());
            }
            Ok(provider.with_identity(
                token,
                Identity {
                    user_id: owner.to_string(),
                    email: email.map(str::to_string),
                },
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify(&self, token: &str) -> StockResult<Identity> {
        if token.is_empty() {
            return Err(StockError::AuthRequired);
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(StockError::InvalidToken)
    }
}
