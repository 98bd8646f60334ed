//! # Authentication and Authorization
//!
//! Sessions are issued by an external identity provider as HS256 JWTs; this
//! module only verifies them. Every handler receives the resolved identity as
//! an explicit [`Caller`] and checks it against the resource's [`AccessPolicy`].

use std::{convert::Infallible, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, forbidden, unauthorized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Unknown or missing roles are treated as ordinary users.
    fn from_claim(raw: Option<&str>) -> Self {
        match raw {
            Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::User,
        }
    }
}

/// A verified session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Resolves the session, if any, presented with a request.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session>;
}

/// Claims carried by identity provider session tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

pub struct JwtSessionResolver {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionResolver {
    pub fn new(secret: &[u8], issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    fn verify(&self, token: &str) -> Option<Session> {
        match decode::<SessionClaims>(token, &self.key, &self.validation) {
            Ok(data) if !data.claims.sub.trim().is_empty() => Some(Session {
                role: Role::from_claim(data.claims.role.as_deref()),
                user_id: data.claims.sub,
            }),
            Ok(_) => {
                tracing::debug!("session token has an empty subject");
                None
            }
            Err(err) => {
                tracing::debug!(error = %err, "rejected session token");
                None
            }
        }
    }
}

#[async_trait]
impl SessionResolver for JwtSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        bearer_token(headers).and_then(|token| self.verify(token))
    }
}

/// Used when no session secret is configured; every caller is anonymous.
pub struct AnonymousOnly;

#[async_trait]
impl SessionResolver for AnonymousOnly {
    async fn resolve(&self, _headers: &HeaderMap) -> Option<Session> {
        None
    }
}

/// Build the resolver for the configured session secret.
pub fn session_resolver(config: &AppConfig) -> Arc<dyn SessionResolver> {
    match config.session_secret.as_deref() {
        Some(secret) => Arc::new(JwtSessionResolver::new(
            secret.as_bytes(),
            config.session_issuer.as_deref(),
        )),
        None => {
            tracing::warn!("no session secret configured; all requests are anonymous");
            Arc::new(AnonymousOnly)
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Who is making the request; `None` for anonymous visitors
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<Session>);

impl Caller {
    pub fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }

    /// Check this caller against an access tier.
    ///
    /// Returns the session when one is present, so owner-scoped operations
    /// can use it without re-checking.
    pub fn authorize(&self, access: Access) -> Result<Option<&Session>, ApiError> {
        match (access, self.session()) {
            (Access::Anyone, session) => Ok(session),
            (Access::Owner, Some(session)) => Ok(Some(session)),
            (Access::Admin, Some(session)) if session.is_admin() => Ok(Some(session)),
            (Access::Admin, Some(_)) => Err(forbidden(Some("Admin access required"))),
            (Access::Owner | Access::Admin, None) => Err(unauthorized(None)),
        }
    }
}

impl<S> FromRequestParts<S> for Caller
where
    Arc<dyn SessionResolver>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = <Arc<dyn SessionResolver> as FromRef<S>>::from_ref(state);
        Ok(Caller(sessions.resolve(&parts.headers).await))
    }
}

/// Access tier required for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    /// A session is required and rows are scoped to it
    Owner,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub read: Access,
    pub write: Access,
}

impl AccessPolicy {
    pub const OWNED: Self = Self {
        read: Access::Owner,
        write: Access::Owner,
    };

    /// Public catalog content: anyone reads, writes optionally admin-only.
    pub fn catalog(config: &AppConfig) -> Self {
        Self {
            read: Access::Anyone,
            write: if config.catalog_writes_require_admin {
                Access::Admin
            } else {
                Access::Anyone
            },
        }
    }
}
