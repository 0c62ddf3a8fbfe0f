//! Bearer-token access guard.
//!
//! The path `agent_id` is never trusted on its own: [`AgentPrincipal`] resolves the token to
//! a principal and only yields an agent id when the principal is an agent acting as itself.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use compute::error::StoreError;
use model::entities::{profile, profile::ProfileRole, session};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::schemas::AppState;

/// Identity resolved from a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub profile_id: i32,
    pub role: ProfileRole,
}

#[async_trait]
pub trait AccessGuard: Send + Sync {
    /// `None` when the token is unknown or expired.
    async fn resolve(&self, token: &str) -> Result<Option<Principal>, StoreError>;
}

/// Session lookups bounded by the query timeout.
pub fn default_guard(db: DatabaseConnection, query_timeout: Duration) -> Arc<dyn AccessGuard> {
    Arc::new(TimeoutGuard::new(SessionGuard::new(db), query_timeout))
}

/// Resolves tokens against the `sessions` table.
pub struct SessionGuard {
    db: DatabaseConnection,
}

impl SessionGuard {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccessGuard for SessionGuard {
    async fn resolve(&self, token: &str) -> Result<Option<Principal>, StoreError> {
        let found = session::Entity::find()
            .filter(session::Column::Token.eq(token))
            .filter(session::Column::ExpiresAt.gt(Utc::now()))
            .find_also_related(profile::Entity)
            .one(&self.db)
            .await?;

        Ok(found.and_then(|(_, profile)| {
            profile.map(|profile| Principal {
                profile_id: profile.id,
                role: profile.role,
            })
        }))
    }
}

/// Wraps another guard and fails a lookup that runs longer than `limit`.
pub struct TimeoutGuard<G> {
    inner: G,
    limit: Duration,
}

impl<G: AccessGuard> TimeoutGuard<G> {
    pub fn new(inner: G, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<G: AccessGuard> AccessGuard for TimeoutGuard<G> {
    async fn resolve(&self, token: &str) -> Result<Option<Principal>, StoreError> {
        match tokio::time::timeout(self.limit, self.inner.resolve(token)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(limit_ms = self.limit.as_millis() as u64, "Session lookup timed out");
                Err(StoreError::Timeout(self.limit))
            }
        }
    }
}

/// An authenticated agent whose id matches the `agent_id` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentPrincipal {
    pub agent_id: i32,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AgentPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthenticated)?;

        let principal = state
            .guard
            .resolve(token)
            .await
            .map_err(ApiError::GuardUnavailable)?
            .ok_or(ApiError::Unauthenticated)?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("missing agent_id path parameter".to_string()))?;
        let agent_id = params
            .get("agent_id")
            .and_then(|raw| raw.parse::<i32>().ok())
            .ok_or_else(|| ApiError::BadRequest("agent_id must be an integer".to_string()))?;

        if principal.role != ProfileRole::Agent || principal.profile_id != agent_id {
            warn!(
                profile_id = principal.profile_id,
                role = principal.role.as_str(),
                agent_id,
                "Principal may not act as this agent"
            );
            return Err(ApiError::Forbidden(agent_id));
        }

        debug!(agent_id, "Agent principal resolved");
        Ok(AgentPrincipal { agent_id })
    }
}
