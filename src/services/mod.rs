//! Role-gated use cases shared by the HTML routes and the JSON API.

use pushkind_common::domain::auth::AuthenticatedUser;
use thiserror::Error;

use crate::domain::role::{Capability, Role};
use crate::domain::types::HubId;
use crate::repository::errors::RepositoryError;

pub mod api;
pub mod delivery_types;
pub mod entries;
pub mod gateway;
pub mod summary;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    #[error("{0}")]
    Validation(String),

    #[error("failed to read deliveries: {0}")]
    FetchFailure(String),

    #[error("failed to save deliveries: {0}")]
    WriteFailure(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("failed to export report: {0}")]
    Export(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Resolves the caller's role, failing unless it grants `capability`.
pub fn authorize(user: &AuthenticatedUser, capability: Capability) -> ServiceResult<Role> {
    match Role::from_roles(&user.roles) {
        Some(role) if role.can(capability) => Ok(role),
        _ => Err(ServiceError::Unauthorized),
    }
}

/// Resolves the caller's role, failing when they have no access at all.
pub fn member_role(user: &AuthenticatedUser) -> ServiceResult<Role> {
    Role::from_roles(&user.roles).ok_or(ServiceError::Unauthorized)
}

/// Hub the caller belongs to.
pub fn user_hub(user: &AuthenticatedUser) -> ServiceResult<HubId> {
    Ok(HubId::new(user.hub_id)?)
}
