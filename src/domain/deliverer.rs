//! Staff profiles mirrored from the identity provider.

use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::domain::types::{DelivererEmail, DelivererId, DelivererName, HubId};

/// A hub member known to the delivery log.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Deliverer {
    pub id: DelivererId,
    pub hub_id: HubId,
    pub name: DelivererName,
    pub email: DelivererEmail,
    pub role: Role,
}

/// Profile data upserted on every authenticated visit.
#[derive(Clone, Debug, Deserialize)]
pub struct NewDeliverer {
    pub hub_id: HubId,
    pub name: DelivererName,
    pub email: DelivererEmail,
    pub role: Role,
}

impl NewDeliverer {
    #[must_use]
    pub fn new(hub_id: HubId, name: DelivererName, email: DelivererEmail, role: Role) -> Self {
        Self {
            hub_id,
            name,
            email,
            role,
        }
    }
}

#[cfg(feature = "server")]
mod auth {
    use pushkind_common::domain::auth::AuthenticatedUser;

    use super::NewDeliverer;
    use crate::domain::role::Role;
    use crate::domain::types::{DelivererEmail, DelivererName, HubId, TypeConstraintError};

    impl TryFrom<&AuthenticatedUser> for NewDeliverer {
        type Error = TypeConstraintError;

        fn try_from(user: &AuthenticatedUser) -> Result<Self, Self::Error> {
            let role = Role::from_roles(&user.roles).ok_or_else(|| {
                TypeConstraintError::InvalidValue("user has no delivery role".to_string())
            })?;
            let name = if user.name.trim().is_empty() {
                DelivererName::new(user.email.as_str())?
            } else {
                DelivererName::new(user.name.as_str())?
            };

            Ok(Self::new(
                HubId::new(user.hub_id)?,
                name,
                DelivererEmail::new(user.email.as_str())?,
                role,
            ))
        }
    }
}
