//! Diesel models for deliverer profiles.

use diesel::prelude::*;

use crate::domain::deliverer::{Deliverer as DomainDeliverer, NewDeliverer as DomainNewDeliverer};
use crate::domain::role::Role;
use crate::domain::types::{DelivererEmail, DelivererId, DelivererName, HubId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::deliverers)]
/// Diesel model for [`crate::domain::deliverer::Deliverer`].
pub struct Deliverer {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::deliverers)]
/// Insertable form of [`Deliverer`].
pub struct NewDeliverer<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

impl TryFrom<Deliverer> for DomainDeliverer {
    type Error = TypeConstraintError;

    fn try_from(value: Deliverer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DelivererId::try_from(value.id)?,
            hub_id: HubId::try_from(value.hub_id)?,
            name: DelivererName::new(value.name)?,
            email: DelivererEmail::new(value.email)?,
            role: value.role.parse::<Role>()?,
        })
    }
}

impl<'a> From<&'a DomainNewDeliverer> for NewDeliverer<'a> {
    fn from(value: &'a DomainNewDeliverer) -> Self {
        Self {
            hub_id: value.hub_id.get(),
            name: value.name.as_str(),
            email: value.email.as_str(),
            role: value.role.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_column_is_rejected() {
        let row = Deliverer {
            id: 1,
            hub_id: 1,
            name: "Arimateia".to_string(),
            email: "arimateia@farmacia.com".to_string(),
            role: "owner".to_string(),
        };

        assert!(DomainDeliverer::try_from(row).is_err());
    }

    #[test]
    fn domain_profile_converts_into_insertable() {
        let domain = DomainNewDeliverer::new(
            HubId::new(1).unwrap(),
            DelivererName::new("Gerente").unwrap(),
            DelivererEmail::new("gerente@farmacia.com").unwrap(),
            Role::Manager,
        );

        let insertable: NewDeliverer = (&domain).into();

        assert_eq!(insertable.role, "manager");
        assert_eq!(insertable.email, "gerente@farmacia.com");
    }
}
