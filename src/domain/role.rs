//! Role-based capability checks.
//!
//! Access to every service is decided here by a pure predicate over [`Role`],
//! never by presentation code.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;
use crate::{SERVICE_ACCESS_ROLE, SERVICE_MANAGER_ROLE};

/// Position of a hub member within the delivery log.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Deliverer,
    Manager,
}

/// Actions gated by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    LogDeliveries,
    ViewOwnHistory,
    ViewReports,
    ManageDeliveryTypes,
}

impl Role {
    /// Derives the role from the identity provider's role strings.
    ///
    /// Returns `None` when the user lacks the service access role.
    pub fn from_roles<S: AsRef<str>>(roles: &[S]) -> Option<Self> {
        let has = |wanted: &str| roles.iter().any(|role| role.as_ref() == wanted);

        if !has(SERVICE_ACCESS_ROLE) {
            return None;
        }
        if has(SERVICE_MANAGER_ROLE) {
            Some(Role::Manager)
        } else {
            Some(Role::Deliverer)
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::LogDeliveries | Capability::ViewOwnHistory => self == Role::Deliverer,
            Capability::ViewReports | Capability::ManageDeliveryTypes => self == Role::Manager,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Deliverer => "deliverer",
            Role::Manager => "manager",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deliverer" => Ok(Role::Deliverer),
            "manager" => Ok(Role::Manager),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_without_access_role_have_no_role() {
        assert_eq!(Role::from_roles(&["crm", SERVICE_MANAGER_ROLE]), None);
        assert_eq!(Role::from_roles::<&str>(&[]), None);
    }

    #[test]
    fn manager_role_wins_over_plain_access() {
        assert_eq!(
            Role::from_roles(&[SERVICE_ACCESS_ROLE, SERVICE_MANAGER_ROLE]),
            Some(Role::Manager)
        );
        assert_eq!(
            Role::from_roles(&[SERVICE_ACCESS_ROLE]),
            Some(Role::Deliverer)
        );
    }

    #[test]
    fn capabilities_follow_role() {
        assert!(Role::Deliverer.can(Capability::LogDeliveries));
        assert!(Role::Deliverer.can(Capability::ViewOwnHistory));
        assert!(!Role::Deliverer.can(Capability::ViewReports));
        assert!(!Role::Deliverer.can(Capability::ManageDeliveryTypes));

        assert!(Role::Manager.can(Capability::ViewReports));
        assert!(Role::Manager.can(Capability::ManageDeliveryTypes));
        assert!(!Role::Manager.can(Capability::LogDeliveries));
    }

    #[test]
    fn role_round_trips_through_its_column_value() {
        assert_eq!("manager".parse::<Role>(), Ok(Role::Manager));
        assert_eq!(Role::Deliverer.to_string(), "deliverer");
        assert!("admin".parse::<Role>().is_err());
    }
}
