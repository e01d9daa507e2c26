//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here instead of next to the error definitions.

use crate::domain::period::PeriodError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<PeriodError> for RepositoryError {
    fn from(val: PeriodError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use crate::domain::period::PeriodError;
    use crate::domain::types::TypeConstraintError;
    use crate::forms::FormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<PeriodError> for ServiceError {
        fn from(val: PeriodError) -> Self {
            ServiceError::InvalidPeriod(val.to_string())
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }
}
