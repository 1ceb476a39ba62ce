use thiserror::Error;

use crate::repository::RepositoryError;

/// Failures raised by the catalog services.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CatalogError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::NotFound { .. } => "The requested resource does not exist.",
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::ServiceUnavailable { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl CatalogError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<CatalogError> for InterfaceError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::InvalidArgument(message) => {
                Self::BadRequest { message, correlation_id: "unassigned".to_owned() }
            }
            CatalogError::NotFound(message) => {
                Self::NotFound { message, correlation_id: "unassigned".to_owned() }
            }
            CatalogError::Repository(RepositoryError::Storage(message)) => {
                Self::ServiceUnavailable { message, correlation_id: "unassigned".to_owned() }
            }
            CatalogError::Repository(RepositoryError::Decode(message)) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{CatalogError, InterfaceError};
    use crate::repository::RepositoryError;

    #[test]
    fn invalid_argument_maps_to_bad_request_with_original_message() {
        let interface = CatalogError::invalid_argument("Product price cannot be negative.")
            .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest { ref message, ref correlation_id }
                if message == "Product price cannot be negative." && correlation_id == "req-1"
        ));
    }

    #[test]
    fn not_found_keeps_lookup_criterion() {
        let interface =
            CatalogError::not_found("Product not found with id: p-9").into_interface("req-2");

        assert!(matches!(interface, InterfaceError::NotFound { .. }));
        assert!(interface.message().contains("p-9"));
        assert_eq!(interface.correlation_id(), "req-2");
    }

    #[test]
    fn storage_error_maps_to_service_unavailable() {
        let interface = CatalogError::from(RepositoryError::Storage("database is locked".into()))
            .into_interface("req-3");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(
            interface.user_message(),
            "The service is temporarily unavailable. Please retry shortly."
        );
    }

    #[test]
    fn decode_error_maps_to_internal() {
        let interface = CatalogError::from(RepositoryError::Decode("bad price column".into()))
            .into_interface("req-4");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
    }

    #[test]
    fn catalog_error_display_is_the_bare_message() {
        let error = CatalogError::invalid_argument("Stock quantity cannot be negative.");
        assert_eq!(error.to_string(), "Stock quantity cannot be negative.");
    }
}
