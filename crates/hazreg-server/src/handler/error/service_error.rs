use crate::handler::{Error, ErrorKind};
use crate::{Error as ServiceError, ErrorKind as ServiceErrorKind};

const TRACING_TARGET: &str = "hazreg_server::handler::service_error";

impl From<ServiceError> for Error<'static> {
    fn from(error: ServiceError) -> Self {
        tracing::error!(
            target: TRACING_TARGET,
            kind = %error.kind(),
            error = %error,
            "Service error"
        );

        match error.kind() {
            ServiceErrorKind::External => ErrorKind::ServiceUnavailable.into_error(),
            ServiceErrorKind::Auth => ErrorKind::Unauthorized.into_error(),
            ServiceErrorKind::Config | ServiceErrorKind::Internal => {
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}
