//! Conversions from external infrastructure errors into domain errors.

use opsdeck_domain::OpsDeckError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OpsDeckError);

impl From<InfraError> for OpsDeckError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OpsDeckError> for InfraError {
    fn from(value: OpsDeckError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoOpsDeckError {
    fn into_opsdeck(self) -> OpsDeckError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → OpsDeckError */
/* -------------------------------------------------------------------------- */

impl IntoOpsDeckError for HttpError {
    fn into_opsdeck(self) -> OpsDeckError {
        if self.is_timeout() {
            return OpsDeckError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return OpsDeckError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => OpsDeckError::Auth(message),
                404 => OpsDeckError::NotFound(message),
                429 => OpsDeckError::Network(message),
                400..=499 => OpsDeckError::InvalidInput(message),
                _ => OpsDeckError::Network(message),
            };
        }

        if self.is_decode() {
            return OpsDeckError::Backend(format!("failed to decode response body: {self}"));
        }

        OpsDeckError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_opsdeck())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → OpsDeckError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(OpsDeckError::Backend(format!("invalid backend payload: {value}")))
    }
}
