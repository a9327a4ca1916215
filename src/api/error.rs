use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(Cow<'static, str>),
    #[error("Bad Gateway: {0}")]
    BadGateway(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

/// Client errors carry only `error`; failures of the relay itself also report
/// `success: false`.
#[derive(serde::Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Anything that went wrong after the file was staged is reported as an
    /// upstream failure with the underlying message exposed to the caller.
    pub fn bad_gateway(err: SystemError) -> Self {
        match &err {
            SystemError::Upstream { status, reason, message } => log::error!(
                "Error processing file: upstream returned {} ({}): {}",
                status,
                reason.as_deref().unwrap_or("no reason"),
                message
            ),
            _ => log::error!("Error processing file: {:?}", err),
        }
        Self::BadGateway(err.to_string().into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            Error::BadRequest(msg) | Error::PayloadTooLarge(msg) => {
                res.json(ErrorBody { success: None, error: msg.clone() })
            }
            Error::BadGateway(msg) => {
                res.json(ErrorBody { success: Some(false), error: msg.clone() })
            }
            Error::InternalServer => res.json(ErrorBody {
                success: Some(false),
                error: "Internal Server Error".into(),
            }),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // reqwest errors
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    // filesystem errors
    #[error("{0}")]
    Io(#[from] std::io::Error),
    // serde errors
    #[error("Unexpected response from generative service: {0}")]
    Json(#[from] serde_json::Error),
    // generative service errors
    #[error("{message}")]
    Upstream { status: u16, reason: Option<String>, message: String },
    #[error("Timed out waiting for {operation} after {limit:?}")]
    Timeout { operation: &'static str, limit: Duration },
    #[error("{0}")]
    Blocked(String),
    // Custom Errors
    #[error("{0}")]
    BadRequest(Cow<'static, str>),
    #[error("{0}")]
    PayloadTooLarge(Cow<'static, str>),
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::PayloadTooLarge(msg) => Error::PayloadTooLarge(msg),
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn payload_too_large(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::PayloadTooLarge(msg.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream { status, reason: None, message: message.into() }
    }

    /// Same as [`SystemError::upstream`], keeping the service's status code name
    /// (e.g. `RESOURCE_EXHAUSTED`) for the logs.
    pub fn upstream_with_reason(
        status: u16,
        reason: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Upstream { status, reason, message: message.into() }
    }
}
