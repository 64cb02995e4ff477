use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::error::Error;

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    reason: Option<&'static str>,
}

macro_rules! error_response {
    ($status_code:expr) => {
        (
            $status_code,
            Json(ErrorBody {
                code: $status_code.as_u16(),
                reason: None,
            }),
        )
            .into_response()
    };
    ($status_code:expr, $reason:literal) => {
        (
            $status_code,
            Json(ErrorBody {
                code: $status_code.as_u16(),
                reason: Some($reason),
            }),
        )
            .into_response()
    };
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::CurrentRunNotSet => {
                error_response!(StatusCode::NOT_FOUND, "Current Run Not Set")
            }
            Error::RunNotFound => error_response!(StatusCode::NOT_FOUND),
            Error::NoNextRun => error_response!(StatusCode::BAD_REQUEST, "No Next Run"),
            Error::TransportFailure(_) | Error::DecodeFailure(_) => {
                error_response!(StatusCode::BAD_GATEWAY)
            }
            Error::AssetFailure(_) => {
                error_response!(StatusCode::BAD_GATEWAY, "Boxart Unavailable")
            }
            _ => error_response!(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
