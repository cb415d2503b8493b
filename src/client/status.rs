//! HTTP status classification for Skyfish API responses
//!
//! The Skyfish API documents a fixed set of failure statuses. Each is mapped
//! to a category with the human-readable explanation the API documentation
//! gives for it, so that failures can be logged and surfaced consistently.

use std::fmt;

use reqwest::StatusCode;

/// Response header carrying the server-side request id.
pub const REQUEST_ID_HEADER: &str = "X-Cbx-Request-Id";

/// Category of a non-200 API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// 400
    Malformed,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 500
    ServerError,
    /// Anything else
    Unknown,
}

impl StatusCategory {
    /// Classify an HTTP status code.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => StatusCategory::Malformed,
            401 => StatusCategory::Unauthorized,
            403 => StatusCategory::Forbidden,
            404 => StatusCategory::NotFound,
            409 => StatusCategory::Conflict,
            500 => StatusCategory::ServerError,
            _ => StatusCategory::Unknown,
        }
    }

    /// Explanation of the category as documented by the API.
    pub fn message(&self) -> &'static str {
        match self {
            StatusCategory::Malformed => {
                "Your request contains bad syntax and the API could not understand it."
            }
            StatusCategory::Unauthorized => "You need to be logged in to access the resource",
            StatusCategory::Forbidden => {
                "You do not have access to this resource. It will help to authenticate."
            }
            StatusCategory::NotFound => {
                "The requested resource does not exist. This is also returned if the method is not allowed on the resource."
            }
            StatusCategory::Conflict => {
                "We encountered a conflict when trying to process your update. Try applying your update again."
            }
            StatusCategory::ServerError => {
                "We encountered a problem parsing your request and can not say what went wrong. Please provide the \"X-Cbx-Request-Id\" from the response as it will help debug the problem."
            }
            StatusCategory::Unknown => "Unknown status code",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Log a classified status failure.
///
/// Logging is best-effort: the `log` facade never fails the caller.
pub fn log_status(status: StatusCode, category: StatusCategory, request_id: Option<&str>) {
    match (category, request_id) {
        (StatusCategory::Unknown, _) => {
            log::error!("Unknown status code: {}", status.as_u16())
        }
        (_, Some(id)) => log::error!("{} (X-Cbx-Request-Id: {})", category.message(), id),
        (_, None) => log::error!("{}", category.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_statuses_are_classified() {
        let cases = [
            (400, StatusCategory::Malformed),
            (401, StatusCategory::Unauthorized),
            (403, StatusCategory::Forbidden),
            (404, StatusCategory::NotFound),
            (409, StatusCategory::Conflict),
            (500, StatusCategory::ServerError),
        ];

        for (code, expected) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(StatusCategory::from_status(status), expected, "status {}", code);
        }
    }

    #[test]
    fn test_undocumented_status_is_unknown() {
        assert_eq!(
            StatusCategory::from_status(StatusCode::IM_A_TEAPOT),
            StatusCategory::Unknown
        );
        assert_eq!(
            StatusCategory::from_status(StatusCode::BAD_GATEWAY),
            StatusCategory::Unknown
        );
    }

    #[test]
    fn test_server_error_mentions_request_id_header() {
        assert!(StatusCategory::ServerError.message().contains(REQUEST_ID_HEADER));
    }

    #[test]
    fn test_display_uses_message() {
        assert_eq!(
            StatusCategory::Unauthorized.to_string(),
            "You need to be logged in to access the resource"
        );
    }
}
