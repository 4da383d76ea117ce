use reqwest::StatusCode;
use thiserror::Error;

pub const LIST_FAILED: &str = "사용자 목록을 불러오는데 실패했습니다.";
pub const NOT_FOUND: &str = "사용자를 찾을 수 없습니다.";
pub const CREATE_FAILED: &str = "사용자 생성에 실패했습니다.";
pub const UPDATE_FAILED: &str = "사용자 수정에 실패했습니다.";
pub const DELETE_FAILED: &str = "사용자 삭제에 실패했습니다.";

#[derive(Debug, Error)]
pub enum UserClientError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Invalid endpoint: {0}")]
    InvalidUrl(String),
    #[error("{}", LIST_FAILED)]
    RequestFailed { status: StatusCode },
    #[error("{}", NOT_FOUND)]
    NotFound { status: StatusCode },
    #[error("{message}")]
    CreateFailed { status: StatusCode, message: String },
    #[error("{message}")]
    UpdateFailed { status: StatusCode, message: String },
    #[error("{}", DELETE_FAILED)]
    DeleteFailed { status: StatusCode },
}

impl UserClientError {
    /// Status of the rejected response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UserClientError::RequestFailed { status }
            | UserClientError::NotFound { status }
            | UserClientError::CreateFailed { status, .. }
            | UserClientError::UpdateFailed { status, .. }
            | UserClientError::DeleteFailed { status } => Some(*status),
            UserClientError::Transport(e) => e.status(),
            UserClientError::InvalidUrl(_) => None,
        }
    }

    pub(crate) fn create_failed(status: StatusCode, body: Option<String>) -> Self {
        UserClientError::CreateFailed {
            status,
            message: body_or(body, CREATE_FAILED),
        }
    }

    pub(crate) fn update_failed(status: StatusCode, body: Option<String>) -> Self {
        UserClientError::UpdateFailed {
            status,
            message: body_or(body, UPDATE_FAILED),
        }
    }
}

fn body_or(body: Option<String>, fallback: &str) -> String {
    body.filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_messages_render_verbatim() {
        let err = UserClientError::DeleteFailed {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "사용자 삭제에 실패했습니다.");

        let err = UserClientError::RequestFailed {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.to_string(), LIST_FAILED);
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn empty_body_falls_back_to_fixed_message() {
        let err = UserClientError::create_failed(StatusCode::BAD_REQUEST, Some(String::new()));
        assert_eq!(err.to_string(), CREATE_FAILED);

        let err = UserClientError::update_failed(StatusCode::BAD_REQUEST, None);
        assert_eq!(err.to_string(), UPDATE_FAILED);
    }

    #[test]
    fn body_text_is_used_as_is() {
        let err = UserClientError::update_failed(
            StatusCode::BAD_REQUEST,
            Some("email already exists".to_string()),
        );
        assert_eq!(err.to_string(), "email already exists");
    }
}
