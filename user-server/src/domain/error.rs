use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("사용자를 찾을 수 없습니다: id={0}")]
    UserNotFound(i64),
    #[error("이미 존재하는 이메일입니다: {0}")]
    EmailAlreadyExists(String),
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::UserNotFound(_) => StatusCode::NOT_FOUND,
            // Duplicate email is 400 with a plain-text message on create and update alike.
            DomainError::EmailAlreadyExists(_) | DomainError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Clients show 4xx bodies verbatim, so they are plain text and 404 has none.
    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            DomainError::UserNotFound(_) => response.finish(),
            DomainError::Internal(_) => response
                .content_type(ContentType::plaintext())
                .body("internal server error"),
            _ => response
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn duplicate_email_is_plain_text_400() {
        let resp = DomainError::EmailAlreadyExists("a@b.com".into()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(body, "이미 존재하는 이메일입니다: a@b.com".as_bytes());
    }

    #[test]
    fn duplicate_email_and_validation_share_bad_request() {
        assert_eq!(
            DomainError::EmailAlreadyExists("a@b.com".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DomainError::Validation("이름은 필수입니다".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn not_found_has_empty_body() {
        let resp = DomainError::UserNotFound(3).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn internal_details_are_not_exposed() {
        let resp = DomainError::Internal("pool timed out".into()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(body, "internal server error".as_bytes());
    }
}
