pub mod dto;
pub mod handlers;
pub mod middleware;

use crate::domain::error::DomainError;
use actix_web::web;

/// Mounts `/api/users` and makes malformed JSON bodies answer like validation errors.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| DomainError::Validation(err.to_string()).into()),
    )
    .service(web::scope("/api").service(handlers::user::scope()));
}
