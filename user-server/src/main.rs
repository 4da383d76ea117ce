mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use application::user_service::UserService;
use data::user_repository::PostgresUserRepository;
use infrastructure::config::{AppConfig, CorsOrigins};
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use presentation::middleware::{REQUEST_ID_HEADER, RequestTracing};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_logging(config.log_format);

    let pool = create_pool(&config)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let user_service = UserService::new(Arc::new(PostgresUserRepository::new(pool)));
    let config_data = config.clone();

    info!(host = %config.host, port = config.port, "starting user server");

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTracing)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(build_cors(&config_data))
            .app_data(web::Data::new(user_service.clone()))
            .configure(presentation::routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, REQUEST_ID_HEADER.clone()])
        .expose_headers(vec![REQUEST_ID_HEADER.clone()])
        .max_age(3600);

    match &config.cors_origins {
        CorsOrigins::Any => cors.allow_any_origin(),
        CorsOrigins::List(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{Method, StatusCode};
    use actix_web::{HttpResponse, test};
    use infrastructure::config::LogFormat;

    fn config(cors_origins: CorsOrigins) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 8080,
            database_url: "postgres://db".into(),
            db_max_connections: 1,
            log_format: LogFormat::Json,
            cors_origins,
        }
    }

    async fn preflight(cors_origins: CorsOrigins, origin: &str) -> (StatusCode, Option<String>) {
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&config(cors_origins)))
                .route("/api/users", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/users")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let allowed = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        (resp.status(), allowed)
    }

    #[actix_web::test]
    async fn listed_origins_are_allowed_and_others_refused() {
        let origins = CorsOrigins::List(vec![
            "http://localhost:5173".into(),
            "https://app.example.com".into(),
        ]);

        let (status, allowed) = preflight(origins.clone(), "https://app.example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(allowed.as_deref(), Some("https://app.example.com"));

        let (_, allowed) = preflight(origins, "https://evil.example.com").await;
        assert_eq!(allowed, None);
    }

    #[actix_web::test]
    async fn any_origin_is_allowed() {
        let (status, allowed) = preflight(CorsOrigins::Any, "https://anything.example").await;
        assert_eq!(status, StatusCode::OK);
        assert!(allowed.is_some());
    }
}
