use crate::application::user_service::UserService;
use crate::domain::error::DomainError;
use crate::presentation::dto::UserRequest;
use crate::presentation::middleware::RequestId;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Scope, delete, get, post, put, web};
use tracing::info;

pub fn scope() -> Scope {
    web::scope("/users")
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
}

#[get("")]
async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse, DomainError> {
    let users = service.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("")]
async fn create_user(
    req: HttpRequest,
    service: web::Data<UserService>,
    payload: web::Json<UserRequest>,
) -> Result<HttpResponse, DomainError> {
    let user = service.create_user(&payload).await?;

    info!(
        request_id = %request_id(&req),
        user_id = user.id,
        "user created"
    );

    Ok(HttpResponse::Created().json(user))
}

#[get("/{id}")]
async fn get_user(
    service: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let user = service.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/{id}")]
async fn update_user(
    req: HttpRequest,
    service: web::Data<UserService>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> Result<HttpResponse, DomainError> {
    let user = service.update_user(path.into_inner(), &payload).await?;

    info!(
        request_id = %request_id(&req),
        user_id = user.id,
        "user updated"
    );

    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{id}")]
async fn delete_user(
    req: HttpRequest,
    service: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    service.delete_user(id).await?;

    info!(
        request_id = %request_id(&req),
        user_id = id,
        "user deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
