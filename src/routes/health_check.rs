use actix_web::HttpResponse;

/// Liveness probe for the deployment platform.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
