use actix_web::{HttpResponse, get};

/// Liveness check.
#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().body("Hello from the clinic portal!")
}
