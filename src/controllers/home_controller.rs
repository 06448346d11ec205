use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

// Health check
#[get("/")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Greasy Spoon Events API is running!"
    }))
}
