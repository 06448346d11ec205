use crate::models::rating::RatingRequest;

use actix_web::{post, web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;

// Submit a new rating for an event. Range (1-10) is a client concern and
// is not validated here; the foreign key rejects unknown event ids.
#[post("/api/events/{id}/ratings")]
pub async fn submit_rating(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    data: web::Json<RatingRequest>,
) -> HttpResponse {
    let event_id = path.into_inner();

    match sqlx::query(
        r#"
        INSERT INTO ratings (event_id, event_ease, event_vibes, spoon_vibes, spoon_price, spoon_portion)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(event_id)
    .bind(data.event_ease)
    .bind(data.event_vibes)
    .bind(data.spoon_vibes)
    .bind(data.spoon_price)
    .bind(data.spoon_portion)
    .execute(pool.get_ref())
    .await
    {
        Ok(result) => HttpResponse::Ok().json(json!({
            "message": "Rating added successfully",
            "ratingId": result.last_insert_rowid()
        })),
        Err(e) => {
            log::error!("Failed to insert rating for event {}: {:?}", event_id, e);
            HttpResponse::InternalServerError().json(json!({
                "error": e.to_string()
            }))
        }
    }
}
