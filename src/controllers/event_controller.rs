use crate::models::event::{
    CreateEventRequest, CriterionAggregate, Event, EventRatings, EventWithRatings,
};

use actix_web::{get, post, web, HttpResponse};
use chrono::NaiveDateTime;
use serde_json::json;
use sqlx::{FromRow, SqlitePool};

// One row per event with its rating aggregates folded in. The shared
// COUNT covers all five criteria since a rating always carries all of them.
const EVENT_LIST_SQL: &str = r#"
    SELECT
        e.id,
        e.name,
        e.spoon_name,
        e.date,
        e.created_at,
        COUNT(r.id) AS total_ratings,
        ROUND(AVG(r.event_ease), 1) AS avg_event_ease,
        ROUND(AVG(r.event_vibes), 1) AS avg_event_vibes,
        ROUND(AVG(r.spoon_vibes), 1) AS avg_spoon_vibes,
        ROUND(AVG(r.spoon_price), 1) AS avg_spoon_price,
        ROUND(AVG(r.spoon_portion), 1) AS avg_spoon_portion
    FROM events e
    LEFT JOIN ratings r ON e.id = r.event_id
    GROUP BY e.id
    ORDER BY e.created_at DESC, e.id DESC
"#;

#[derive(Debug, FromRow)]
struct EventAggregateRow {
    id: i64,
    name: String,
    spoon_name: String,
    date: String,
    created_at: NaiveDateTime,
    total_ratings: i64,
    avg_event_ease: Option<f64>,
    avg_event_vibes: Option<f64>,
    avg_spoon_vibes: Option<f64>,
    avg_spoon_price: Option<f64>,
    avg_spoon_portion: Option<f64>,
}

impl EventAggregateRow {
    fn into_event(self) -> EventWithRatings {
        let count = self.total_ratings;
        EventWithRatings {
            event: Event {
                id: self.id,
                name: self.name,
                spoon_name: self.spoon_name,
                date: self.date,
                created_at: self.created_at,
            },
            ratings: EventRatings {
                event_ease: CriterionAggregate::from_avg(self.avg_event_ease, count),
                event_vibes: CriterionAggregate::from_avg(self.avg_event_vibes, count),
                spoon_vibes: CriterionAggregate::from_avg(self.avg_spoon_vibes, count),
                spoon_price: CriterionAggregate::from_avg(self.avg_spoon_price, count),
                spoon_portion: CriterionAggregate::from_avg(self.avg_spoon_portion, count),
            },
        }
    }
}

// Get all events with their average ratings, newest first
#[get("/api/events")]
pub async fn get_events(pool: web::Data<SqlitePool>) -> HttpResponse {
    match sqlx::query_as::<_, EventAggregateRow>(EVENT_LIST_SQL)
        .fetch_all(pool.get_ref())
        .await
    {
        Ok(rows) => {
            let events: Vec<EventWithRatings> =
                rows.into_iter().map(EventAggregateRow::into_event).collect();
            HttpResponse::Ok().json(events)
        }
        Err(e) => sql_error("list_events", e),
    }
}

// Create new event
#[post("/api/events")]
pub async fn create_event(
    pool: web::Data<SqlitePool>,
    data: web::Json<CreateEventRequest>,
) -> HttpResponse {
    // Presence check before any storage access; blank strings count as missing
    if data.name.trim().is_empty() || data.spoon_name.trim().is_empty() || data.date.trim().is_empty()
    {
        return HttpResponse::BadRequest().json(json!({
            "error": "Missing required fields"
        }));
    }

    let result = match sqlx::query("INSERT INTO events (name, spoon_name, date) VALUES (?, ?, ?)")
        .bind(&data.name)
        .bind(&data.spoon_name)
        .bind(&data.date)
        .execute(pool.get_ref())
        .await
    {
        Ok(result) => result,
        Err(e) => return sql_error("insert_event", e),
    };

    // Re-read the row so the response carries the server-assigned created_at
    let event_id = result.last_insert_rowid();
    match sqlx::query_as::<_, Event>(
        "SELECT id, name, spoon_name, date, created_at FROM events WHERE id = ?",
    )
    .bind(event_id)
    .fetch_one(pool.get_ref())
    .await
    {
        Ok(event) => HttpResponse::Ok().json(EventWithRatings {
            event,
            ratings: EventRatings::zeroed(),
        }),
        Err(e) => sql_error("read_event", e),
    }
}

fn sql_error(step: &str, e: sqlx::Error) -> HttpResponse {
    log::error!("SQL error [{}]: {:?}", step, e);
    HttpResponse::InternalServerError().json(json!({
        "error": e.to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::rating_controller::submit_rating;
    use actix_web::{test, App};

    macro_rules! spawn_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($pool.clone()))
                    .service(get_events)
                    .service(create_event)
                    .service(submit_rating),
            )
            .await
        };
    }

    fn event_payload(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "spoonName": "The Golden Fork",
            "date": "2025-11-02"
        })
    }

    #[actix_web::test]
    async fn created_event_has_zero_aggregates() {
        let pool = crate::db::memory_pool().await;
        let app = spawn_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/events")
            .set_json(event_payload("Autumn fry-up"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Autumn fry-up");
        assert_eq!(body["spoonName"], "The Golden Fork");
        assert_eq!(body["date"], "2025-11-02");
        assert!(body["createdAt"].is_string());
        for criterion in [
            "eventEase",
            "eventVibes",
            "spoonVibes",
            "spoonPrice",
            "spoonPortion",
        ] {
            assert_eq!(body["ratings"][criterion]["count"], 0);
            assert_eq!(body["ratings"][criterion]["average"], 0.0);
            assert_eq!(body["ratings"][criterion]["total"], 0.0);
        }

        let req = test::TestRequest::get().uri("/api/events").to_request();
        let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let listed = listed.as_array().expect("array body");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["ratings"]["eventEase"]["count"], 0);
        assert_eq!(listed[0]["ratings"]["eventEase"]["average"], 0.0);
    }

    #[actix_web::test]
    async fn missing_field_is_rejected_without_insert() {
        let pool = crate::db::memory_pool().await;
        let app = spawn_app!(pool);

        // Field absent entirely: rejected at deserialization
        let req = test::TestRequest::post()
            .uri("/api/events")
            .set_json(json!({ "name": "No spoon" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        // Field present but blank: rejected by the presence check
        let req = test::TestRequest::post()
            .uri("/api/events")
            .set_json(json!({ "name": "No spoon", "spoonName": "", "date": "2025-11-02" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(events, 0);
    }

    #[actix_web::test]
    async fn events_list_newest_first() {
        let pool = crate::db::memory_pool().await;
        let app = spawn_app!(pool);

        for name in ["First outing", "Second outing"] {
            let req = test::TestRequest::post()
                .uri("/api/events")
                .set_json(event_payload(name))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200);
        }

        let req = test::TestRequest::get().uri("/api/events").to_request();
        let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["name"], "Second outing");
        assert_eq!(listed[1]["name"], "First outing");
    }

    #[actix_web::test]
    async fn unrated_event_listed_alongside_rated_one() {
        let pool = crate::db::memory_pool().await;
        let app = spawn_app!(pool);

        for name in ["Rated outing", "Quiet outing"] {
            let req = test::TestRequest::post()
                .uri("/api/events")
                .set_json(event_payload(name))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200);
        }

        let req = test::TestRequest::post()
            .uri("/api/events/1/ratings")
            .set_json(json!({
                "eventEase": 6,
                "eventVibes": 7,
                "spoonVibes": 8,
                "spoonPrice": 4,
                "spoonPortion": 9
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get().uri("/api/events").to_request();
        let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 2);

        let rated = listed.iter().find(|e| e["id"] == 1).unwrap();
        let quiet = listed.iter().find(|e| e["id"] == 2).unwrap();
        assert_eq!(rated["ratings"]["spoonPrice"]["count"], 1);
        assert_eq!(rated["ratings"]["spoonPrice"]["average"], 4.0);
        assert_eq!(quiet["ratings"]["spoonPrice"]["count"], 0);
        assert_eq!(quiet["ratings"]["spoonPrice"]["average"], 0.0);
    }
}
