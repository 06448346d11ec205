// src/models/event.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub spoon_name: String,
    pub date: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub spoon_name: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct CriterionAggregate {
    pub total: f64,
    pub count: i64,
    pub average: f64,
}

impl CriterionAggregate {
    // A NULL average means the event has no ratings yet; it goes out as a
    // numeric 0 and clients render it as "N/A", not as "0".
    pub fn from_avg(average: Option<f64>, count: i64) -> Self {
        let average = average.unwrap_or(0.0);
        CriterionAggregate {
            total: average * count as f64,
            count,
            average,
        }
    }

    pub fn zeroed() -> Self {
        CriterionAggregate {
            total: 0.0,
            count: 0,
            average: 0.0,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRatings {
    pub event_ease: CriterionAggregate,
    pub event_vibes: CriterionAggregate,
    pub spoon_vibes: CriterionAggregate,
    pub spoon_price: CriterionAggregate,
    pub spoon_portion: CriterionAggregate,
}

impl EventRatings {
    pub fn zeroed() -> Self {
        EventRatings {
            event_ease: CriterionAggregate::zeroed(),
            event_vibes: CriterionAggregate::zeroed(),
            spoon_vibes: CriterionAggregate::zeroed(),
            spoon_price: CriterionAggregate::zeroed(),
            spoon_portion: CriterionAggregate::zeroed(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventWithRatings {
    #[serde(flatten)]
    pub event: Event,
    pub ratings: EventRatings,
}
