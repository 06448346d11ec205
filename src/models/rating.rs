// src/models/rating.rs
use serde::Deserialize;

// All five criteria are required; an explicit 0 still counts as present,
// even though the client only ever sends 1-10.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    pub event_ease: i64,
    pub event_vibes: i64,
    pub spoon_vibes: i64,
    pub spoon_price: i64,
    pub spoon_portion: i64,
}
