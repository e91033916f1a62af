use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A GeoJSON point, longitude first.
///
/// The only spatially indexed value in the system; the ninja collection
/// carries a `2dsphere` index on the full `geometry` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    /// GeoJSON geometry type, always `"Point"`
    #[serde(rename = "type", default = "default_geometry_type")]
    #[schema(example = "Point")]
    pub kind: String,
    /// `[longitude, latitude]`
    #[schema(example = json!([135.0, 35.0]))]
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    pub const POINT: &'static str = "Point";

    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: default_geometry_type(),
            coordinates: vec![longitude, latitude],
        }
    }
}

fn default_geometry_type() -> String {
    GeoPoint::POINT.to_string()
}

/// A persisted ninja record.
///
/// `id` is `None` only before the first insert; the store assigns it and it
/// is immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ninja {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub rank: String,
    #[serde(default)]
    pub available: bool,
    pub geometry: GeoPoint,
}
