/// Ninja handlers - HTTP endpoints for CRUD and the nearby lookup
///
/// Every handler follows receive -> validate -> execute -> respond.
/// Validation runs before any persistence call; failures propagate once,
/// as an `AppError`, to the response-writing boundary in `error.rs`.
use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use mongodb::Database;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::db::{NinjaRepository, NEARBY_MAX_DISTANCE_METERS};
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, Ninja};

/// Geometry as submitted by clients; `type` defaults to `"Point"`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GeometryInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub coordinates: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNinjaRequest {
    pub name: Option<String>,
    pub rank: Option<String>,
    pub available: Option<bool>,
    pub geometry: Option<GeometryInput>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNinjaRequest {
    pub name: Option<String>,
    pub rank: Option<String>,
    pub available: Option<bool>,
    pub geometry: Option<GeometryInput>,
}

/// Query parameters for the nearby lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct NearbyQuery {
    /// Latitude of the reference point
    pub lat: Option<f64>,
    /// Longitude of the reference point
    pub lng: Option<f64>,
}

/// Wire form of a ninja; the ObjectId is rendered as its hex string
#[derive(Debug, Serialize, ToSchema)]
pub struct NinjaPayload {
    #[schema(example = "665f1f77bcf86cd799439011")]
    pub id: String,
    pub name: String,
    pub rank: String,
    pub available: bool,
    pub geometry: GeoPoint,
}

impl From<Ninja> for NinjaPayload {
    fn from(ninja: Ninja) -> Self {
        Self {
            id: ninja.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: ninja.name,
            rank: ninja.rank,
            available: ninja.available,
            geometry: ninja.geometry,
        }
    }
}

/// `{ message, ninja }` envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct NinjaResponse {
    pub message: String,
    pub ninja: NinjaPayload,
}

impl NinjaResponse {
    fn new(message: &str, ninja: Ninja) -> Self {
        Self {
            message: message.to_string(),
            ninja: ninja.into(),
        }
    }
}

/// `{ message, ninjas }` envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct NinjaListResponse {
    pub message: String,
    pub ninjas: Vec<NinjaPayload>,
}

impl NinjaListResponse {
    fn new(message: &str, ninjas: Vec<Ninja>) -> Self {
        Self {
            message: message.to_string(),
            ninjas: ninjas.into_iter().map(NinjaPayload::from).collect(),
        }
    }
}

/// `{ message }` body of known errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

fn require_text(value: Option<&str>, message: &str) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(AppError::BadRequest(message.to_string())),
    }
}

fn require_coordinates(geometry: Option<&GeometryInput>) -> Result<Vec<f64>> {
    match geometry.and_then(|g| g.coordinates.as_deref()) {
        Some(coordinates) if coordinates.len() == 2 => Ok(coordinates.to_vec()),
        _ => Err(AppError::BadRequest("Coordinates are required!".to_string())),
    }
}

/// Well-formedness gate for path ids, checked before any query is issued.
fn parse_object_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest("Invalid ID format!".to_string()))
}

fn geo_point_from(geometry: &GeometryInput, coordinates: Vec<f64>) -> GeoPoint {
    GeoPoint {
        kind: geometry
            .kind
            .clone()
            .unwrap_or_else(|| GeoPoint::POINT.to_string()),
        coordinates,
    }
}

/// List all ninjas
#[utoipa::path(
    get,
    path = "/api/ninjas",
    tag = "ninjas",
    responses(
        (status = 200, description = "All ninjas", body = NinjaListResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    )
)]
pub async fn list_ninjas(db: web::Data<Database>) -> Result<HttpResponse> {
    let repo = NinjaRepository::new(db.get_ref());
    let ninjas = repo.find_all().await?;

    Ok(HttpResponse::Ok().json(NinjaListResponse::new("Ninjas listed successfully", ninjas)))
}

/// Find ninjas near a point
#[utoipa::path(
    get,
    path = "/api/ninjas/nearby",
    tag = "ninjas",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Ninjas within 100 km, nearest first", body = NinjaListResponse),
        (status = 400, description = "Missing coordinates", body = ErrorResponse)
    )
)]
pub async fn find_nearby_ninjas(
    db: web::Data<Database>,
    query: web::Query<NearbyQuery>,
) -> Result<HttpResponse> {
    let (lat, lng) = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(AppError::BadRequest("Coordinates are required!".to_string())),
    };

    let repo = NinjaRepository::new(db.get_ref());
    let ninjas = repo
        .find_nearby(lng, lat, NEARBY_MAX_DISTANCE_METERS)
        .await?;

    Ok(HttpResponse::Ok().json(NinjaListResponse::new(
        "Nearby ninjas listed successfully",
        ninjas,
    )))
}

/// Find a ninja by id
#[utoipa::path(
    get,
    path = "/api/ninjas/{id}",
    tag = "ninjas",
    params(("id" = String, Path, description = "Hex ObjectId of the ninja")),
    responses(
        (status = 200, description = "The ninja", body = NinjaResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such ninja", body = ErrorResponse)
    )
)]
pub async fn get_ninja(db: web::Data<Database>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_object_id(&path)?;

    let repo = NinjaRepository::new(db.get_ref());
    match repo.find_by_id(id).await? {
        Some(ninja) => Ok(HttpResponse::Ok().json(NinjaResponse::new(
            "Ninja found successfully",
            ninja,
        ))),
        None => Err(AppError::NotFound("Ninja not found".to_string())),
    }
}

/// Add a new ninja
#[utoipa::path(
    post,
    path = "/api/ninjas",
    tag = "ninjas",
    request_body = CreateNinjaRequest,
    responses(
        (status = 201, description = "Ninja created", body = NinjaResponse),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn create_ninja(
    db: web::Data<Database>,
    body: web::Json<CreateNinjaRequest>,
) -> Result<HttpResponse> {
    let name = require_text(body.name.as_deref(), "Name is required!")?;
    let rank = require_text(body.rank.as_deref(), "Rank is required!")?;
    let coordinates = require_coordinates(body.geometry.as_ref())?;
    let geometry = match body.geometry.as_ref() {
        Some(input) => geo_point_from(input, coordinates),
        None => GeoPoint::new(coordinates[0], coordinates[1]),
    };

    let ninja = Ninja {
        id: None,
        name,
        rank,
        available: body.available.unwrap_or(false),
        geometry,
    };

    let repo = NinjaRepository::new(db.get_ref());
    let created = repo.insert(ninja).await?;

    Ok(HttpResponse::Created().json(NinjaResponse::new("Ninja added successfully", created)))
}

/// Update a ninja
#[utoipa::path(
    put,
    path = "/api/ninjas/{id}",
    tag = "ninjas",
    params(("id" = String, Path, description = "Hex ObjectId of the ninja")),
    request_body = UpdateNinjaRequest,
    responses(
        (status = 200, description = "Ninja after the update", body = NinjaResponse),
        (status = 400, description = "Malformed id or missing field", body = ErrorResponse),
        (status = 404, description = "No such ninja", body = ErrorResponse)
    )
)]
pub async fn update_ninja(
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<UpdateNinjaRequest>,
) -> Result<HttpResponse> {
    let id = parse_object_id(&path)?;
    let name = require_text(body.name.as_deref(), "Name is required!")?;
    let rank = require_text(body.rank.as_deref(), "Rank is required!")?;

    let mut fields = doc! { "name": name, "rank": rank };
    if let Some(available) = body.available {
        fields.insert("available", available);
    }
    if let Some(geometry) = body.geometry.as_ref() {
        let coordinates = require_coordinates(Some(geometry))?;
        fields.insert(
            "geometry",
            bson::to_bson(&geo_point_from(geometry, coordinates))?,
        );
    }

    let repo = NinjaRepository::new(db.get_ref());
    match repo.update_by_id(id, fields).await? {
        Some(ninja) => Ok(HttpResponse::Ok().json(NinjaResponse::new(
            "Ninja updated successfully",
            ninja,
        ))),
        None => Err(AppError::NotFound("Ninja not found".to_string())),
    }
}

/// Delete a ninja
#[utoipa::path(
    delete,
    path = "/api/ninjas/{id}",
    tag = "ninjas",
    params(("id" = String, Path, description = "Hex ObjectId of the ninja")),
    responses(
        (status = 200, description = "The deleted ninja", body = NinjaResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such ninja", body = ErrorResponse)
    )
)]
pub async fn delete_ninja(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_object_id(&path)?;

    let repo = NinjaRepository::new(db.get_ref());
    match repo.delete_by_id(id).await? {
        Some(ninja) => Ok(HttpResponse::Ok().json(NinjaResponse::new(
            "Ninja deleted successfully",
            ninja,
        ))),
        None => Err(AppError::NotFound("Ninja not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_text_is_rejected() {
        assert!(require_text(None, "Name is required!").is_err());
        assert!(require_text(Some(""), "Name is required!").is_err());
        assert!(require_text(Some("   "), "Name is required!").is_err());
        assert_eq!(
            require_text(Some("Naruto"), "Name is required!").unwrap(),
            "Naruto"
        );

        let err = require_text(None, "Rank is required!").unwrap_err();
        assert_eq!(err.to_string(), "Rank is required!");
    }

    #[test]
    fn coordinates_must_be_a_two_element_pair() {
        assert!(require_coordinates(None).is_err());
        assert!(require_coordinates(Some(&GeometryInput {
            kind: None,
            coordinates: None,
        }))
        .is_err());
        assert!(require_coordinates(Some(&GeometryInput {
            kind: None,
            coordinates: Some(vec![135.0]),
        }))
        .is_err());

        let coordinates = require_coordinates(Some(&GeometryInput {
            kind: None,
            coordinates: Some(vec![135.0, 35.0]),
        }))
        .unwrap();
        assert_eq!(coordinates, vec![135.0, 35.0]);
    }

    #[test]
    fn malformed_ids_are_rejected_before_any_query() {
        let err = parse_object_id("not-an-id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid ID format!");
        assert!(matches!(err, AppError::BadRequest(_)));

        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn geometry_input_type_defaults_to_point() {
        let input = GeometryInput {
            kind: None,
            coordinates: Some(vec![135.0, 35.0]),
        };
        let point = geo_point_from(&input, vec![135.0, 35.0]);
        assert_eq!(point.kind, "Point");
    }

    #[test]
    fn payload_renders_the_id_as_hex() {
        let id = ObjectId::new();
        let payload = NinjaPayload::from(Ninja {
            id: Some(id),
            name: "Naruto".to_string(),
            rank: "Genin".to_string(),
            available: false,
            geometry: GeoPoint::new(135.0, 35.0),
        });
        assert_eq!(payload.id, id.to_hex());
    }
}
