use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::error::{AppError, Result};
use crate::models::Ninja;

/// Collection holding the ninja documents
const COLLECTION: &str = "ninjas";

/// Radius of the nearby query, meters on the spherical metric
pub const NEARBY_MAX_DISTANCE_METERS: f64 = 100_000.0;

/// Repository mediating all reads and writes of the ninja collection.
///
/// Cheap to construct; handlers build one per request from the shared
/// database handle.
#[derive(Clone)]
pub struct NinjaRepository {
    collection: Collection<Ninja>,
}

impl NinjaRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Ninja>(COLLECTION),
        }
    }

    /// Create the `2dsphere` index backing the nearby query. Idempotent.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "geometry": "2dsphere" })
            .build();
        self.collection.create_index(index, None).await?;
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<Ninja>> {
        let cursor = self.collection.find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Look up one ninja. `None` is the authoritative "does not exist"
    /// signal for the handlers.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Ninja>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    pub async fn insert(&self, ninja: Ninja) -> Result<Ninja> {
        let result = self.collection.insert_one(&ninja, None).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Database("insert did not return an ObjectId".to_string()))?;
        Ok(Ninja {
            id: Some(id),
            ..ninja
        })
    }

    /// `$set` the given fields and return the document after the update,
    /// or `None` when no document matched the id.
    pub async fn update_by_id(&self, id: ObjectId, fields: Document) -> Result<Option<Ninja>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": fields }, options)
            .await?)
    }

    /// Hard delete; returns the pre-deletion snapshot, or `None` when no
    /// document matched the id.
    pub async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Ninja>> {
        Ok(self
            .collection
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?)
    }

    /// Ninjas within `max_distance` meters of the reference point, nearest
    /// first. Requires the `2dsphere` index from [`ensure_indexes`].
    ///
    /// [`ensure_indexes`]: NinjaRepository::ensure_indexes
    pub async fn find_nearby(
        &self,
        longitude: f64,
        latitude: f64,
        max_distance: f64,
    ) -> Result<Vec<Ninja>> {
        let pipeline = vec![doc! {
            "$geoNear": {
                "near": { "type": "Point", "coordinates": [longitude, latitude] },
                "distanceField": "dist.calculated",
                "maxDistance": max_distance,
                "spherical": true,
            }
        }];

        let mut cursor = self.collection.aggregate(pipeline, None).await?;
        let mut ninjas = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            ninjas.push(bson::from_document(document)?);
        }
        Ok(ninjas)
    }
}
