use serde::{Serialize, de::DeserializeOwned};

/// A record exposed over HTTP by an [`EntityController`](crate::controller::EntityController)
///
/// Implemented with `#[derive(Entity)]`:
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
/// #[resource(path = "/api/v1/healthplans")]
/// pub struct HealthPlan {
///     pub id: Option<i64>,
///     pub name: String,
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Base route of the entity's controller, e.g. `/api/v1/healthplans`.
    const PATH: &'static str;

    /// Key under `_embedded` in collection responses.
    const COLLECTION_RELATION: &'static str;

    /// `None` until the entity has been persisted.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);
}
