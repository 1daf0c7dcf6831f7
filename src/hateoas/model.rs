use crate::entity::Entity;
use crate::hateoas::Links;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// An entity together with its navigation links
///
/// The entity's own fields are flattened next to `_links`; the entity itself is
/// left untouched.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EntityModel<E> {
    #[serde(flatten)]
    content: E,
    #[serde(rename = "_links")]
    links: Links,
}

impl<E> EntityModel<E> {
    pub fn new(content: E, links: Links) -> Self {
        Self { content, links }
    }
}

/// Entity views embedded under `E::COLLECTION_RELATION`, plus collection links
#[derive(Debug, Clone)]
pub struct CollectionModel<E> {
    content: Vec<EntityModel<E>>,
    links: Links,
}

impl<E: Entity> CollectionModel<E> {
    pub fn new(content: Vec<EntityModel<E>>, links: Links) -> Self {
        Self { content, links }
    }
}

struct Embedded<'a, E>(&'a [EntityModel<E>]);

impl<E: Entity> Serialize for Embedded<'_, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(E::COLLECTION_RELATION, self.0)?;
        map.end()
    }
}

impl<E: Entity> Serialize for CollectionModel<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.content.is_empty() {
            map.serialize_entry("_embedded", &Embedded(&self.content))?;
        }
        map.serialize_entry("_links", &self.links)?;
        map.end()
    }
}
