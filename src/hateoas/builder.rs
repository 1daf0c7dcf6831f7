use crate::entity::Entity;
use crate::hateoas::{Link, LinkRelation, Links};

/// Route templates and absolute links for one controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    origin: String,
    path: String,
}

impl LinkBuilder {
    /// `origin` is scheme + authority (`http://localhost:8080`), `path` the
    /// controller's base path (`/api/v1/healthplans`)
    pub fn new(origin: &str, path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            path: format!("/{trimmed}"),
        }
    }

    pub fn for_entity<E: Entity>(origin: &str) -> Self {
        Self::new(origin, E::PATH)
    }

    /// Route of list-all and create
    pub fn collection_route(&self) -> &str {
        &self.path
    }

    /// Route of get-by-id, update and delete
    pub fn item_route(&self) -> String {
        format!("{}/{{id}}", self.path)
    }

    pub fn paged_route(&self) -> String {
        format!("{}/paged", self.path)
    }

    pub fn collection_href(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }

    pub fn item_href(&self, id: i64) -> String {
        format!("{}{}/{}", self.origin, self.path, id)
    }

    /// `self` and `collection` links of one entity
    pub fn entity_links(&self, id: i64) -> Links {
        Links::new()
            .with(Link::new(LinkRelation::SelfRel, self.item_href(id)))
            .with(Link::new(LinkRelation::Collection, self.collection_href()))
    }

    /// `self` link of the collection
    pub fn collection_links(&self) -> Links {
        Links::new().with(Link::new(LinkRelation::SelfRel, self.collection_href()))
    }
}
