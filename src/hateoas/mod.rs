//! Hypermedia links and HAL response views.

mod builder;
mod link;
mod model;

pub use builder::LinkBuilder;
pub use link::{Link, LinkRelation, Links};
pub use model::{CollectionModel, EntityModel};
