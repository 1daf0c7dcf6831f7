use serde::ser::{Serialize, SerializeMap, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// IANA link relations used by entity and collection responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LinkRelation {
    #[strum(serialize = "self")]
    SelfRel,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    #[serde(skip)]
    pub rel: LinkRelation,
    pub href: String,
}

impl Link {
    pub fn new(rel: LinkRelation, href: impl Into<String>) -> Self {
        Self {
            rel,
            href: href.into(),
        }
    }
}

/// Links keyed by relation, at most one per relation
///
/// Serializes HAL-style: `{"self": {"href": "..."}, "collection": {"href": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link, replacing any existing link with the same relation
    pub fn with(mut self, link: Link) -> Self {
        match self.0.iter_mut().find(|existing| existing.rel == link.rel) {
            Some(existing) => *existing = link,
            None => self.0.push(link),
        }
        self
    }

    pub fn get(&self, rel: LinkRelation) -> Option<&Link> {
        self.0.iter().find(|link| link.rel == rel)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(link.rel.as_ref(), link)?;
        }
        map.end()
    }
}
