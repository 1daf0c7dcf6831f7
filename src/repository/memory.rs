use crate::di::{Container, Injectable};
use crate::entity::Entity;
use crate::paging::{Direction, Order, Page, PageRequest};
use crate::repository::{Repository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

/// Process-local repository keyed by identifier
pub struct InMemoryRepository<E> {
    rows: RwLock<BTreeMap<i64, E>>,
    sequence: AtomicI64,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(1),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Injectable for InMemoryRepository<E> {
    fn inject(_container: &Container) -> crate::Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_page(&self, request: &PageRequest) -> RepositoryResult<Page<E>> {
        let mut content: Vec<E> = self.rows.read().await.values().cloned().collect();
        if !request.sort.is_empty() {
            content = sort_by_properties(content, &request.sort)?;
        }

        let total = content.len() as u64;
        let slice = content
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Ok(Page::new(slice, request, total))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<E>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.rows.read().await.contains_key(&id))
    }

    async fn save(&self, mut entity: E) -> RepositoryResult<E> {
        let mut rows = self.rows.write().await;
        let id = match entity.id() {
            Some(id) if rows.contains_key(&id) => id,
            _ => self.sequence.fetch_add(1, AtomicOrdering::SeqCst),
        };
        entity.set_id(id);
        rows.insert(id, entity.clone());
        tracing::trace!(entity = E::PATH, id, "Stored entity");
        Ok(entity)
    }

    async fn replace(&self, id: i64, mut entity: E) -> RepositoryResult<Option<E>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        entity.set_id(id);
        *row = entity.clone();
        Ok(Some(entity))
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        self.rows.write().await.remove(&id);
        Ok(())
    }
}

/// Stable multi-key sort over the serialized form of each entity
fn sort_by_properties<E: Entity>(entities: Vec<E>, orders: &[Order]) -> RepositoryResult<Vec<E>> {
    let mut keyed = entities
        .into_iter()
        .map(|entity| {
            let value = serde_json::to_value(&entity)?;
            let keys = orders
                .iter()
                .map(|order| {
                    value
                        .get(&order.property)
                        .cloned()
                        .ok_or_else(|| RepositoryError::InvalidSortProperty(order.property.clone()))
                })
                .collect::<RepositoryResult<Vec<Value>>>()?;
            Ok((keys, entity))
        })
        .collect::<RepositoryResult<Vec<(Vec<Value>, E)>>>()?;

    keyed.sort_by(|(left, _), (right, _)| {
        left.iter()
            .zip(right)
            .zip(orders)
            .map(|((l, r), order)| match order.direction {
                Direction::Asc => compare_values(l, r),
                Direction::Desc => compare_values(l, r).reverse(),
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    Ok(keyed.into_iter().map(|(_, entity)| entity).collect())
}

/// Nulls first, then natural order within a JSON type
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(l), Value::Number(r)) => {
            if let (Some(l), Some(r)) = (l.as_i64(), r.as_i64()) {
                return l.cmp(&r);
            }
            if let (Some(l), Some(r)) = (l.as_u64(), r.as_u64()) {
                return l.cmp(&r);
            }
            let l = l.as_f64().unwrap_or_default();
            let r = r.as_f64().unwrap_or_default();
            l.total_cmp(&r)
        }
        (Value::String(l), Value::String(r)) => l.cmp(r),
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        _ => left.to_string().cmp(&right.to_string()),
    }
}
