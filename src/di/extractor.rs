use crate::di::Container;
use crate::error::HealthPlanError;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

/// Handler argument resolved from the router state's container
///
/// A missing registration rejects the request with [`HealthPlanError`], which
/// answers 500.
pub struct Inject<T>(pub Arc<T>);

/// Router state carrying the application container
pub trait HasContainer {
    fn container(&self) -> &Container;
}

impl<S, T> FromRequestParts<S> for Inject<T>
where
    S: Send + Sync + HasContainer,
    T: 'static + Send + Sync,
{
    type Rejection = HealthPlanError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        state.container().resolve::<T>().map(Inject)
    }
}
