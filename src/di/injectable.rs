use crate::di::Container;
use crate::error::Result;

/// Trait for types that can be built from the DI container
///
/// Usually implemented with `#[derive(Injectable)]`; types with no
/// dependencies or with extra construction logic implement it by hand.
///
/// # Example
/// ```ignore
/// use healthplan::prelude::*;
///
/// #[derive(Injectable)]
/// pub struct BaseService<E: Entity> {
///     // resolved through the `dyn Repository<E>` binding
///     repository: Arc<dyn Repository<E>>,
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Create an instance by resolving dependencies from the container
    ///
    /// # Errors
    /// Returns an error if any required dependency is not found in the container.
    fn inject(container: &Container) -> Result<Self>;
}
