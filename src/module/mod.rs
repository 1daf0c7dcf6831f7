use crate::di::Container;
use crate::error::Result;

/// Trait for application modules
///
/// Implemented by the `#[module]` attribute, which generates the registration
/// of trait bindings, imported modules, providers and controllers in that
/// order.
///
/// # Example
/// ```ignore
/// use healthplan::module;
///
/// #[module(
///     bindings = [(dyn Repository<HealthPlan> => HealthPlanRepository)],
///     providers = [HealthPlanRepository, HealthPlanService],
///     controllers = [HealthPlanController],
/// )]
/// pub struct HealthPlanModule;
/// ```
pub trait Module {
    /// Register all providers and controllers in this module
    fn register(container: &mut Container) -> Result<()>;
}
