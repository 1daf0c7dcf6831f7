use proc_macro::TokenStream;

mod entity;
mod injectable;
mod module;

/// Derive macro for making a struct injectable into the DI container
///
/// `Arc<T>` fields resolve a registered `T`, `Arc<dyn Trait>` fields resolve a
/// trait binding. Generic structs are supported as long as their parameters
/// are `'static`.
///
/// # Example
/// ```ignore
/// use healthplan::Injectable;
///
/// #[derive(Injectable)]
/// pub struct BaseService<E: Entity> {
///     repository: Arc<dyn Repository<E>>,
/// }
/// ```
#[proc_macro_derive(Injectable)]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    injectable::derive_injectable(input)
}

/// Derive macro implementing `healthplan::entity::Entity`
///
/// The identifier is the field marked `#[resource(id)]`, or the field named
/// `id`. It must be an `Option<i64>`.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Entity)]
/// #[resource(path = "/api/v1/healthplans")]
/// pub struct HealthPlan {
///     id: Option<i64>,
///     name: String,
/// }
/// ```
///
/// `collection` overrides the HAL `_embedded` key, which defaults to the
/// lower-camel type name followed by `List` (`healthPlanList`).
#[proc_macro_derive(Entity, attributes(resource))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity(input)
}

/// Attribute macro for defining a module with bindings, providers and controllers
///
/// Registration order is bindings, imports, providers, then controllers.
///
/// # Example
/// ```ignore
/// #[module(
///     bindings = [(dyn Repository<HealthPlan> => HealthPlanRepository)],
///     providers = [HealthPlanRepository, HealthPlanService],
///     controllers = [HealthPlanController],
/// )]
/// pub struct HealthPlanModule;
/// ```
#[proc_macro_attribute]
pub fn module(attr: TokenStream, item: TokenStream) -> TokenStream {
    module::module_attribute(attr, item)
}
