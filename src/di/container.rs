use crate::error::{HealthPlanError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type AnyArc = Arc<dyn Any + Send + Sync>;

/// Turns the registered implementation into an `Arc<Arc<dyn Trait>>` boxed as
/// `Any`. `None` means the stored instance was not of the bound type.
type CasterFn = Arc<dyn Fn(AnyArc) -> Option<AnyArc> + Send + Sync>;

/// Thread-safe dependency injection container.
///
/// Instances are keyed by their concrete type. Trait objects are resolved
/// through a binding from the trait to a registered implementation.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, AnyArc>,
    trait_mappings: DashMap<TypeId, TypeId>,
    casters: DashMap<TypeId, CasterFn>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        tracing::debug!(service = std::any::type_name::<T>(), "Registering service");
        self.services.insert(TypeId::of::<T>(), Arc::new(instance));
        self
    }

    pub fn register_trait<Trait, Impl, F>(&mut self, caster_fn: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let trait_id = TypeId::of::<Trait>();

        self.trait_mappings.insert(trait_id, TypeId::of::<Impl>());

        let caster: CasterFn = Arc::new(move |instance: AnyArc| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster_fn(concrete);
            Some(Arc::new(trait_obj) as AnyArc)
        });

        self.casters.insert(trait_id, caster);
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(|| HealthPlanError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            })?;

        entry
            .value()
            .clone()
            .downcast::<T>()
            .map_err(|_| HealthPlanError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let trait_id = TypeId::of::<T>();
        let trait_name = std::any::type_name::<T>();

        let caster = self
            .casters
            .get(&trait_id)
            .ok_or_else(|| HealthPlanError::DependencyNotFound {
                type_name: format!("No binding registered for trait '{trait_name}'"),
            })?;

        let impl_id = *self
            .trait_mappings
            .get(&trait_id)
            .ok_or_else(|| HealthPlanError::DependencyNotFound {
                type_name: format!("No implementation mapping found for trait '{trait_name}'"),
            })?;

        let instance = self
            .services
            .get(&impl_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| HealthPlanError::DependencyNotFound {
                type_name: format!("Implementation for trait '{trait_name}' not registered"),
            })?;

        let downcast_failed = || HealthPlanError::DowncastFailed {
            type_name: trait_name.to_string(),
        };

        // The caster yields Arc<Arc<T>> behind Any, unwrap one layer
        let wrapper = (caster.value())(instance)
            .ok_or_else(downcast_failed)?
            .downcast::<Arc<T>>()
            .map_err(|_| downcast_failed())?;

        Ok(wrapper.as_ref().clone())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.trait_mappings.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
