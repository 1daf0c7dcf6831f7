//! Health plans, served by the generic controller at `/api/v1/healthplans`.

mod model;

pub use model::HealthPlan;

use crate::controller::EntityController;
use crate::repository::{InMemoryRepository, Repository};
use crate::service::BaseService;
use healthplan_macro::module;

pub type HealthPlanRepository = InMemoryRepository<HealthPlan>;
pub type HealthPlanService = BaseService<HealthPlan>;
pub type HealthPlanController = EntityController<HealthPlan, HealthPlanService>;

#[module(
    bindings = [(dyn Repository<HealthPlan> => HealthPlanRepository)],
    providers = [HealthPlanRepository, HealthPlanService],
    controllers = [HealthPlanController],
)]
pub struct HealthPlanModule;
