pub mod plan;

pub use plan::{Plan, PlanError, PlanType};
