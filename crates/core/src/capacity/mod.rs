//! Team capacity and planned effort over time.

mod capacity_model;
mod capacity_service;
mod capacity_timeseries;
mod capacity_traits;

pub use capacity_model::{Capacity, NewCapacity, TimeseriesPoint, DEFAULT_CAPACITY};
pub use capacity_service::CapacityService;
pub use capacity_timeseries::{capacity_timeseries, effort_timeseries, ProjectEffort};
pub use capacity_traits::{CapacityRepositoryTrait, CapacityServiceTrait};
