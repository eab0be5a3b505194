//! Projects module - domain models, services, and traits.

mod project_warnings;
mod projects_model;
mod projects_service;
mod projects_traits;

mod projects_model_tests;
#[cfg(test)]
mod projects_service_tests;

pub use project_warnings::{collect_warnings, WarningContext};
pub use projects_model::{
    ChargingPolicy, NewProject, Project, ProjectNature, ProjectStatus, ProjectSummary,
};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
