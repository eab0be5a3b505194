//! Time logged by users against projects.

mod time_entries_model;
mod time_entries_traits;

pub use time_entries_model::{hours_by_project, NewTimeEntry, TimeEntry};
pub use time_entries_traits::TimeEntryRepositoryTrait;
