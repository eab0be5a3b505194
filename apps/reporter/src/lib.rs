pub mod config;
pub mod job;
mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};
