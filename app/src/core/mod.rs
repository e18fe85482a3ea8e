mod dtos;
mod manager;
mod notifier;
mod registry;
mod submission;

pub mod lifecycle;
pub mod ranking;
pub mod scoring;
pub mod stats;

pub use dtos::*;
pub use manager::*;
pub use notifier::*;
pub use registry::*;
pub use submission::*;
