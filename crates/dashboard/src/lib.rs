//! Shared core of the vehicle theft dashboard: the dataset contract, load
//! resolution with sample-data fallback, and the derived metrics both front
//! ends render.

pub mod format;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod presentation;
pub mod sample;
pub mod validate;
pub mod view_state;

pub use format::{format_count, Count, NumberFormat};
pub use loader::{
    parse_dataset, resolve, DataOrigin, FallbackReason, LoadError, LoadOutcome, DEFAULT_RESOURCE,
};
pub use model::{DashboardDataset, Priority, RiskLevel};
pub use sample::sample_dataset;
pub use validate::ShapeError;
pub use view_state::{LoadPhase, Tab, TransitionError, ViewState};
