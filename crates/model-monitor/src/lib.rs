//! Model Health Monitoring
//!
//! Keeps the latest performance and drift snapshot per model and raises
//! accuracy threshold alerts on demand.

mod config;
mod model;
mod registry;
mod threshold;

pub use config::RegistrySettings;
pub use model::{Alert, AlertKind, DataDrift, ModelPerformance, MonitorConfig, MonitorRecord};
pub use registry::MonitorRegistry;
pub use threshold::{accuracy_breach, UnsetPerformancePolicy};
