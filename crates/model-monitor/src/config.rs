//! Registry configuration

use crate::threshold::UnsetPerformancePolicy;
use serde::{Deserialize, Serialize};

/// Registry behaviour settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Threshold handling for monitors that never received performance
    pub unset_performance: UnsetPerformancePolicy,
}

impl RegistrySettings {
    /// Settings under which never-updated monitors alert on every check
    pub fn strict() -> Self {
        Self {
            unset_performance: UnsetPerformancePolicy::TreatAsZero,
        }
    }
}
