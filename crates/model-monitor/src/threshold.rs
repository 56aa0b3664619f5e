//! Accuracy Threshold Rule

use crate::model::MonitorRecord;
use serde::{Deserialize, Serialize};

/// How to treat a monitor whose performance was never reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsetPerformancePolicy {
    /// Exclude the monitor from threshold checks
    #[default]
    Skip,
    /// Treat missing accuracy as 0.0, so any positive threshold alerts
    TreatAsZero,
}

/// Returns the accuracy that breached the record's threshold, if any.
///
/// The comparison is strict: accuracy equal to the threshold does not alert.
/// A NaN on either side never alerts.
pub fn accuracy_breach(record: &MonitorRecord, policy: UnsetPerformancePolicy) -> Option<f64> {
    let accuracy = match (&record.performance, policy) {
        (Some(performance), _) => performance.accuracy,
        (None, UnsetPerformancePolicy::TreatAsZero) => 0.0,
        (None, UnsetPerformancePolicy::Skip) => return None,
    };

    (accuracy < record.config.threshold).then_some(accuracy)
}
