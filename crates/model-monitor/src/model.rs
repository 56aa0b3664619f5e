//! Monitor Data Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identifies a monitored model and its alerting threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Registry key
    pub model_name: String,
    pub dataset_name: String,
    pub target_metric: String,
    /// Accuracy below this value raises an alert
    pub threshold: f64,
    /// Opaque channel identifier, passed through to alerts
    pub notification_channel: String,
}

impl MonitorConfig {
    /// Create a config with empty dataset, metric and channel fields
    pub fn new(model_name: impl Into<String>, threshold: f64) -> Self {
        Self {
            model_name: model_name.into(),
            dataset_name: String::new(),
            target_metric: String::new(),
            threshold,
            notification_channel: String::new(),
        }
    }
}

/// Latest evaluation metrics for a model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPerformance {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Latency as reported by the caller; unit is not interpreted
    pub latency: f64,
}

/// Caller-supplied drift indicators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDrift {
    /// Feature name to importance score
    #[serde(default)]
    pub feature_importance: HashMap<String, f64>,
    /// Feature name to "distribution shifted" flag
    #[serde(default)]
    pub distribution_shift: HashMap<String, bool>,
}

impl DataDrift {
    /// Names of features flagged as shifted, sorted
    pub fn shifted_features(&self) -> Vec<&str> {
        let mut shifted: Vec<&str> = self
            .distribution_shift
            .iter()
            .filter(|(_, shifted)| **shifted)
            .map(|(name, _)| name.as_str())
            .collect();
        shifted.sort_unstable();
        shifted
    }
}

/// Everything the registry knows about one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorRecord {
    pub config: MonitorConfig,
    /// `None` until the first performance update
    pub performance: Option<ModelPerformance>,
    /// `None` until the first drift update
    pub data_drift: Option<DataDrift>,
    pub last_updated: DateTime<Utc>,
}

impl MonitorRecord {
    /// Fresh record with no snapshots
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            performance: None,
            data_drift: None,
            last_updated: Utc::now(),
        }
    }

    /// Model name (also the registry key)
    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

/// Alert category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Accuracy fell strictly below the configured threshold
    #[serde(rename = "accuracyThreshold")]
    AccuracyThreshold,
}

impl AlertKind {
    /// Wire tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::AccuracyThreshold => "accuracyThreshold",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raised alert. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub model_name: String,
    pub notification_channel: String,
}

impl Alert {
    /// Accuracy threshold alert for the given model
    pub fn accuracy_threshold(config: &MonitorConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: AlertKind::AccuracyThreshold,
            message: format!("Model {} accuracy below threshold", config.model_name),
            timestamp: Utc::now(),
            model_name: config.model_name.clone(),
            notification_channel: config.notification_channel.clone(),
        }
    }
}
