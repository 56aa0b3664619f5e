//! Monitor Registry Implementation

use crate::config::RegistrySettings;
use crate::model::{Alert, DataDrift, ModelPerformance, MonitorConfig, MonitorRecord};
use crate::threshold::accuracy_breach;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// State guarded by the registry lock
#[derive(Debug, Default)]
struct RegistryState {
    /// Records keyed by model name
    monitors: HashMap<String, MonitorRecord>,
    /// Model names in first-insertion order
    order: Vec<String>,
    /// Raised alerts, append-only
    alerts: Vec<Alert>,
}

/// In-memory registry of model monitors and raised alerts
pub struct MonitorRegistry {
    settings: RegistrySettings,
    state: Mutex<RegistryState>,
}

impl MonitorRegistry {
    /// Create an empty registry
    pub fn new(settings: RegistrySettings) -> Self {
        info!("Creating monitor registry with settings: {:?}", settings);
        Self {
            settings,
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Every mutation is a single insert or push, so a poisoned lock still
    /// holds consistent state.
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a model, replacing any existing record of the same name.
    ///
    /// Returns a snapshot of the record as stored.
    pub fn add_monitor(&self, config: MonitorConfig) -> MonitorRecord {
        let mut state = self.lock();
        let name = config.model_name.clone();
        let record = MonitorRecord::new(config);

        let previous = state.monitors.insert(name.clone(), record.clone());
        if previous.is_some() {
            info!("Monitor replaced: {}", name);
        } else {
            info!("Monitor added: {}", name);
            state.order.push(name);
        }

        metrics::gauge!("model_monitor_monitors").set(state.monitors.len() as f64);
        record
    }

    /// Replace a model's performance snapshot.
    ///
    /// Returns `false` and changes nothing when the model is unknown.
    pub fn update_performance(&self, model_name: &str, performance: ModelPerformance) -> bool {
        let mut state = self.lock();
        match state.monitors.get_mut(model_name) {
            Some(record) => {
                record.performance = Some(performance);
                record.last_updated = Utc::now();
                debug!("Performance updated for {}: {:?}", model_name, performance);
                true
            }
            None => {
                warn!("Performance update ignored: unknown model {}", model_name);
                metrics::counter!("model_monitor_updates_ignored_total").increment(1);
                false
            }
        }
    }

    /// Replace a model's drift snapshot.
    ///
    /// Returns `false` and changes nothing when the model is unknown.
    pub fn detect_data_drift(&self, model_name: &str, data_drift: DataDrift) -> bool {
        let mut state = self.lock();
        match state.monitors.get_mut(model_name) {
            Some(record) => {
                debug!(
                    "Drift updated for {}: {} shifted feature(s)",
                    model_name,
                    data_drift.shifted_features().len()
                );
                record.data_drift = Some(data_drift);
                record.last_updated = Utc::now();
                true
            }
            None => {
                warn!("Drift update ignored: unknown model {}", model_name);
                metrics::counter!("model_monitor_updates_ignored_total").increment(1);
                false
            }
        }
    }

    /// Snapshot of all records in first-insertion order
    pub fn get_monitors(&self) -> Vec<MonitorRecord> {
        let state = self.lock();
        state
            .order
            .iter()
            .filter_map(|name| state.monitors.get(name))
            .cloned()
            .collect()
    }

    /// Snapshot of a single record
    pub fn get_monitor(&self, model_name: &str) -> Option<MonitorRecord> {
        self.lock().monitors.get(model_name).cloned()
    }

    /// All alerts raised so far, oldest first
    pub fn get_alerts(&self) -> Vec<Alert> {
        self.lock().alerts.clone()
    }

    /// Evaluate every monitor's accuracy against its threshold.
    ///
    /// Appends one alert per breaching monitor on every call, with no
    /// deduplication, and returns the alerts raised by this call.
    pub fn check_thresholds(&self) -> Vec<Alert> {
        let mut state = self.lock();
        let state = &mut *state;

        let raised: Vec<Alert> = state
            .order
            .iter()
            .filter_map(|name| state.monitors.get(name))
            .filter_map(|record| {
                accuracy_breach(record, self.settings.unset_performance).map(|accuracy| {
                    warn!(
                        "Accuracy threshold breached for {}: {} < {}",
                        record.model_name(),
                        accuracy,
                        record.config.threshold
                    );
                    Alert::accuracy_threshold(&record.config)
                })
            })
            .collect();

        if !raised.is_empty() {
            metrics::counter!("model_monitor_alerts_raised_total").increment(raised.len() as u64);
            state.alerts.extend(raised.iter().cloned());
        }
        debug!(
            "Threshold check over {} monitor(s) raised {} alert(s)",
            state.order.len(),
            raised.len()
        );

        raised
    }

    /// Number of registered monitors
    pub fn monitor_count(&self) -> usize {
        self.lock().monitors.len()
    }

    /// Number of alerts raised so far
    pub fn alert_count(&self) -> usize {
        self.lock().alerts.len()
    }

    /// Registry settings
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }
}

impl Default for MonitorRegistry {
    fn default() -> Self {
        Self::new(RegistrySettings::default())
    }
}
