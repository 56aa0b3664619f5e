//! Periodic threshold checks

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::AppState;

/// Spawn a task that runs `check_thresholds` every `period`.
///
/// Raised alerts are logged with their notification channel; nothing is
/// delivered to the channel itself.
pub fn spawn_threshold_checker(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    info!("Starting threshold checker every {:?}", period);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let raised = state.registry.check_thresholds();
            debug!("Scheduled threshold check raised {} alert(s)", raised.len());

            for alert in &raised {
                warn!(
                    model = %alert.model_name,
                    channel = %alert.notification_channel,
                    kind = %alert.kind,
                    "{}",
                    alert.message
                );
            }
        }
    })
}
