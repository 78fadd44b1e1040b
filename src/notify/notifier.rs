use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::dom::{AlertsContainer, Toolkit};
use crate::notify::alert::{AlertId, AlertNotification, Severity};
use crate::state::lock;

/// Default auto-dismiss delay for alerts.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

type PendingTimers = Arc<Mutex<HashMap<AlertId, AbortHandle>>>;

/// Appends alerts to the container and closes them after a fixed delay.
///
/// Each alert keeps the abort handle of its own timer, so a user dismissal
/// cancels the pending close instead of letting it fire on a removed node.
/// Must be used from within a tokio runtime.
pub struct Notifier {
    container:     Option<Arc<dyn AlertsContainer>>,
    toolkit:       Arc<dyn Toolkit>,
    dismiss_after: Duration,
    next_id:       AtomicU64,
    pending:       PendingTimers,
}

impl Notifier {
    pub fn new(
        container: Option<Arc<dyn AlertsContainer>>,
        toolkit: Arc<dyn Toolkit>,
        dismiss_after: Duration,
    ) -> Self {
        Notifier {
            container,
            toolkit,
            dismiss_after,
            next_id: AtomicU64::new(1),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Shows an alert. Without an alerts container the message is dropped
    /// and `None` is returned.
    pub fn show(&self, text: &str, severity: Severity) -> Option<AlertId> {
        let container = self.container.as_ref()?;

        let id = AlertId(self.next_id.fetch_add(1, Ordering::Relaxed));
        container.append(&AlertNotification::new(id, text, severity));

        let deadline = Instant::now() + self.dismiss_after;
        let toolkit  = self.toolkit.clone();
        let pending  = self.pending.clone();

        // Held across the spawn so the timer cannot fire before it is registered.
        let mut timers = lock(&self.pending);
        let timer = tokio::spawn(async move {
            sleep_until(deadline).await;
            lock(&pending).remove(&id);
            debug!(%id, "auto-dismissing alert");
            toolkit.close_alert(id);
        });
        timers.insert(id, timer.abort_handle());

        Some(id)
    }

    /// User dismissal: cancels the timer and closes the alert.
    ///
    /// Returns `false` if the alert had already been closed.
    pub fn dismiss(&self, id: AlertId) -> bool {
        let Some(timer) = lock(&self.pending).remove(&id) else {
            return false;
        };
        timer.abort();
        self.toolkit.close_alert(id);
        true
    }

    /// Number of alerts whose auto-dismiss has not fired yet.
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        for (_, timer) in lock(&self.pending).drain() {
            timer.abort();
        }
    }
}
