use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notify_rust::Notification;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use crate::error::ScheduleError;
use crate::scheduler::{
    NotificationSink, PermissionProvider, ReminderContent, ReminderId, Repeat,
};

const APP_NAME: &str = "water-tracker";
const HOUR: Duration = Duration::from_secs(60 * 60);

/// Permission probe for the desktop notification server.
pub struct DesktopPermissions;

#[async_trait]
impl PermissionProvider for DesktopPermissions {
    async fn request_notification_permission(&self) -> bool {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            match notify_rust::get_capabilities() {
                Ok(capabilities) => {
                    trace!(?capabilities, "notification server reachable");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "notification server not reachable");
                    false
                }
            }
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            // The macOS and Windows backends have no grant step to await.
            true
        }
    }
}

/// Delivers reminders as desktop notifications.
///
/// Each scheduled reminder is a timer task that sleeps until its instant,
/// shows the notification and repeats hourly. Cancelling aborts every
/// outstanding timer.
#[derive(Default)]
pub struct DesktopNotifier {
    timers: Mutex<Vec<JoinHandle<()>>>,
    next_id: AtomicU64,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationSink for DesktopNotifier {
    async fn cancel_all(&self) -> Result<(), ScheduleError> {
        let mut timers = self.timers.lock().await;
        trace!(count = timers.len(), "cancelling scheduled reminders");
        for timer in timers.drain(..) {
            timer.abort();
        }
        Ok(())
    }

    async fn schedule_at(
        &self,
        at: DateTime<Utc>,
        content: &ReminderContent,
        repeat: Repeat,
    ) -> Result<ReminderId, ScheduleError> {
        let id = ReminderId(self.next_id.fetch_add(1, Ordering::Relaxed));
        // An instant already in the past fires immediately.
        let delay = (at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        trace!(%id, %at, ?delay, "arming reminder timer");

        let content = content.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            loop {
                show(&content);
                match repeat {
                    Repeat::Hourly => tokio::time::sleep(HOUR).await,
                }
            }
        });
        self.timers.lock().await.push(timer);

        Ok(id)
    }
}

fn show(content: &ReminderContent) {
    let shown = Notification::new()
        .appname(APP_NAME)
        .summary(&content.title)
        .body(&content.body)
        .show();

    if let Err(e) = shown {
        warn!(error = %e, "unable to show drink notification");
    }
}
