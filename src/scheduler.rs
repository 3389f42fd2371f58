//! Reminder scheduling over a rolling 24-hour horizon.
//!
//! A pass is always a full replace: cancel everything the previous pass
//! scheduled, then schedule one reminder per upcoming top of hour. The
//! actual delivery is behind [`NotificationSink`] so the desktop backend
//! and the tests plug in the same way.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Timelike, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::ScheduleError;

/// How far ahead a single pass schedules reminders, in hours.
pub const REMINDER_HORIZON_HOURS: i64 = 24;

pub const REMINDER_TITLE: &str = "Drink Water";
pub const REMINDER_BODY: &str = "It's time to drink water!";

/// Opaque handle for one scheduled reminder. Collected for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReminderId(pub u64);

impl std::fmt::Display for ReminderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reminder-{}", self.0)
    }
}

/// Repetition unit attached to a scheduled reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Hourly,
}

/// Title and body of a reminder notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
}

impl Default for ReminderContent {
    fn default() -> Self {
        Self {
            title: REMINDER_TITLE.into(),
            body: REMINDER_BODY.into(),
        }
    }
}

/// Host side that grants or withholds notification permission.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn request_notification_permission(&self) -> bool;
}

/// Host side that delivers scheduled reminders.
///
/// `cancel_all` of a pass completes before its first `schedule_at` is
/// issued; the calls are sequential, never fanned out.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Drop every reminder scheduled by an earlier pass.
    async fn cancel_all(&self) -> Result<(), ScheduleError>;

    /// Deliver `content` at `at`, repeating per `repeat`.
    async fn schedule_at(
        &self,
        at: DateTime<Utc>,
        content: &ReminderContent,
        repeat: Repeat,
    ) -> Result<ReminderId, ScheduleError>;
}

/// Reminder timestamps covering the next 24 hours: every top of hour,
/// starting with the first one strictly after `now`.
pub fn reminder_times<Tz: TimeZone>(now: DateTime<Tz>) -> Vec<DateTime<Tz>> {
    let horizon = now.clone() + Duration::hours(REMINDER_HORIZON_HOURS);
    let Some(mut next) = hour_after(&now) else {
        warn!("no representable top of hour after the current time, skipping");
        return Vec::new();
    };

    let mut times = Vec::new();
    while next < horizon {
        times.push(next.clone());
        next = next + Duration::hours(1);
    }
    times
}

/// The next exact top of hour strictly after `now`.
///
/// `None` when the wall clock has no such time (a DST transition landing
/// on the truncated hour).
fn hour_after<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let truncated = now.with_minute(0)?.with_second(0)?.with_nanosecond(0)?;
    Some(truncated + Duration::hours(1))
}

/// Drives full cancel-then-reschedule passes against the host's
/// notification collaborators.
///
/// At most one pass runs at a time. An overlapping call returns without
/// touching the schedule.
pub struct ReminderScheduler<P, S> {
    permissions: P,
    delivery: S,
    content: ReminderContent,
    in_flight: Mutex<()>,
}

impl<P: PermissionProvider, S: NotificationSink> ReminderScheduler<P, S> {
    pub fn new(permissions: P, delivery: S) -> Self {
        Self {
            permissions,
            delivery,
            content: ReminderContent::default(),
            in_flight: Mutex::new(()),
        }
    }

    pub fn with_content(mut self, content: ReminderContent) -> Self {
        self.content = content;
        self
    }

    /// Run a pass anchored at the current wall-clock time.
    pub async fn run_pass(&self) -> Vec<ReminderId> {
        self.run_pass_at(Local::now()).await
    }

    /// Run a pass anchored at `now`.
    ///
    /// Stale reminders are cancelled even when permission is withheld;
    /// nothing new is scheduled in that case. An individual schedule
    /// failure is logged and the remaining timestamps are still attempted.
    #[instrument(skip(self))]
    pub async fn run_pass_at(&self, now: DateTime<Local>) -> Vec<ReminderId> {
        let Ok(_pass) = self.in_flight.try_lock() else {
            debug!("a reminder pass is already in flight, skipping");
            return Vec::new();
        };

        let granted = self.permissions.request_notification_permission().await;

        if let Err(e) = self.delivery.cancel_all().await {
            warn!(error = %e, "unable to cancel scheduled reminders, leaving the schedule untouched");
            return Vec::new();
        }

        if !granted {
            warn!("notification permission not granted, skipping reminder scheduling");
            return Vec::new();
        }

        let mut ids = Vec::new();
        for at in reminder_times(now) {
            match self
                .delivery
                .schedule_at(at.with_timezone(&Utc), &self.content, Repeat::Hourly)
                .await
            {
                Ok(id) => ids.push(id),
                Err(e) => warn!(error = %e, at = %at, "unable to schedule reminder"),
            }
        }

        info!(count = ids.len(), ids = ?ids, "scheduled drink reminders");
        ids
    }
}
