use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use tokio::sync::{Mutex, Notify};

use water_tracker::{
    reminder_times, NotificationSink, PermissionProvider, ReminderContent, ReminderId,
    ReminderScheduler, Repeat, ScheduleError,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    CancelAll,
    ScheduleAt(DateTime<Utc>),
}

struct FixedPermission(bool);

#[async_trait]
impl PermissionProvider for FixedPermission {
    async fn request_notification_permission(&self) -> bool {
        self.0
    }
}

/// Records every collaborator call. Optionally fails every n-th schedule
/// request or the cancel request, and can hold a pass open inside
/// `cancel_all` via the entered/release pair.
#[derive(Clone, Default)]
struct RecordingDelivery {
    calls: Arc<Mutex<Vec<Call>>>,
    next_id: Arc<AtomicU64>,
    fail_every: usize,
    fail_cancel: bool,
    entered: Option<Arc<Notify>>,
    release: Option<Arc<Notify>>,
}

impl RecordingDelivery {
    async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    async fn cancels(&self) -> usize {
        self.calls()
            .await
            .iter()
            .filter(|call| **call == Call::CancelAll)
            .count()
    }

    async fn schedules(&self) -> usize {
        self.calls()
            .await
            .iter()
            .filter(|call| matches!(call, Call::ScheduleAt(_)))
            .count()
    }
}

#[async_trait]
impl NotificationSink for RecordingDelivery {
    async fn cancel_all(&self) -> Result<(), ScheduleError> {
        if let Some(entered) = &self.entered {
            entered.notify_one();
        }
        if let Some(release) = &self.release {
            release.notified().await;
        }

        self.calls.lock().await.push(Call::CancelAll);
        if self.fail_cancel {
            return Err(ScheduleError::Delivery("cancel rejected".into()));
        }
        Ok(())
    }

    async fn schedule_at(
        &self,
        at: DateTime<Utc>,
        _content: &ReminderContent,
        _repeat: Repeat,
    ) -> Result<ReminderId, ScheduleError> {
        let mut calls = self.calls.lock().await;
        let attempt = calls
            .iter()
            .filter(|call| matches!(call, Call::ScheduleAt(_)))
            .count()
            + 1;
        calls.push(Call::ScheduleAt(at));

        if self.fail_every != 0 && attempt % self.fail_every == 0 {
            return Err(ScheduleError::Delivery("schedule rejected".into()));
        }
        Ok(ReminderId(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }
}

#[tokio::test]
async fn granted_pass_cancels_once_then_schedules_every_slot() {
    let delivery = RecordingDelivery::default();
    let scheduler = ReminderScheduler::new(FixedPermission(true), delivery.clone());

    let now = Local::now();
    let expected = reminder_times(now);
    let ids = scheduler.run_pass_at(now).await;

    let calls = delivery.calls().await;
    assert_eq!(calls[0], Call::CancelAll);
    assert_eq!(delivery.cancels().await, 1);
    assert_eq!(calls.len(), expected.len() + 1);
    for (call, at) in calls[1..].iter().zip(&expected) {
        assert_eq!(call, &Call::ScheduleAt(at.with_timezone(&Utc)));
    }
    assert_eq!(ids.len(), expected.len());
}

#[tokio::test]
async fn denied_pass_still_clears_stale_reminders() {
    let delivery = RecordingDelivery::default();
    let scheduler = ReminderScheduler::new(FixedPermission(false), delivery.clone());

    let ids = scheduler.run_pass_at(Local::now()).await;

    assert!(ids.is_empty());
    assert_eq!(delivery.calls().await, vec![Call::CancelAll]);
}

#[tokio::test]
async fn failed_schedules_do_not_abort_the_pass() {
    let delivery = RecordingDelivery {
        fail_every: 3,
        ..Default::default()
    };
    let scheduler = ReminderScheduler::new(FixedPermission(true), delivery.clone());

    let now = Local::now();
    let slots = reminder_times(now).len();
    let ids = scheduler.run_pass_at(now).await;

    // Every slot is still attempted; only the successes return handles.
    assert_eq!(delivery.schedules().await, slots);
    assert_eq!(ids.len(), slots - slots / 3);
}

#[tokio::test]
async fn failed_cancel_aborts_before_anything_is_scheduled() {
    let delivery = RecordingDelivery {
        fail_cancel: true,
        ..Default::default()
    };
    let scheduler = ReminderScheduler::new(FixedPermission(true), delivery.clone());

    let ids = scheduler.run_pass_at(Local::now()).await;

    assert!(ids.is_empty());
    assert_eq!(delivery.schedules().await, 0);
}

#[tokio::test]
async fn overlapping_pass_is_skipped() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let delivery = RecordingDelivery {
        entered: Some(entered.clone()),
        release: Some(release.clone()),
        ..Default::default()
    };
    let scheduler = Arc::new(ReminderScheduler::new(
        FixedPermission(true),
        delivery.clone(),
    ));

    let now = Local::now();
    let background = tokio::spawn({
        let scheduler = scheduler.clone();
        async move { scheduler.run_pass_at(now).await }
    });

    // The first pass holds the in-flight guard inside cancel_all.
    entered.notified().await;
    let overlapping = scheduler.run_pass_at(now).await;
    assert!(overlapping.is_empty());

    release.notify_one();
    let first = background.await.unwrap();
    assert_eq!(first.len(), reminder_times(now).len());
    assert_eq!(delivery.cancels().await, 1);
}
