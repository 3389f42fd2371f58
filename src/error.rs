use thiserror::Error;

/// Failures reported by the notification delivery collaborator.
///
/// None of these are fatal to the session: a failed schedule request is
/// logged and the pass moves on, a failed cancel aborts the pass before
/// anything new is scheduled.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The delivery backend rejected a cancel or schedule request.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
