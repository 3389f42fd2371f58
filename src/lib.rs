//! # water-tracker
//!
//! Session-local water-intake tracking with hourly drink reminders.
//!
//! ## Key components
//!
//! - [`IntakeState`]: pure value type holding the session's intake and
//!   daily goal, with the segment-opacity math for the 8-segment progress
//!   bar
//! - [`ReminderScheduler`]: full cancel-then-reschedule passes over the
//!   next 24 hours of top-of-hour reminder slots, driven through the
//!   [`PermissionProvider`] and [`NotificationSink`] collaborator traits
//! - [`App`]: single-owner event loop state for the tracker screen,
//!   emitting transient [`Feedback`] for the render surface
//! - [`DesktopNotifier`] / [`DesktopPermissions`]: the desktop-host
//!   collaborators, delivering reminders as desktop notifications from
//!   hourly timer tasks
//!
//! Nothing is persisted: state lives for the process lifetime and the
//! reminder schedule is rebuilt from scratch on every pass.

pub mod app;
pub mod error;
pub mod scheduler;
pub mod state;
pub mod structs;
pub mod tasks;

pub use app::{App, AppEvent, Feedback};
pub use error::ScheduleError;
pub use scheduler::{
    reminder_times, NotificationSink, PermissionProvider, Repeat, ReminderContent, ReminderId,
    ReminderScheduler, REMINDER_BODY, REMINDER_TITLE,
};
pub use state::{IntakeState, DEFAULT_GOAL_ML, PEP_TALKS, SEGMENT_COUNT};
pub use structs::splash_point::SplashPoint;
pub use structs::theme::Theme;
pub use tasks::notification::{DesktopNotifier, DesktopPermissions};
