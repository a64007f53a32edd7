//! Core domain logic for the game session tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Transition detection: turning presence snapshot pairs into session events
//! - The log line wire format: the system's only persistence boundary
//! - Reconstruction: replaying a day's log lines into ranked play sessions
//! - Reporting: windows, durations, and the published table
//! - Scheduling: daily trigger fire-time arithmetic
//!
//! Everything here is synchronous and I/O-free; the gateway crate owns the
//! collaborators that feed and drain it.

pub mod logline;
pub mod presence;
pub mod reconstruct;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod types;

pub use logline::{ALARM, parse_line};
pub use presence::{
    Activity, ActivityKind, PresenceSnapshot, SessionAction, SessionEvent, Status,
    detect_transition,
};
pub use reconstruct::{PlaySession, SessionTable, replay};
pub use report::{DailyReport, format_play_time, reporting_window};
pub use roster::LastOnline;
pub use schedule::{DailyTrigger, reminder_trigger, stats_trigger};
pub use types::{ChannelId, SubjectId, ValidationError};
