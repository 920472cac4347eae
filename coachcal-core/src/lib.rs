//! Core of coachcal: a coach's training sessions as calendar events.
//!
//! - `source`: where groups and sessions come from (hosted REST API or a local file)
//! - `fetch` and `translate`: load every group's sessions and turn them into events
//! - `buffer`: hold events until the calendar surface is ready to show them
//! - `feed`: the load / create / delete flows tying those together

pub mod buffer;
pub mod config;
pub mod constants;
pub mod duration;
pub mod error;
pub mod event;
pub mod feed;
pub mod fetch;
pub mod normalize;
pub mod session;
pub mod source;
pub mod translate;

#[cfg(test)]
mod test_support;

pub use buffer::{CalendarSurface, PresentationBuffer, Readiness};
pub use error::{CoachCalError, CoachCalResult};
pub use event::{CalendarEvent, EventMeta};
pub use feed::{CalendarFeed, CreatedSession, LoadReport, SharedBuffer, shared_buffer};
pub use session::{Group, NewSession, RawSession};
