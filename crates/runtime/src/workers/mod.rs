//! Worker tasks that back the runtime orchestration.
//!
//! A single session worker owns the battle session; every other party talks
//! to it through commands and events.

mod session;

pub(crate) use session::{Collaborators, Command, SessionWorker};
