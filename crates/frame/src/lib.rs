//! Frame scheduling: one locomotion tick and one render per display refresh.
//!
//! # Invariants
//! - While the host is unfocused, frames idle: no tick, no render, but the
//!   clock keeps being sampled so refocus never replays a backlog.
//! - Resize updates camera aspect and renderer size synchronously.
//! - Discrete input is consumed exactly once, by the next frame.

mod clock;
mod scheduler;
mod stage;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{FrameOutcome, FrameScheduler, SchedulerConfig};
pub use stage::Stage;
pub use timer::FrameTimer;

pub fn crate_info() -> &'static str {
    "storehouse-frame v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_crate() {
        assert!(crate_info().contains("frame"));
    }
}
