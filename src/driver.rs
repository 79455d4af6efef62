use std::path::Path;

use tracing::debug;

use crate::{
    schedule::EventSchedule,
    time::{Delta, Time},
    units::Nanosecs,
};

/// Settings for the driving loop.
#[derive(
    Debug, Default, Clone, Copy, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize,
)]
pub struct Config {
    /// Nothing scheduled after this point is fired. `None` runs until the schedule is drained.
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub timeout: Option<Nanosecs>,
}

/// What a call to [`run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    /// The number of distinct timestamps fired.
    pub steps: u64,
    /// The number of callbacks fired.
    pub events: u64,
    /// The clock when the run stopped.
    pub end: Time,
    /// How far the clock moved during the run.
    pub elapsed: Delta,
    /// Whether the schedule was empty when the run stopped.
    pub drained: bool,
}

/// Repeatedly advances `schedule` until it is drained or the next pending timestamp lies past the
/// configured timeout.
pub fn run(schedule: &mut EventSchedule<Time>, cfg: &Config) -> Summary {
    let horizon = cfg.timeout.map_or(Time::MAX, Nanosecs::into_time);
    let start = schedule.current_time();
    debug!(
        now = %start,
        pending = schedule.len(),
        horizon = %horizon,
        "starting run"
    );

    let (mut steps, mut events) = (0, 0);
    while !schedule.is_empty() && !past_horizon(schedule, horizon) {
        events += schedule.advance_and_fire() as u64;
        steps += 1;
    }

    let end = schedule.current_time();
    let summary = Summary {
        steps,
        events,
        end,
        // The clock never moves backward
        elapsed: end.since(start).unwrap_or_default(),
        drained: schedule.is_empty(),
    };
    debug!(?summary, "run finished");
    summary
}

fn past_horizon(schedule: &EventSchedule<Time>, horizon: Time) -> bool {
    schedule.peek_time().is_some_and(|next| next > horizon)
}

pub fn read_config(path: impl AsRef<Path>) -> Result<Config, Error> {
    let s = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&s)?)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serde error")]
    Serde(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}
