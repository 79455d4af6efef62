pub mod driver;
pub mod schedule;
pub mod time;
pub mod units;

pub use driver::{Config, Summary};
pub use schedule::{
    bucket::{Callback, TimeBucket},
    EventSchedule, ScheduleError,
};
