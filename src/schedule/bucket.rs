use std::{cmp::Ordering, fmt};

use smallvec::SmallVec;

use super::EventSchedule;

/// A deferred piece of work. The closure owns whatever argument it was built with and gets the
/// schedule back when it fires, so it can enqueue follow-up events.
pub type Callback<T> = Box<dyn FnOnce(&mut EventSchedule<T>)>;

// Most timestamps will not collect very many callbacks
type CallbackList<T> = SmallVec<[Callback<T>; 4]>;

/// All callbacks scheduled for exactly one timestamp, in the order they were enqueued.
#[derive(derivative::Derivative, derive_new::new)]
#[derivative(Debug(bound = "T: fmt::Debug"))]
pub struct TimeBucket<T> {
    timestamp: T,
    #[new(default)]
    #[derivative(Debug(format_with = "fmt_callbacks"))]
    callbacks: CallbackList<T>,
}

impl<T: Ord + Copy> TimeBucket<T> {
    pub fn timestamp(&self) -> T {
        self.timestamp
    }

    pub fn compare_timestamp(&self, other: &T) -> Ordering {
        self.timestamp.cmp(other)
    }

    pub fn push(&mut self, callback: Callback<T>) {
        self.callbacks.push(callback);
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Runs every callback in insertion order and consumes the bucket. Returns the number of
    /// callbacks that ran. A panicking callback unwinds straight through; the callbacks after it
    /// are dropped unrun.
    pub fn fire_all(self, schedule: &mut EventSchedule<T>) -> usize {
        let nr_callbacks = self.callbacks.len();
        for callback in self.callbacks {
            callback(schedule);
        }
        nr_callbacks
    }
}

fn fmt_callbacks<T>(callbacks: &CallbackList<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{} callback(s)]", callbacks.len())
}
