pub mod bucket;

use std::{collections::VecDeque, fmt};

use delegate::delegate;
use tracing::trace;

use crate::time::{Delta, Time};

use self::bucket::{Callback, TimeBucket};

/// A time-ordered queue of pending callbacks plus the simulation clock.
///
/// Callbacks that share a timestamp are coalesced into one [`TimeBucket`] and fire together, in
/// the order they were enqueued. Buckets are kept sorted ascending and no two share a timestamp.
/// The clock only moves when [`advance_and_fire`](Self::advance_and_fire) fires the earliest
/// bucket.
///
/// Dropping a schedule with pending buckets discards their callbacks unrun.
#[derive(Debug)]
pub struct EventSchedule<T = Time> {
    clock: T,
    buckets: VecDeque<TimeBucket<T>>,
}

impl<T: Ord + Copy + Default + fmt::Debug> EventSchedule<T> {
    /// Creates an empty schedule with the clock at `T::default()`.
    pub fn new() -> Self {
        Self::starting_at(T::default())
    }
}

impl<T: Ord + Copy + Default + fmt::Debug> Default for EventSchedule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Copy + fmt::Debug> EventSchedule<T> {
    /// Creates an empty schedule with the clock at `start`.
    pub fn starting_at(start: T) -> Self {
        Self {
            clock: start,
            buckets: VecDeque::new(),
        }
    }

    delegate! {
        to self.buckets {
            /// Returns `true` if nothing is left to fire.
            pub fn is_empty(&self) -> bool;

            /// The number of distinct pending timestamps.
            pub fn len(&self) -> usize;
        }
    }

    /// The timestamp of the most recently fired bucket, or the starting value.
    pub fn current_time(&self) -> T {
        self.clock
    }

    /// The earliest pending timestamp, if any.
    pub fn peek_time(&self) -> Option<T> {
        self.buckets.front().map(TimeBucket::timestamp)
    }

    /// The total number of pending callbacks across all timestamps.
    pub fn pending_events(&self) -> usize {
        self.buckets.iter().map(TimeBucket::len).sum()
    }

    /// Pending timestamps in firing order.
    pub fn timestamps(&self) -> impl Iterator<Item = T> + '_ {
        self.buckets.iter().map(TimeBucket::timestamp)
    }

    /// Schedules `callback` to fire at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not strictly after the current time. Use
    /// [`try_enqueue`](Self::try_enqueue) to get an error instead.
    pub fn enqueue<F>(&mut self, at: T, callback: F)
    where
        F: FnOnce(&mut EventSchedule<T>) + 'static,
    {
        assert!(
            at > self.clock,
            "cannot schedule an event at {:?}: the clock is already at {:?}",
            at,
            self.clock
        );
        self.insert(at, Box::new(callback));
    }

    /// Like [`enqueue`](Self::enqueue), but rejects a timestamp in the past (or at the current
    /// time) with an error.
    pub fn try_enqueue<F>(&mut self, at: T, callback: F) -> Result<(), ScheduleError<T>>
    where
        F: FnOnce(&mut EventSchedule<T>) + 'static,
    {
        if at <= self.clock {
            return Err(ScheduleError::NotInFuture {
                at,
                now: self.clock,
            });
        }
        self.insert(at, Box::new(callback));
        Ok(())
    }

    fn insert(&mut self, at: T, callback: Callback<T>) {
        // Buckets are sorted and unique, so a hit means coalescing and a miss gives the slot just
        // before the first later bucket (or the end).
        match self.buckets.binary_search_by(|b| b.compare_timestamp(&at)) {
            Ok(idx) => {
                let bucket = &mut self.buckets[idx];
                bucket.push(callback);
                trace!(at = ?at, now = ?self.clock, nr_callbacks = bucket.len(), "coalesced event");
            }
            Err(idx) => {
                let mut bucket = TimeBucket::new(at);
                bucket.push(callback);
                self.buckets.insert(idx, bucket);
                trace!(at = ?at, now = ?self.clock, nr_buckets = self.buckets.len(), "new bucket");
            }
        }
    }

    /// Advances the clock to the earliest pending timestamp and fires every callback scheduled
    /// there, in enqueue order. Callbacks may enqueue more events; those must land strictly after
    /// the new clock value. Returns the number of callbacks fired.
    ///
    /// # Panics
    ///
    /// Panics if the schedule is empty. Check [`is_empty`](Self::is_empty) first or use
    /// [`try_advance_and_fire`](Self::try_advance_and_fire).
    pub fn advance_and_fire(&mut self) -> usize {
        let bucket = self
            .buckets
            .pop_front()
            .expect("advance_and_fire called on an empty schedule");
        self.fire(bucket)
    }

    /// Like [`advance_and_fire`](Self::advance_and_fire), but returns an error on an empty
    /// schedule.
    pub fn try_advance_and_fire(&mut self) -> Result<usize, ScheduleError<T>> {
        let bucket = self.buckets.pop_front().ok_or(ScheduleError::Empty)?;
        Ok(self.fire(bucket))
    }

    fn fire(&mut self, bucket: TimeBucket<T>) -> usize {
        let time = bucket.timestamp();
        debug_assert!(
            self.clock < time,
            "pending bucket at {:?} is not after the clock at {:?}",
            time,
            self.clock
        );
        self.clock = time;
        trace!(now = ?time, nr_callbacks = bucket.len(), "firing bucket");
        bucket.fire_all(self)
    }
}

impl<T: Ord + Copy + fmt::Debug + fmt::Display> EventSchedule<T> {
    /// Renders the clock and every pending timestamp for debugging.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl EventSchedule<Time> {
    /// Schedules `callback` to fire `delta` after the current time.
    ///
    /// # Panics
    ///
    /// Panics if `delta` is zero.
    pub fn enqueue_after<F>(&mut self, delta: impl Into<Delta>, callback: F)
    where
        F: FnOnce(&mut EventSchedule<Time>) + 'static,
    {
        let at = self.clock + delta.into();
        self.enqueue(at, callback);
    }
}

impl<T: Ord + Copy + fmt::Display> fmt::Display for EventSchedule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== event schedule =====")?;
        writeln!(f, "now: {}", self.clock)?;
        for bucket in &self.buckets {
            writeln!(f, "  @ {}: {} callback(s)", bucket.timestamp(), bucket.len())?;
        }
        write!(f, "==========================")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError<T> {
    #[error("cannot schedule an event at {at:?}: the clock is already at {now:?}")]
    NotInFuture { at: T, now: T },

    #[error("no pending events")]
    Empty,
}
