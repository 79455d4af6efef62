use crate::time::{Delta, Time};

macro_rules! unit {
    ($name: ident) => {
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            PartialOrd,
            Ord,
            PartialEq,
            Eq,
            Hash,
            derive_more::Add,
            derive_more::Sub,
            derive_more::AddAssign,
            derive_more::SubAssign,
            derive_more::Display,
            derive_more::FromStr,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            pub const ZERO: $name = Self::new(0);
            pub const ONE: $name = Self::new(1);
            pub const MAX: $name = Self::new(u64::MAX);

            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn into_u64(self) -> u64 {
                self.0
            }
        }
    };
}

unit!(Nanosecs);
unit!(Microsecs);
unit!(Millisecs);
unit!(Secs);

// Widen before scaling: a `u64` count of a coarse unit can exceed `u64` nanoseconds.
macro_rules! into_clock {
    ($name: ident, $nanos: expr) => {
        impl $name {
            pub const NANOS: u128 = $nanos;

            pub const fn into_time(self) -> Time {
                Time::new(self.0 as u128 * Self::NANOS)
            }

            pub const fn into_delta(self) -> Delta {
                Delta::new(self.0 as u128 * Self::NANOS)
            }
        }

        impl From<$name> for Time {
            fn from(val: $name) -> Self {
                val.into_time()
            }
        }

        impl From<$name> for Delta {
            fn from(val: $name) -> Self {
                val.into_delta()
            }
        }
    };
}

into_clock!(Nanosecs, 1);
into_clock!(Microsecs, 1_000);
into_clock!(Millisecs, 1_000_000);
into_clock!(Secs, 1_000_000_000);
