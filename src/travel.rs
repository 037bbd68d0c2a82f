//! Courier travel times.
//!
//! A [`TravelTimeSource`] hands out one travel time per dispatched order. The
//! dispatcher treats the value as opaque; it only has to sit in
//! `[MIN_TRAVEL_TIME, MAX_TRAVEL_TIME]` seconds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Shortest courier trip, in seconds.
pub const MIN_TRAVEL_TIME: u64 = 3;
/// Longest courier trip, in seconds (inclusive).
pub const MAX_TRAVEL_TIME: u64 = 15;
/// Seed used when the caller asks for a reproducible run without naming one.
pub const DEFAULT_SEED: u64 = 1;

/// Supplies courier travel times in seconds.
pub trait TravelTimeSource: Send {
    fn next_travel_time(&mut self) -> u64;
}

/// Uniform travel times drawn from a seeded generator.
pub struct SeededTravelTime {
    rng: StdRng,
}

impl SeededTravelTime {
    /// Same seed, same sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn fixed() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Seeded from OS entropy; sequences differ between runs.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl TravelTimeSource for SeededTravelTime {
    fn next_travel_time(&mut self) -> u64 {
        self.rng.gen_range(MIN_TRAVEL_TIME..=MAX_TRAVEL_TIME)
    }
}

/// Replays a fixed list of travel times, wrapping around at the end.
///
/// Useful wherever a run must reproduce an exact timeline.
#[derive(Debug, Clone)]
pub struct ScriptedTravelTime {
    script: VecDeque<u64>,
}

impl ScriptedTravelTime {
    pub fn new(times: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: times.into_iter().collect(),
        }
    }
}

impl TravelTimeSource for ScriptedTravelTime {
    fn next_travel_time(&mut self) -> u64 {
        match self.script.pop_front() {
            Some(time) => {
                self.script.push_back(time);
                time
            }
            // An empty script degenerates to the shortest trip.
            None => MIN_TRAVEL_TIME,
        }
    }
}
