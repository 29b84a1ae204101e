//! Mob selection policy
//!
//! Scheduled occasions mix a time-bucketed rotation with random jitter so that
//! instances sharing a posting interval roughly rotate together without posting
//! identical sequences. This is best-effort variety, not uniform coverage.

use rand::Rng;

use crate::domain::entities::Roster;
use crate::domain::value_objects::SelectionResult;

/// Chance that a scheduled occasion picks a random variant poster
pub const DEFAULT_VARIANT_PROBABILITY: f64 = 0.3;

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mob: '{query}'")]
pub struct SelectionNotFound {
    pub query: String,
}

/// Chooses a roster entry for each posting occasion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    variant_probability: f64,
}

impl Selector {
    pub fn new(variant_probability: f64) -> Self {
        let variant_probability = if variant_probability.is_nan() {
            DEFAULT_VARIANT_PROBABILITY
        } else {
            variant_probability.clamp(0.0, 1.0)
        };
        Self {
            variant_probability,
        }
    }

    pub fn variant_probability(&self) -> f64 {
        self.variant_probability
    }

    /// Pick a mob for a scheduled or unnamed on-demand occasion
    pub fn pick_for_occasion(&self, roster: &Roster, interval_hours: f64) -> SelectionResult {
        let now = chrono::Utc::now().timestamp();
        self.pick_for_occasion_at(roster, interval_hours, now, &mut rand::thread_rng())
    }

    /// Same as [`Selector::pick_for_occasion`] with an explicit clock and RNG
    pub fn pick_for_occasion_at<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        interval_hours: f64,
        now_unix_secs: i64,
        rng: &mut R,
    ) -> SelectionResult {
        let len = roster.len();

        if rng.gen::<f64>() < self.variant_probability {
            let index = rng.gen_range(0..len);
            return SelectionResult::new(roster.entries()[index].clone(), true);
        }

        let bucket = time_bucket(now_unix_secs, interval_hours, len);
        let index = (bucket + rng.gen_range(0..len)) % len;
        SelectionResult::new(roster.entries()[index].clone(), false)
    }

    /// Pick the mob a caller asked for by name or id; never a variant
    pub fn pick_by_override(
        &self,
        roster: &Roster,
        name_or_id: &str,
    ) -> Result<SelectionResult, SelectionNotFound> {
        roster
            .find_by_name_or_id(name_or_id)
            .map(|entry| SelectionResult::new(entry.clone(), false))
            .ok_or_else(|| SelectionNotFound {
                query: name_or_id.trim().to_string(),
            })
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(DEFAULT_VARIANT_PROBABILITY)
    }
}

/// `floor(now / interval) mod len`; a degenerate interval maps to bucket 0
fn time_bucket(now_unix_secs: i64, interval_hours: f64, len: usize) -> usize {
    let period_secs = interval_hours * SECONDS_PER_HOUR;
    if !period_secs.is_finite() || period_secs <= 0.0 || now_unix_secs < 0 {
        return 0;
    }
    let elapsed_periods = (now_unix_secs as f64 / period_secs).floor() as u64;
    (elapsed_periods % len as u64) as usize
}
