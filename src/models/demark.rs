//! DeMark-style sequential exhaustion counts
//!
//! Two run-length counters over a 4-bar-lagged close comparison, plus a
//! backward "value at last reset" lookup that rebases each counter to its
//! most recent reset. The four output flags are evaluated at the final bar
//! only and match the 9/13 thresholds exactly (not at-least).
//!
//! Index handling is the subtle part: counters start at index 4, the reset
//! lookup never inspects index 0, and an off-by-one in either direction
//! shifts which bar completes a count.

use crate::constants::{COMPARISON_LAG, MIN_SERIES_LEN, NINE_COUNT, THIRTEEN_COUNT};
use crate::models::DmSignals;

/// Value of `arr` at the most recent reset strictly before `idx`.
///
/// Scans backward from `idx - 1` for the first position where the counter
/// dropped (`arr[j] < arr[j - 1]`, typically a reset to 0) and returns the
/// counter value there. Returns 0 when no drop exists before index 1.
fn valuewhen_reset(arr: &[i32], idx: usize) -> i32 {
    let mut j = idx.saturating_sub(1);
    while j >= 1 {
        if arr[j] < arr[j - 1] {
            return arr[j];
        }
        j -= 1;
    }
    0
}

/// Compute the four exhaustion flags for the last bar of a close series.
///
/// Pure function of the input slice. Series shorter than
/// [`MIN_SERIES_LEN`] bars yield an all-false result (insufficient
/// history is a degenerate outcome, not an error).
///
/// Counter semantics, for `i` from 4 to the end:
/// - `td[i] = td[i-1] + 1` when `closes[i] > closes[i-4]`, else 0
/// - `ts[i] = ts[i-1] + 1` when `closes[i] < closes[i-4]`, else 0
///
/// Equality resets both counters: a flat close counts as neither up nor
/// down. The flags compare the reset-rebased counts at the final index
/// against exactly 9 and exactly 13.
pub fn compute_dm_signals(closes: &[f64]) -> DmSignals {
    let length = closes.len();
    if length < MIN_SERIES_LEN {
        return DmSignals::default();
    }

    let mut td = vec![0i32; length];
    let mut ts = vec![0i32; length];

    for i in COMPARISON_LAG..length {
        td[i] = if closes[i] > closes[i - COMPARISON_LAG] {
            td[i - 1] + 1
        } else {
            0
        };
        ts[i] = if closes[i] < closes[i - COMPARISON_LAG] {
            ts[i - 1] + 1
        } else {
            0
        };
    }

    let last = length - 1;
    let td_up = td[last] - valuewhen_reset(&td, last);
    let td_dn = ts[last] - valuewhen_reset(&ts, last);

    DmSignals {
        nine_top: td_up == NINE_COUNT,
        thirteen_top: td_up == THIRTEEN_COUNT,
        nine_bot: td_dn == NINE_COUNT,
        thirteen_bot: td_dn == THIRTEEN_COUNT,
    }
}

/// Up-count since the last reset, at the final bar.
///
/// Exposed for diagnostics and tests; `compute_dm_signals` is the
/// production entry point.
pub fn final_up_count(closes: &[f64]) -> i32 {
    run_since_reset(closes, true)
}

/// Down-count since the last reset, at the final bar
pub fn final_down_count(closes: &[f64]) -> i32 {
    run_since_reset(closes, false)
}

fn run_since_reset(closes: &[f64], up: bool) -> i32 {
    let length = closes.len();
    if length < MIN_SERIES_LEN {
        return 0;
    }

    let mut counter = vec![0i32; length];
    for i in COMPARISON_LAG..length {
        let qualifies = if up {
            closes[i] > closes[i - COMPARISON_LAG]
        } else {
            closes[i] < closes[i - COMPARISON_LAG]
        };
        counter[i] = if qualifies { counter[i - 1] + 1 } else { 0 };
    }

    let last = length - 1;
    counter[last] - valuewhen_reset(&counter, last)
}
