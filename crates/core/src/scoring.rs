//! Scoring module - flat per-clear points table

use crate::types::{EXTENDED_CLEAR_POINTS_PER_LINE, LINE_SCORES};

/// Points for clearing `lines` rows with one lock.
///
/// 1-4 rows read [`LINE_SCORES`]; five or more score 200 per row.
pub fn line_clear_points(lines: u32) -> u32 {
    match lines {
        0..=4 => LINE_SCORES[lines as usize],
        n => n.saturating_mul(EXTENDED_CLEAR_POINTS_PER_LINE),
    }
}
