//! Proportional sub-period generation.
//!
//! child duration = (child_full_period / total_period) * parent_duration

use super::types::{BhuktiPeriod, DashaPeriod};
use crate::graha::Graha;

/// Snap the last child's end_jd to the parent's end_jd to absorb floating-point drift.
pub fn snap_last_child_end(children: &mut [BhuktiPeriod], parent_end_jd: f64) {
    if let Some(last) = children.last_mut() {
        last.end_jd = parent_end_jd;
    }
}

/// Rotate a cyclic `(lord, full_years)` sequence so it starts at `first`.
///
/// Falls back to the unrotated sequence if `first` is not present.
pub fn build_cyclic_sequence(sequence: &[(Graha, f64)], first: Graha) -> Vec<(Graha, f64)> {
    let n = sequence.len();
    let start = sequence.iter().position(|(g, _)| *g == first).unwrap_or(0);
    (0..n).map(|i| sequence[(start + i) % n]).collect()
}

/// Generate proportional children for a parent period.
///
/// `sequence`: ordered lords with their full periods, already rotated.
/// `total_period`: sum of all sequence periods (same unit as the sequence).
pub fn proportional_children(
    parent: &DashaPeriod,
    sequence: &[(Graha, f64)],
    total_period: f64,
) -> Vec<BhuktiPeriod> {
    let parent_duration = parent.end_jd - parent.start_jd;
    let mut children = Vec::with_capacity(sequence.len());
    let mut cursor = parent.start_jd;

    for &(lord, full_period) in sequence {
        let end = cursor + full_period / total_period * parent_duration;
        children.push(BhuktiPeriod {
            lord,
            start_jd: cursor,
            end_jd: end,
        });
        cursor = end;
    }

    snap_last_child_end(&mut children, parent.end_jd);
    children
}
