//! Shared angle helpers.

pub use jathaka_time::normalize_360;

/// Signed shortest arc from `from` to `to`, in (-180, 180].
pub fn signed_arc(from: f64, to: f64) -> f64 {
    let d = normalize_360(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_both_ways() {
        assert!((normalize_360(360.0)).abs() < 1e-15);
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_range() {
        let r = normalize_360(-1e-17);
        assert!((0.0..360.0).contains(&r), "r = {r}");
    }

    #[test]
    fn signed_arc_takes_short_way() {
        assert!((signed_arc(350.0, 10.0) - 20.0).abs() < 1e-12);
        assert!((signed_arc(10.0, 350.0) + 20.0).abs() < 1e-12);
        assert!((signed_arc(0.0, 180.0) - 180.0).abs() < 1e-12);
    }
}
