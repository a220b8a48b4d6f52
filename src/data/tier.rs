use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RatingTier – fixed rating buckets
// ---------------------------------------------------------------------------

/// One of five fixed buckets on the rating axis, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RatingTier {
    Masterpiece,
    Excellent,
    Great,
    Good,
    Average,
}

/// Boundaries of a tier: `[lower, upper)`, or `[lower, upper]` when
/// `upper_inclusive` is set.
#[derive(Debug, Clone, Copy)]
pub struct TierBounds {
    pub tier: RatingTier,
    pub lower: f64,
    pub upper: f64,
    pub upper_inclusive: bool,
}

impl TierBounds {
    const fn new(tier: RatingTier, lower: f64, upper: f64, upper_inclusive: bool) -> Self {
        TierBounds {
            tier,
            lower,
            upper,
            upper_inclusive,
        }
    }

    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.lower
            && (rating < self.upper || (self.upper_inclusive && rating == self.upper))
    }
}

/// Ordered lookup table, highest tier first. Adjacent rows share a bound.
pub const TIERS: [TierBounds; 5] = [
    TierBounds::new(RatingTier::Masterpiece, 9.0, 10.0, true),
    TierBounds::new(RatingTier::Excellent, 8.0, 9.0, false),
    TierBounds::new(RatingTier::Great, 7.0, 8.0, false),
    TierBounds::new(RatingTier::Good, 6.0, 7.0, false),
    TierBounds::new(RatingTier::Average, 0.0, 6.0, false),
];

impl RatingTier {
    /// All tiers in display order.
    pub const ALL: [RatingTier; 5] = [
        RatingTier::Masterpiece,
        RatingTier::Excellent,
        RatingTier::Great,
        RatingTier::Good,
        RatingTier::Average,
    ];

    /// Exact table lookup; `None` outside `[0, 10]` (or for NaN).
    pub fn lookup(rating: f64) -> Option<RatingTier> {
        TIERS.iter().find(|b| b.contains(rating)).map(|b| b.tier)
    }

    /// Total classification. Cleaned records always land in the table;
    /// anything above the scale saturates to the top tier, the rest to the
    /// bottom one.
    pub fn classify(rating: f64) -> RatingTier {
        Self::lookup(rating).unwrap_or(if rating > 10.0 {
            RatingTier::Masterpiece
        } else {
            RatingTier::Average
        })
    }

    pub fn bounds(self) -> TierBounds {
        TIERS[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingTier::Masterpiece => "Masterpiece",
            RatingTier::Excellent => "Excellent",
            RatingTier::Great => "Great",
            RatingTier::Good => "Good",
            RatingTier::Average => "Average",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bounds();
        let close = if b.upper_inclusive { ']' } else { ')' };
        write!(f, "{} [{:.1}, {:.1}{close}", self.label(), b.lower, b.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_closed_lower_open_upper() {
        assert_eq!(RatingTier::classify(10.0), RatingTier::Masterpiece);
        assert_eq!(RatingTier::classify(9.0), RatingTier::Masterpiece);
        assert_eq!(RatingTier::classify(8.999), RatingTier::Excellent);
        assert_eq!(RatingTier::classify(8.0), RatingTier::Excellent);
        assert_eq!(RatingTier::classify(7.99), RatingTier::Great);
        assert_eq!(RatingTier::classify(7.0), RatingTier::Great);
        assert_eq!(RatingTier::classify(6.5), RatingTier::Good);
        assert_eq!(RatingTier::classify(6.0), RatingTier::Good);
        assert_eq!(RatingTier::classify(5.99), RatingTier::Average);
        assert_eq!(RatingTier::classify(0.0), RatingTier::Average);
    }

    #[test]
    fn table_is_an_exhaustive_partition() {
        // Step through [0, 10] in hundredths: exactly one tier claims each.
        for i in 0..=1000 {
            let rating = i as f64 / 100.0;
            let hits = TIERS.iter().filter(|b| b.contains(rating)).count();
            assert_eq!(hits, 1, "rating {rating} matched {hits} tiers");
        }
    }

    #[test]
    fn lookup_rejects_off_scale_ratings() {
        assert_eq!(RatingTier::lookup(-0.1), None);
        assert_eq!(RatingTier::lookup(10.1), None);
        assert_eq!(RatingTier::lookup(f64::NAN), None);
    }

    #[test]
    fn bounds_follow_declaration_order() {
        for tier in RatingTier::ALL {
            assert_eq!(tier.bounds().tier, tier);
        }
        assert_eq!(RatingTier::Great.to_string(), "Great [7.0, 8.0)");
        assert_eq!(RatingTier::Masterpiece.to_string(), "Masterpiece [9.0, 10.0]");
    }
}
