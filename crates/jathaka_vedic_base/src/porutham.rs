//! Porutham: ten-rule marriage compatibility from the two Moon placements.
//!
//! Every rule reads only the two Moon nakshatra indices (0-26) and rashi
//! indices (0-11). Two derived distances are shared:
//!
//! ```text
//! count = ((nak2 - nak1) mod 27) + 1      // Dina, Mahendra, Stree Deergha
//! diff  =  (rashi2 - rashi1) mod 12       // Rasi, Vasya
//! ```
//!
//! The group tables and number sets are fixed traditional constants.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::position::ChartPosition;

/// The ten poruthams in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoruthamRule {
    Dina,
    Gana,
    Rasi,
    Yoni,
    Rajju,
    Vedha,
    Vasya,
    Mahendra,
    StreeDeergha,
    Nadi,
}

pub const ALL_RULES: [PoruthamRule; 10] = [
    PoruthamRule::Dina,
    PoruthamRule::Gana,
    PoruthamRule::Rasi,
    PoruthamRule::Yoni,
    PoruthamRule::Rajju,
    PoruthamRule::Vedha,
    PoruthamRule::Vasya,
    PoruthamRule::Mahendra,
    PoruthamRule::StreeDeergha,
    PoruthamRule::Nadi,
];

impl PoruthamRule {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dina => "Dina",
            Self::Gana => "Gana",
            Self::Rasi => "Rasi",
            Self::Yoni => "Yoni",
            Self::Rajju => "Rajju",
            Self::Vedha => "Vedha",
            Self::Vasya => "Vasya",
            Self::Mahendra => "Mahendra",
            Self::StreeDeergha => "Stree Deergha",
            Self::Nadi => "Nadi",
        }
    }
}

impl Display for PoruthamRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Temperament of a nakshatra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gana {
    Deva,
    Manushya,
    Rakshasa,
}

const DEVA: [u8; 8] = [0, 4, 6, 7, 12, 16, 21, 26];
const MANUSHYA: [u8; 9] = [1, 3, 5, 10, 11, 19, 20, 24, 25];

/// Gana of a nakshatra index. The three tables partition 0-26.
pub fn gana(nakshatra_index: u8) -> Gana {
    let n = nakshatra_index % 27;
    if DEVA.contains(&n) {
        Gana::Deva
    } else if MANUSHYA.contains(&n) {
        Gana::Manushya
    } else {
        Gana::Rakshasa
    }
}

const RAJJU_GROUPS: [[u8; 9]; 3] = [
    [0, 5, 6, 11, 12, 17, 18, 23, 24],
    [1, 4, 7, 10, 13, 16, 19, 22, 25],
    [2, 3, 8, 9, 14, 15, 20, 21, 26],
];

/// Rajju (body-region) group, 0-2.
pub fn rajju_group(nakshatra_index: u8) -> u8 {
    let n = nakshatra_index % 27;
    RAJJU_GROUPS
        .iter()
        .position(|g| g.contains(&n))
        .unwrap_or(0) as u8
}

/// Nadi group, 0-2: nakshatras cycle through the three nadis.
pub fn nadi_group(nakshatra_index: u8) -> u8 {
    nakshatra_index % 27 % 3
}

const DINA_BAD: [u8; 13] = [2, 4, 6, 8, 9, 11, 13, 15, 18, 20, 22, 24, 26];
const RASI_GOOD: [u8; 8] = [1, 2, 3, 4, 5, 7, 9, 11];
const VEDHA_BAD: [u8; 4] = [1, 3, 5, 7];
const VASYA_GOOD: [u8; 5] = [2, 5, 6, 8, 9];
const MAHENDRA_GOOD: [u8; 8] = [4, 7, 10, 13, 16, 19, 22, 25];

/// The Moon placement the rules read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonPlacement {
    /// 0-26.
    pub mansion_index: u8,
    /// 0-11.
    pub sign_index: u8,
}

impl MoonPlacement {
    pub const fn new(mansion_index: u8, sign_index: u8) -> Self {
        Self {
            mansion_index: mansion_index % 27,
            sign_index: sign_index % 12,
        }
    }
}

impl From<&ChartPosition> for MoonPlacement {
    fn from(p: &ChartPosition) -> Self {
        Self::new(p.mansion_index, p.sign_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: PoruthamRule,
    pub pass: bool,
}

impl RuleOutcome {
    /// 1 for a pass, 0 otherwise.
    pub const fn score(&self) -> u8 {
        self.pass as u8
    }
}

/// Verdict tiers over the 0-10 total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Poor,
    Average,
    Good,
    Excellent,
}

impl Verdict {
    pub const fn from_total(total: u8) -> Self {
        match total {
            8.. => Self::Excellent,
            6..=7 => Self::Good,
            4..=5 => Self::Average,
            _ => Self::Poor,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub first: MoonPlacement,
    pub second: MoonPlacement,
    /// Outcomes in [`ALL_RULES`] order.
    pub outcomes: [RuleOutcome; 10],
    /// `((nak2 - nak1) mod 27) + 1`, 1-27.
    pub nakshatra_count: u8,
    /// `(rashi2 - rashi1) mod 12`, 0-11.
    pub rasi_distance: u8,
    /// 0-10.
    pub total: u8,
    pub verdict: Verdict,
}

impl CompatibilityResult {
    pub fn outcome(&self, rule: PoruthamRule) -> RuleOutcome {
        self.outcomes[rule as usize]
    }

    pub fn passed(&self) -> impl Iterator<Item = PoruthamRule> + '_ {
        self.outcomes.iter().filter(|o| o.pass).map(|o| o.rule)
    }
}

fn evaluate(rule: PoruthamRule, a: MoonPlacement, b: MoonPlacement, count: u8, diff: u8) -> bool {
    let (n1, n2) = (a.mansion_index, b.mansion_index);
    let abs_diff = n1.abs_diff(n2);
    match rule {
        PoruthamRule::Dina => !DINA_BAD.contains(&count),
        PoruthamRule::Gana => {
            let (g1, g2) = (gana(n1), gana(n2));
            g1 == g2 || g1 == Gana::Deva || g2 == Gana::Deva
        }
        PoruthamRule::Rasi => RASI_GOOD.contains(&diff),
        PoruthamRule::Yoni => abs_diff % 2 == 0,
        PoruthamRule::Rajju => rajju_group(n1) != rajju_group(n2),
        PoruthamRule::Vedha => !VEDHA_BAD.contains(&abs_diff),
        PoruthamRule::Vasya => VASYA_GOOD.contains(&diff),
        PoruthamRule::Mahendra => MAHENDRA_GOOD.contains(&count),
        PoruthamRule::StreeDeergha => count >= 13,
        PoruthamRule::Nadi => nadi_group(n1) != nadi_group(n2),
    }
}

/// Evaluate all ten rules. `first` is conventionally the bride's Moon.
pub fn porutham(first: MoonPlacement, second: MoonPlacement) -> CompatibilityResult {
    let (a, b) = (
        MoonPlacement::new(first.mansion_index, first.sign_index),
        MoonPlacement::new(second.mansion_index, second.sign_index),
    );
    let count = ((b.mansion_index as i32 - a.mansion_index as i32).rem_euclid(27) + 1) as u8;
    let diff = (b.sign_index as i32 - a.sign_index as i32).rem_euclid(12) as u8;

    let outcomes = ALL_RULES.map(|rule| RuleOutcome {
        rule,
        pass: evaluate(rule, a, b, count, diff),
    });
    let total = outcomes.iter().map(RuleOutcome::score).sum::<u8>();

    CompatibilityResult {
        first: a,
        second: b,
        outcomes,
        nakshatra_count: count,
        rasi_distance: diff,
        total,
        verdict: Verdict::from_total(total),
    }
}
