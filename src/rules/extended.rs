//! Optional extended rules.
//!
//! Extended rules are chosen per move request and never stored on the board.
//! `ExtendedRuleSet` is a bit set over the closed `ExtendedRule` enum, so a
//! new rule is a new variant and every `match` on it must be revisited.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One optional rule.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ExtendedRule {
    /// E1: a store's mandarin is capturable only once the store holds at least
    /// five tokens.
    #[serde(rename = "E1")]
    #[strum(to_string = "E1", serialize = "immature_mandarin")]
    ImmatureMandarin,

    /// E2: a forced re-sow keeps going instead of stopping after one pass.
    #[serde(rename = "E2")]
    #[strum(to_string = "E2", serialize = "forced_redistribution")]
    ForcedRedistribution,

    /// E3: mandarins cannot be captured during the first rounds.
    #[serde(rename = "E3")]
    #[strum(to_string = "E3", serialize = "early_game_restriction")]
    EarlyGameRestriction,

    /// E4: a capture may jump two empty squares instead of one.
    #[serde(rename = "E4")]
    #[strum(to_string = "E4", serialize = "two_empty_capture")]
    TwoEmptyCapture,

    /// E5: after the single default re-sow, available captures are still taken.
    #[serde(rename = "E5")]
    #[strum(to_string = "E5", serialize = "forced_capture_chain")]
    ForcedCaptureChain,
}

impl ExtendedRule {
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Short rule name.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            ExtendedRule::ImmatureMandarin => "Immature Mandarin",
            ExtendedRule::ForcedRedistribution => "Forced Redistribution",
            ExtendedRule::EarlyGameRestriction => "Early Game Restriction",
            ExtendedRule::TwoEmptyCapture => "Two-Empty Capture",
            ExtendedRule::ForcedCaptureChain => "Forced Capture Chain",
        }
    }

    /// One-line description for help output.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            ExtendedRule::ImmatureMandarin => {
                "A mandarin square can only be captured once it holds 5 or more tokens."
            }
            ExtendedRule::ForcedRedistribution => {
                "Whenever the square after your last drop holds pieces, \
                 pick them up and keep sowing."
            }
            ExtendedRule::EarlyGameRestriction => {
                "Mandarin squares cannot be captured during rounds 1 and 2."
            }
            ExtendedRule::TwoEmptyCapture => {
                "A capture may reach across two empty squares instead of one."
            }
            ExtendedRule::ForcedCaptureChain => {
                "After the final re-sow, every capture still available must be taken."
            }
        }
    }
}

/// A set of active extended rules. Empty means the base game.
///
/// ```
/// use o_an_quan::rules::{ExtendedRule, ExtendedRuleSet};
///
/// let rules: ExtendedRuleSet = "E1,e3".parse().unwrap();
/// assert!(rules.contains(ExtendedRule::ImmatureMandarin));
/// assert!(!rules.contains(ExtendedRule::ForcedRedistribution));
/// assert_eq!(rules.to_string(), "E1,E3");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ExtendedRule>", into = "Vec<ExtendedRule>")]
pub struct ExtendedRuleSet {
    bits: u8,
}

impl ExtendedRuleSet {
    /// No extended rules.
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    /// Every extended rule.
    #[must_use]
    pub fn all() -> Self {
        ExtendedRule::iter().collect()
    }

    /// Add a rule (builder pattern).
    #[must_use]
    pub const fn with(mut self, rule: ExtendedRule) -> Self {
        self.bits |= rule.bit();
        self
    }

    pub fn insert(&mut self, rule: ExtendedRule) {
        self.bits |= rule.bit();
    }

    #[must_use]
    pub const fn contains(self, rule: ExtendedRule) -> bool {
        self.bits & rule.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Active rules in E1..E5 order.
    pub fn iter(self) -> impl Iterator<Item = ExtendedRule> {
        ExtendedRule::iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<ExtendedRule> for ExtendedRuleSet {
    fn from_iter<I: IntoIterator<Item = ExtendedRule>>(iter: I) -> Self {
        let mut set = Self::none();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl From<Vec<ExtendedRule>> for ExtendedRuleSet {
    fn from(rules: Vec<ExtendedRule>) -> Self {
        rules.into_iter().collect()
    }
}

impl From<ExtendedRuleSet> for Vec<ExtendedRule> {
    fn from(set: ExtendedRuleSet) -> Self {
        set.iter().collect()
    }
}

impl std::fmt::Display for ExtendedRuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<_> = self.iter().map(|r| r.to_string()).collect();
        f.write_str(&ids.join(","))
    }
}

impl std::str::FromStr for ExtendedRuleSet {
    type Err = strum::ParseError;

    /// Parse a comma- or whitespace-separated list such as `"E1, E3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse::<ExtendedRule>)
            .collect()
    }
}
