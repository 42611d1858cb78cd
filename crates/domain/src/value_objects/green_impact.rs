//! CO2 savings estimate for a planned trip

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kilograms of CO2 attributed to one mile driven (GSF standard)
pub const KG_CO2_PER_MILE: f64 = 0.404;

/// Reward bracket a CO2 figure falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardTier {
    /// More than 10 kg saved
    Streaming,
    /// More than 5 kg saved
    Coffee,
    /// Anything else
    Phone,
}

impl RewardTier {
    /// Pick the tier for a CO2 amount in kilograms
    #[must_use]
    pub fn for_kg(kg_co2: f64) -> Self {
        if kg_co2 > 10.0 {
            Self::Streaming
        } else if kg_co2 > 5.0 {
            Self::Coffee
        } else {
            Self::Phone
        }
    }

    /// Message shown to the user
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Streaming => {
                "🚀 You saved enough CO2 to binge-watch 3 seasons of a show in 4K!"
            },
            Self::Coffee => "☕ That's equivalent to making 150 cups of coffee guilt-free!",
            Self::Phone => "📱 You saved enough energy to charge your phone for a whole year!",
        }
    }
}

/// CO2 avoided over a distance, with its reward message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreenImpact {
    /// Distance the estimate is based on
    pub miles: f64,
    /// `miles * KG_CO2_PER_MILE`
    pub kg_co2: f64,
    /// Reward bracket
    pub tier: RewardTier,
}

impl GreenImpact {
    /// Estimate the impact of a trip of the given length
    #[must_use]
    pub fn from_miles(miles: f64) -> Self {
        let kg_co2 = miles * KG_CO2_PER_MILE;
        Self {
            miles,
            kg_co2,
            tier: RewardTier::for_kg(kg_co2),
        }
    }

    /// Reward message for this impact
    #[must_use]
    pub const fn reward(&self) -> &'static str {
        self.tier.message()
    }
}

impl fmt::Display for GreenImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CO2 Avoided: {:.2} kg\n{}", self.kg_co2, self.reward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kg_is_proportional_to_miles() {
        let impact = GreenImpact::from_miles(100.0);
        assert!((impact.kg_co2 - 40.4).abs() < 1e-9);
        assert_eq!(impact.tier, RewardTier::Streaming);
    }

    #[test]
    fn tier_boundaries_are_exclusive() {
        assert_eq!(RewardTier::for_kg(10.0), RewardTier::Coffee);
        assert_eq!(RewardTier::for_kg(10.01), RewardTier::Streaming);
        assert_eq!(RewardTier::for_kg(5.0), RewardTier::Phone);
        assert_eq!(RewardTier::for_kg(5.01), RewardTier::Coffee);
        assert_eq!(RewardTier::for_kg(0.0), RewardTier::Phone);
    }

    #[test]
    fn short_trip_gets_phone_reward() {
        let impact = GreenImpact::from_miles(3.0);
        assert_eq!(impact.tier, RewardTier::Phone);
        assert!(impact.reward().contains("charge your phone"));
    }

    #[test]
    fn display_shows_two_decimals() {
        let shown = GreenImpact::from_miles(20.0).to_string();
        assert!(shown.starts_with("CO2 Avoided: 8.08 kg"));
        assert!(shown.contains("coffee"));
    }
}
