//! Neighbourhood record types shared by the loader and the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the hypertension dataset.
///
/// Field order matches the column order of the CSV file, which is how the
/// loader maps columns onto fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HypertensionRecord {
    pub name: String,
    pub num_hypertension_all: u32,
    pub num_all: u32,
    pub num_hypertension_20_44: u32,
    pub num_20_44: u32,
    pub num_hypertension_45_64: u32,
    pub num_45_64: u32,
    pub num_hypertension_65_plus: u32,
    pub num_65_plus: u32,
}

impl HypertensionRecord {
    /// Returns `(hypertension count, population)` for the given age group.
    pub fn counts_for(&self, age_group: AgeGroup) -> (u32, u32) {
        match age_group {
            AgeGroup::All => (self.num_hypertension_all, self.num_all),
            AgeGroup::Age20To44 => (self.num_hypertension_20_44, self.num_20_44),
            AgeGroup::Age45To64 => (self.num_hypertension_45_64, self.num_45_64),
            AgeGroup::Age65Plus => (self.num_hypertension_65_plus, self.num_65_plus),
        }
    }
}

/// One row of the low income dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowIncomeRecord {
    pub name: String,
    pub num_low_income: u32,
    pub population_total: u32,
}

/// Hypertension and low income rates for a neighbourhood present in both datasets.
///
/// Both rates lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRateRecord {
    pub name: String,
    pub hypertension_rate: f64,
    pub low_income_rate: f64,
}

/// Age band selector for hypertension counts and rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    /// Everyone aged 20 and over.
    All,
    /// Everyone aged 20 to 44.
    Age20To44,
    /// Everyone aged 45 to 64.
    Age45To64,
    /// Everyone aged 65 and over.
    Age65Plus,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::All,
        AgeGroup::Age20To44,
        AgeGroup::Age45To64,
        AgeGroup::Age65Plus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::All => "20+",
            AgeGroup::Age20To44 => "20-44",
            AgeGroup::Age45To64 => "45-64",
            AgeGroup::Age65Plus => "65+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when an age group label is not one of `20+`, `20-44`, `45-64`, `65+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAgeGroupError(String);

impl fmt::Display for ParseAgeGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown age group '{}' (expected one of 20+, 20-44, 45-64, 65+)",
            self.0
        )
    }
}

impl std::error::Error for ParseAgeGroupError {}

impl FromStr for AgeGroup {
    type Err = ParseAgeGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .into_iter()
            .find(|group| group.label() == s.trim())
            .ok_or_else(|| ParseAgeGroupError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> HypertensionRecord {
        HypertensionRecord {
            name: "Rexdale-Kipling".into(),
            num_hypertension_all: 2500,
            num_all: 8000,
            num_hypertension_20_44: 300,
            num_20_44: 4000,
            num_hypertension_45_64: 1000,
            num_45_64: 2500,
            num_hypertension_65_plus: 1200,
            num_65_plus: 1500,
        }
    }

    #[test]
    fn test_counts_for_each_group() {
        let r = record();
        assert_eq!(r.counts_for(AgeGroup::All), (2500, 8000));
        assert_eq!(r.counts_for(AgeGroup::Age20To44), (300, 4000));
        assert_eq!(r.counts_for(AgeGroup::Age45To64), (1000, 2500));
        assert_eq!(r.counts_for(AgeGroup::Age65Plus), (1200, 1500));
    }

    #[test]
    fn test_age_group_label_round_trips() {
        for group in AgeGroup::ALL {
            assert_eq!(group.to_string().parse::<AgeGroup>(), Ok(group));
        }
    }

    #[test]
    fn test_age_group_rejects_unknown_label() {
        let err = "18-25".parse::<AgeGroup>().unwrap_err();
        assert!(err.to_string().contains("18-25"));
    }
}
