use std::collections::HashMap;

use crate::analysis::utility::rate;
use crate::records::{AgeGroup, HypertensionRecord, LowIncomeRecord};

/// Maps each neighbourhood to its hypertension count for `age_group`.
///
/// These are raw counts; see [`hypertension_rates`] for the divided form.
pub fn hypertension_counts(
    data: &[HypertensionRecord],
    age_group: AgeGroup,
) -> HashMap<String, u32> {
    data.iter()
        .map(|r| (r.name.clone(), r.counts_for(age_group).0))
        .collect()
}

/// Maps each neighbourhood to its hypertension rate for `age_group`.
pub fn hypertension_rates(
    data: &[HypertensionRecord],
    age_group: AgeGroup,
) -> HashMap<String, f64> {
    data.iter()
        .map(|r| {
            let (count, population) = r.counts_for(age_group);
            (r.name.clone(), rate(count, population))
        })
        .collect()
}

/// Maps each neighbourhood to the proportion of its residents with low income status.
pub fn low_income_rates(data: &[LowIncomeRecord]) -> HashMap<String, f64> {
    data.iter()
        .map(|r| (r.name.clone(), rate(r.num_low_income, r.population_total)))
        .collect()
}
