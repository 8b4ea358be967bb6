use tracing::debug;

use crate::analysis::rates::low_income_rates;
use crate::analysis::utility::rate;
use crate::records::{AgeGroup, CombinedRateRecord, HypertensionRecord, LowIncomeRecord};

/// Joins the two datasets on neighbourhood name.
///
/// Only neighbourhoods present in both inputs appear in the result, in the
/// order of `hypertension_data`. Names must be unique within each input.
pub fn combine_rates(
    hypertension_data: &[HypertensionRecord],
    low_income_data: &[LowIncomeRecord],
    age_group: AgeGroup,
) -> Vec<CombinedRateRecord> {
    let low_income = low_income_rates(low_income_data);

    let combined: Vec<CombinedRateRecord> = hypertension_data
        .iter()
        .filter_map(|h| {
            let low_income_rate = *low_income.get(&h.name)?;
            let (count, population) = h.counts_for(age_group);

            Some(CombinedRateRecord {
                name: h.name.clone(),
                hypertension_rate: rate(count, population),
                low_income_rate,
            })
        })
        .collect();

    debug!(
        hypertension_rows = hypertension_data.len(),
        low_income_rows = low_income_data.len(),
        matched = combined.len(),
        age_group = %age_group,
        "Combined neighbourhood rates"
    );

    combined
}
