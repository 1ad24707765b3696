//! P&L aggregation across the position axis.
//!
//! Aggregation reduces per-position P&L arrays into reporting buckets by
//! elementwise summation. Array length is never changed; only the position
//! axis is reduced.

use std::collections::HashMap;

use stress_core::{AggregationType, Factor, Float};

use super::result::StressResult;

/// Bucket key for factor aggregation when no factor is attached.
const NO_FACTOR_BUCKET: &str = "no_factor";

/// Bucket key for whole-portfolio aggregation.
const TOTAL_BUCKET: &str = "total";

/// Sum position P&L arrays into buckets per the aggregation policy.
///
/// - `ByUnderlying`: one bucket per underlying symbol
/// - `Total`: a single `"total"` bucket
/// - `ByFactor`: a single bucket keyed by the factor's name, `"no_factor"`
///   when the scenario carries none
pub fn aggregate_pnl<T: Float>(
    position_results: &[StressResult<T>],
    aggregation_type: AggregationType,
    factor: Option<&Factor<T>>,
) -> HashMap<String, Vec<T>> {
    let mut aggregated: HashMap<String, Vec<T>> = HashMap::new();

    match aggregation_type {
        AggregationType::ByUnderlying => {
            for result in position_results {
                add_into(
                    aggregated.entry(result.underlying.clone()).or_default(),
                    &result.pnl_values,
                );
            }
        }
        AggregationType::Total => {
            if !position_results.is_empty() {
                let bucket = aggregated.entry(TOTAL_BUCKET.to_string()).or_default();
                for result in position_results {
                    add_into(bucket, &result.pnl_values);
                }
            }
        }
        AggregationType::ByFactor => {
            if !position_results.is_empty() {
                let key = factor
                    .map(|f| f.name().to_string())
                    .unwrap_or_else(|| NO_FACTOR_BUCKET.to_string());
                let bucket = aggregated.entry(key).or_default();
                for result in position_results {
                    add_into(bucket, &result.pnl_values);
                }
            }
        }
    }
    aggregated
}

/// Elementwise add, zero-extending the accumulator to the longer length.
fn add_into<T: Float>(acc: &mut Vec<T>, values: &[T]) {
    if acc.len() < values.len() {
        acc.resize(values.len(), T::zero());
    }
    for (slot, value) in acc.iter_mut().zip(values.iter()) {
        *slot = *slot + *value;
    }
}
