//! Selection of hot (positively trending) and cold (negatively trending) topics

use serde::{Deserialize, Serialize};

use crate::models::CorrelationRecord;

use super::error::{TrendError, TrendResult};

/// Significant topics split by trend direction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedTopics {
    /// Up to `top_n` positive correlations, strongest first
    pub positive: Vec<CorrelationRecord>,

    /// Up to `top_n` negative correlations, taken from the tail of the
    /// descending ranking and kept in that order
    pub negative: Vec<CorrelationRecord>,
}

impl RankedTopics {
    /// Labels of the positive selection in ranked order
    #[must_use]
    pub fn positive_labels(&self) -> Vec<&str> {
        self.positive.iter().map(|r| r.topic_label.as_str()).collect()
    }

    /// Labels of the negative selection in ranked order
    #[must_use]
    pub fn negative_labels(&self) -> Vec<&str> {
        self.negative.iter().map(|r| r.topic_label.as_str()).collect()
    }
}

/// Rank significant topics by correlation and pick both ends
///
/// Records with `p_value <= pval_threshold` and a defined correlation are
/// sorted by correlation, descending; ties keep table order. The positive
/// set is the first `top_n` rows with correlation > 0. The negative set is
/// the last `top_n` rows with correlation < 0, in descending order, so the
/// strongest negative trend comes last.
///
/// # Errors
/// Returns [`TrendError::InvalidThreshold`] if the threshold is not in `[0, 1]`.
pub fn rank_topics(
    records: &[CorrelationRecord],
    pval_threshold: f64,
    top_n: usize,
) -> TrendResult<RankedTopics> {
    if !(0.0..=1.0).contains(&pval_threshold) {
        return Err(TrendError::InvalidThreshold(pval_threshold));
    }

    let mut significant: Vec<&CorrelationRecord> = records
        .iter()
        .filter(|r| r.is_defined() && r.p_value <= pval_threshold)
        .collect();

    // `sort_by` is stable, so equal correlations keep table order
    significant.sort_by(|a, b| b.correlation.total_cmp(&a.correlation));

    let positive: Vec<CorrelationRecord> = significant
        .iter()
        .filter(|r| r.correlation > 0.0)
        .take(top_n)
        .map(|&r| r.clone())
        .collect();

    let negatives: Vec<&CorrelationRecord> = significant
        .iter()
        .copied()
        .filter(|r| r.correlation < 0.0)
        .collect();
    let negative: Vec<CorrelationRecord> = negatives[negatives.len().saturating_sub(top_n)..]
        .iter()
        .map(|&r| r.clone())
        .collect();

    tracing::debug!(
        significant = %significant.len(),
        positive = %positive.len(),
        negative = %negative.len(),
        threshold = %pval_threshold,
        "Ranked topic correlations"
    );

    Ok(RankedTopics { positive, negative })
}
