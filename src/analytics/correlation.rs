//! Pearson correlation of topic proportions with year
//!
//! The two-sided p-value comes from Student's t distribution with `n - 2`
//! degrees of freedom, `t = r * sqrt((n - 2) / (1 - r²))`.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::models::{CorrelationRecord, TopicTable};

/// Correlation coefficient and its two-sided p-value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
}

/// Pearson correlation between two equally long samples
///
/// # Returns
/// `None` when the correlation is undefined: fewer than two points,
/// mismatched lengths, a constant sample, or non-finite input.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> Option<Correlation> {
    let n = x.len();
    if n < 2 || n != y.len() || is_constant(x) || is_constant(y) {
        return None;
    }

    let n_f64 = n as f64;
    let mean_x = x.iter().sum::<f64>() / n_f64;
    let mean_y = y.iter().sum::<f64>() / n_f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if is_negligible(sxx, x) || is_negligible(syy, y) {
        return None;
    }

    let denom = (sxx * syy).sqrt();
    if !denom.is_finite() || denom == 0.0 {
        return None;
    }

    let r = (sxy / denom).clamp(-1.0, 1.0);
    if !r.is_finite() {
        return None;
    }

    Some(Correlation {
        r,
        p_value: two_sided_p_value(r, n),
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

/// Sum of squared deviations at the level of rounding noise for `values`
fn is_negligible(sum_sq: f64, values: &[f64]) -> bool {
    let scale = values.iter().fold(0.0f64, |acc, &v| acc.max(v * v));
    sum_sq <= values.len() as f64 * f64::EPSILON * scale
}

fn two_sided_p_value(r: f64, n: usize) -> f64 {
    // Two points always lie on a line
    if n <= 2 {
        return 1.0;
    }

    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t = r * (df / one_minus_r2).sqrt();

    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(e) => {
            tracing::warn!(error = %e, df = %df, "Failed to build t distribution");
            1.0
        }
    }
}

/// Correlate every topic column of a smoothed table with its year column
///
/// One record per topic in column order. Undefined correlations are kept
/// with `correlation = NaN` and `p_value = 1.0`, so they can never pass a
/// significance filter.
#[must_use]
pub fn correlation_table(table: &TopicTable) -> Vec<CorrelationRecord> {
    table
        .topics()
        .enumerate()
        .map(|(idx, (label, column))| {
            let (correlation, p_value) = match pearson(table.year(), column) {
                Some(c) => (c.r, c.p_value),
                None => {
                    if !table.is_empty() {
                        tracing::debug!(topic = %label, "Correlation undefined, topic excluded");
                    }
                    (f64::NAN, 1.0)
                }
            };

            CorrelationRecord {
                correlation,
                p_value,
                topic_label: label.to_string(),
                topic_index: idx + 1,
            }
        })
        .collect()
}
