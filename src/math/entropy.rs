/// Shannon entropy of a weighted outcome set
///
/// Computes `ln(total) - Σ w·ln(w) / total`, the log of the effective
/// branching factor. Non-positive weights are ignored; an empty or all-zero
/// set has entropy 0.
///
/// Weights are summed in ascending order, so the same multiset of weights
/// gives a bit-identical result whatever order it arrives in.
pub fn shannon_entropy<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut positive: Vec<f64> = weights.into_iter().filter(|&w| w > 0.0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    positive.sort_unstable_by(f64::total_cmp);

    let mut total = 0.0;
    let mut weighted_log_sum = 0.0;
    for w in positive {
        total += w;
        weighted_log_sum += w * w.ln();
    }

    total.ln() - weighted_log_sum / total
}
