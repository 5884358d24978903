/// Upper-quantile cutoff for channel flagging.
///
/// Sorts a copy of `xs` ascending (NaNs last) and returns the element at
/// index `floor((1 - fraction) * len)`, clamped to the last index. With
/// `fraction` of 0 this is the maximum, so a strict comparison against the
/// cutoff flags nothing.
///
/// Panics on an empty slice.
pub fn upper_quantile(xs: &[f64], fraction: f64) -> f64 {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let idx = ((1.0 - fraction) * sorted.len() as f64) as usize;
    sorted[idx.min(sorted.len() - 1)]
}
