use ndarray::{Array1, ArrayView2};
use num_complex::Complex64;

/// Per-channel mean magnitude over the leading and trailing `edge` time
/// samples of a (time x frequency) block.
///
/// The two windows are averaged as one concatenation, so when the block has
/// fewer than `2 * edge` time samples the overlapping rows count twice.
/// With `imaginary_only` set, only the imaginary part's magnitude enters
/// the mean. An empty block yields NaNs.
pub fn edge_time_mean(
    block: ArrayView2<'_, Complex64>,
    edge: usize,
    imaginary_only: bool,
) -> Array1<f64> {
    let nt = block.nrows();
    let nfreq = block.ncols();
    let k = edge.min(nt);

    let mut mean = Array1::<f64>::zeros(nfreq);
    if k == 0 {
        mean.fill(f64::NAN);
        return mean;
    }

    for i in (0..k).chain(nt - k..nt) {
        for (m, z) in mean.iter_mut().zip(block.row(i)) {
            *m += if imaginary_only { z.im.abs() } else { z.norm() };
        }
    }
    mean /= (2 * k) as f64;
    mean
}
