//! The flagging passes themselves.

use log::debug;
use ndarray::{parallel::prelude::*, s, ArrayViewMut2, ArrayViewMut4, Axis};
use num_complex::Complex64;

use crate::math::mask::mask_channels;
use crate::math::mean::edge_time_mean;
use crate::math::quantile::upper_quantile;
use crate::params::FlagParams;

/// All `(ants[i], ants[j])` pairs with `i <= j`, the baseline ordering of
/// the time-stream's second axis. Auto-correlations are included.
pub fn baseline_pairs(ants: &[i64]) -> Vec<(i64, i64)> {
    let mut bls = Vec::with_capacity(ants.len() * (ants.len() + 1) / 2);
    for (i, &a) in ants.iter().enumerate() {
        for &b in &ants[i..] {
            bls.push((a, b));
        }
    }
    bls
}

/// Flag one (time x frequency) block in place and return the flagged
/// channel indices.
///
/// The per-channel time means are thresholded at their upper
/// `params.threshold` quantile; whatever lies strictly above the cutoff is
/// overwritten with the fill value. Channels whose time mean is NaN are
/// never flagged.
pub fn flag_block(mut block: ArrayViewMut2<'_, Complex64>, params: &FlagParams) -> Vec<usize> {
    if block.is_empty() {
        return Vec::new();
    }

    let tm = edge_time_mean(block.view(), params.edge_samples, params.imaginary_only);
    let cutoff = upper_quantile(tm.as_slice().unwrap(), params.threshold);
    let channels: Vec<usize> = tm
        .iter()
        .enumerate()
        .filter_map(|(c, &m)| (m > cutoff).then_some(c))
        .collect();

    mask_channels(block, &channels, params.fill());
    channels
}

/// Flag every (baseline, polarization) block of a (time, baseline,
/// polarization, frequency) time-stream, with the baseline axis split
/// across the rayon pool. Returns the total number of flagged (baseline,
/// polarization, channel) triples.
///
/// Blocks are independent, so the result does not depend on the worker
/// count.
pub fn flag_timestream(mut data: ArrayViewMut4<'_, Complex64>, params: &FlagParams) -> usize {
    let npol = data.len_of(Axis(2));
    data.axis_iter_mut(Axis(1))
        .into_par_iter()
        .enumerate()
        .map(|(bl, mut slab)| {
            let mut flagged = 0;
            for pol in 0..npol {
                let channels = flag_block(slab.slice_mut(s![.., pol, ..]), params);
                if !channels.is_empty() {
                    debug!("baseline {bl} pol {pol}: flagged channels {channels:?}");
                }
                flagged += channels.len();
            }
            flagged
        })
        .sum()
}
