//! Spectral line RFI flagging for radio-telescope visibility time-streams.
//!
//! One pass over a `(time, baseline, polarization, frequency)` array of
//! complex visibilities: for every (baseline, polarization) block, each
//! frequency channel's time-averaged magnitude is compared against a
//! quantile cutoff and the channels above it are masked out. Baselines are
//! split across a rayon worker pool.

pub mod algos;
pub mod math;
pub mod params;

#[cfg(feature = "cli")]
pub mod io;
