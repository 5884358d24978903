//! HDF5 time-stream I/O around the flagging pass.

use std::path::Path;

use hdf5::types::{VarLenAscii, VarLenUnicode};
use hdf5::H5Type;
use log::info;
use ndarray::{Array1, Array4, ArrayD, Ix4};
use num_complex::Complex64;
use thiserror::Error;

use crate::algos::{baseline_pairs, flag_timestream};
use crate::params::{FlagParams, ParamsError};

/// h5py-compatible complex128: a compound of two doubles named `r` and `i`.
#[derive(H5Type, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct H5Complex {
    pub r: f64,
    pub i: f64,
}

impl From<H5Complex> for Complex64 {
    fn from(z: H5Complex) -> Self {
        Complex64::new(z.r, z.i)
    }
}

impl From<Complex64> for H5Complex {
    fn from(z: Complex64) -> Self {
        H5Complex { r: z.re, i: z.im }
    }
}

#[derive(Error, Debug)]
pub enum FlagFileError {
    #[error("dataset 'data' should be 4-D (time, baseline, pol, freq), got shape {shape:?}")]
    NotTimestream { shape: Vec<usize> },

    #[error("the {axis} axis has {actual} elements, but the '{meta}' metadata implies {expected}")]
    AxisMismatch {
        axis: &'static str,
        meta: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("the time-stream has no time samples")]
    Empty,

    #[error("history text cannot be stored as an HDF5 string: {0}")]
    History(String),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Hdf5(#[from] hdf5::Error),
}

/// An in-memory time-stream with the metadata this stage carries through.
pub struct Timestream {
    /// (time, baseline, polarization, frequency) visibilities.
    pub data: Array4<Complex64>,
    /// Julian date of each time sample.
    pub time: Array1<f64>,
    /// Antenna numbers; the baseline axis covers their ordered pairs.
    pub ants: Vec<i64>,
    /// Centre frequency of each channel.
    pub freq: Vec<f64>,
    /// Provenance text, one line per pipeline stage.
    pub history: String,
}

impl Timestream {
    /// Check the data shape against the carried metadata.
    pub fn validate(&self) -> Result<(), FlagFileError> {
        let (nt, nbls, _npol, nfreq) = self.data.dim();
        if nt == 0 {
            return Err(FlagFileError::Empty);
        }
        let expected_bls = baseline_pairs(&self.ants).len();
        if nbls != expected_bls {
            return Err(FlagFileError::AxisMismatch {
                axis: "baseline",
                meta: "ants",
                expected: expected_bls,
                actual: nbls,
            });
        }
        if nfreq != self.freq.len() {
            return Err(FlagFileError::AxisMismatch {
                axis: "frequency",
                meta: "freq",
                expected: self.freq.len(),
                actual: nfreq,
            });
        }
        if nt != self.time.len() {
            return Err(FlagFileError::AxisMismatch {
                axis: "time",
                meta: "time",
                expected: self.time.len(),
                actual: nt,
            });
        }
        Ok(())
    }
}

/// h5py writes str attributes as ascii and unicode ones as utf-8; accept
/// either.
fn read_string_attr(dset: &hdf5::Dataset, name: &str) -> Result<Option<String>, FlagFileError> {
    let attr = match dset.attr(name) {
        Ok(attr) => attr,
        Err(_) => return Ok(None),
    };
    if let Ok(s) = attr.read_scalar::<VarLenUnicode>() {
        return Ok(Some(s.to_string()));
    }
    let s = attr.read_scalar::<VarLenAscii>()?;
    Ok(Some(s.to_string()))
}

fn write_string_attr(
    dset: &hdf5::Dataset,
    name: &str,
    value: &str,
) -> Result<(), FlagFileError> {
    let value: VarLenUnicode = value
        .parse()
        .map_err(|e| FlagFileError::History(format!("{e}")))?;
    dset.new_attr::<VarLenUnicode>()
        .create(name)?
        .write_scalar(&value)?;
    Ok(())
}

/// Read a time-stream file: the `data` and `time` datasets plus the `ants`,
/// `freq` and `history` attributes on `data`. A missing history starts out
/// empty.
pub fn read_timestream(path: &Path) -> Result<Timestream, FlagFileError> {
    let file = hdf5::File::open(path)?;
    let dset = file.dataset("data")?;

    let raw: ArrayD<H5Complex> = dset.read_dyn()?;
    let data = raw
        .into_dimensionality::<Ix4>()
        .map_err(|_| FlagFileError::NotTimestream {
            shape: dset.shape(),
        })?
        .mapv(Complex64::from);

    let ants = dset.attr("ants")?.read_1d::<i64>()?.to_vec();
    let freq = dset.attr("freq")?.read_1d::<f64>()?.to_vec();
    let history = read_string_attr(&dset, "history")?.unwrap_or_default();
    let time = file.dataset("time")?.read_1d::<f64>()?;

    Ok(Timestream {
        data,
        time,
        ants,
        freq,
        history,
    })
}

/// Write a time-stream file with the same layout `read_timestream` expects.
pub fn write_timestream(path: &Path, ts: &Timestream) -> Result<(), FlagFileError> {
    let file = hdf5::File::create(path)?;

    let raw = ts.data.mapv(H5Complex::from);
    let dset = file.new_dataset_builder().with_data(&raw).create("data")?;
    file.new_dataset_builder()
        .with_data(&ts.time)
        .create("time")?;

    let ants = Array1::from_vec(ts.ants.clone());
    dset.new_attr_builder().with_data(&ants).create("ants")?;
    let freq = Array1::from_vec(ts.freq.clone());
    dset.new_attr_builder().with_data(&freq).create("freq")?;
    write_string_attr(&dset, "history", &ts.history)?;

    Ok(())
}

/// Run the whole stage: read, flag every (baseline, polarization) block in
/// place, and write the result with an updated history. Returns the number
/// of flagged (baseline, polarization, channel) triples.
pub fn flag_file(
    input: &Path,
    output: &Path,
    params: &FlagParams,
) -> Result<usize, FlagFileError> {
    params.validate()?;

    let mut ts = read_timestream(input)?;
    ts.validate()?;

    let (nt, nbls, npol, nfreq) = ts.data.dim();
    info!(
        "flagging {nt} times x {nbls} baselines x {npol} pols x {nfreq} channels from {}",
        input.display()
    );

    let flagged = flag_timestream(ts.data.view_mut(), params);
    info!("flagged {flagged} (baseline, pol, channel) triples");

    ts.history.push_str(&history_line(params, flagged));
    write_timestream(output, &ts)?;
    info!("wrote {}", output.display());

    Ok(flagged)
}

fn history_line(params: &FlagParams, flagged: usize) -> String {
    let mut line = format!(
        "line_rfi: threshold={}, imaginary_only={}, fill0={}, edge_samples={}, \
         flagged {flagged} channels at {}.\n",
        params.threshold,
        params.imaginary_only,
        params.fill0,
        params.edge_samples,
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
    );
    if !params.extra_history.is_empty() {
        line.push_str(&params.extra_history);
        line.push('\n');
    }
    line
}
