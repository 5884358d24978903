use ndarray::ArrayViewMut2;
use num_complex::Complex64;

/// What a flagged channel is overwritten with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// `0 + 0i`, for consumers that cannot digest NaNs.
    Zero,
    /// `NaN + NaN*i`, so downstream stages can tell flagged from quiet.
    Nan,
}

impl Fill {
    pub fn value(self) -> Complex64 {
        match self {
            Fill::Zero => Complex64::new(0.0, 0.0),
            Fill::Nan => Complex64::new(f64::NAN, f64::NAN),
        }
    }
}

/// Overwrite every time sample of the given channels with the fill value.
pub fn mask_channels(mut block: ArrayViewMut2<'_, Complex64>, channels: &[usize], fill: Fill) {
    let value = fill.value();
    for &c in channels {
        block.column_mut(c).fill(value);
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_mask_with_zeros() {
        let mut block = Array2::from_elem((4, 3), Complex64::new(1.0, -1.0));
        mask_channels(block.view_mut(), &[1], Fill::Zero);
        for i in 0..4 {
            assert_eq!(block[(i, 0)], Complex64::new(1.0, -1.0));
            assert_eq!(block[(i, 1)], Complex64::new(0.0, 0.0));
            assert_eq!(block[(i, 2)], Complex64::new(1.0, -1.0));
        }
    }

    #[test]
    fn test_mask_with_nans() {
        let mut block = Array2::from_elem((4, 3), Complex64::new(1.0, -1.0));
        mask_channels(block.view_mut(), &[0, 2], Fill::Nan);
        for i in 0..4 {
            assert!(block[(i, 0)].re.is_nan() && block[(i, 0)].im.is_nan());
            assert_eq!(block[(i, 1)], Complex64::new(1.0, -1.0));
            assert!(block[(i, 2)].re.is_nan() && block[(i, 2)].im.is_nan());
        }
    }

    #[test]
    fn test_no_channels_no_change() {
        let mut block = Array2::from_elem((2, 2), Complex64::new(1.0, 0.0));
        mask_channels(block.view_mut(), &[], Fill::Nan);
        assert!(block.iter().all(|z| *z == Complex64::new(1.0, 0.0)));
    }
}
