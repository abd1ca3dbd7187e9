use serde::{Deserialize, Serialize};

use crate::{buffer::PCM16_MAX, buffer::PCM16_MIN, AmplitudeDomain, Result, SpatialError};

/// How fractional amplitudes are turned into integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingPolicy {
    /// Drop the fractional part, as an integer cast does.
    #[default]
    TowardZero,
    /// Round to the nearest integer, ties to even.
    NearestEven,
}

impl RoundingPolicy {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::TowardZero => value.trunc(),
            Self::NearestEven => value.round_ties_even(),
        }
    }
}

/// Interleaved 16-bit stereo produced by [`Reconstructor::reconstruct`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconstruction {
    pub samples: Vec<i16>,
    /// Number of samples that had to be saturated into range.
    pub clipped_samples: usize,
}

/// Turns pattern output back into PCM that can be encoded losslessly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconstructor {
    rounding: RoundingPolicy,
}

impl Reconstructor {
    pub fn new(rounding: RoundingPolicy) -> Self {
        Self { rounding }
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Scales, saturates and interleaves two channel arrays.
    ///
    /// Normalized input is scaled by 32767 first. Out-of-range values clamp
    /// to `[-32768, 32767]` instead of wrapping; NaN becomes silence.
    pub fn reconstruct(
        &self,
        left: &[f64],
        right: &[f64],
        domain: AmplitudeDomain,
    ) -> Result<Reconstruction> {
        if left.len() != right.len() {
            return Err(SpatialError::invalid(format!(
                "cannot interleave channels of different lengths ({} vs {})",
                left.len(),
                right.len()
            )));
        }

        let scale = PCM16_MAX / domain.full_scale();
        let mut out = Reconstruction {
            samples: Vec::with_capacity(left.len() * 2),
            clipped_samples: 0,
        };

        for (&l, &r) in left.iter().zip(right) {
            out.samples.push(self.convert(l * scale, &mut out.clipped_samples));
            out.samples.push(self.convert(r * scale, &mut out.clipped_samples));
        }

        if out.clipped_samples > 0 {
            tracing::debug!(clipped = out.clipped_samples, "saturated out-of-range samples");
        }

        Ok(out)
    }

    fn convert(&self, value: f64, clipped: &mut usize) -> i16 {
        if value.is_nan() {
            return 0;
        }

        let rounded = self.rounding.apply(value);
        if !(PCM16_MIN..=PCM16_MAX).contains(&rounded) {
            *clipped += 1;
        }
        rounded.clamp(PCM16_MIN, PCM16_MAX) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_raw_values() {
        let out = Reconstructor::default()
            .reconstruct(&[1.0, 3.0], &[2.0, 4.0], AmplitudeDomain::RawInteger)
            .unwrap();

        assert_eq!(out.samples, vec![1, 2, 3, 4]);
        assert_eq!(out.clipped_samples, 0);
    }

    #[test]
    fn scales_normalized_values() {
        let out = Reconstructor::default()
            .reconstruct(&[1.0, -1.0], &[0.5, 0.0], AmplitudeDomain::Normalized)
            .unwrap();

        assert_eq!(out.samples, vec![32767, 16383, -32767, 0]);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let out = Reconstructor::default()
            .reconstruct(
                &[49_150.5, -70_000.0],
                &[32_767.9, f64::NAN],
                AmplitudeDomain::RawInteger,
            )
            .unwrap();

        assert_eq!(out.samples, vec![32767, 32767, -32768, 0]);
        assert_eq!(out.clipped_samples, 2);
    }

    #[test]
    fn rounding_policies_differ_on_fractions() {
        let left = [2.5, -2.7];
        let right = [3.5, 0.4];

        let truncated = Reconstructor::new(RoundingPolicy::TowardZero)
            .reconstruct(&left, &right, AmplitudeDomain::RawInteger)
            .unwrap();
        let nearest = Reconstructor::new(RoundingPolicy::NearestEven)
            .reconstruct(&left, &right, AmplitudeDomain::RawInteger)
            .unwrap();

        assert_eq!(truncated.samples, vec![2, 3, -2, 0]);
        assert_eq!(nearest.samples, vec![2, 4, -3, 0]);
    }

    #[test]
    fn rejects_mismatched_channels() {
        let err = Reconstructor::default()
            .reconstruct(&[0.0], &[], AmplitudeDomain::RawInteger)
            .unwrap_err();
        assert!(err.is_input_error());
    }
}
