use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    AmplitudeDomain, EngineConfig, Pattern, PatternContext, Reconstructor, Result, SampleBuffer,
    SpatialError, StereoChannels, TimeAxis,
};

/// Parameters collected from the user for one conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectParameters {
    pub pattern: String,
    /// Modulation rate in cycles per second.
    pub speed: f64,
}

impl EffectParameters {
    /// Lower end of the speed control offered to users.
    pub const MIN_SPEED: f64 = 0.01;
    /// Upper end of the speed control offered to users.
    pub const MAX_SPEED: f64 = 1.5;
    pub const DEFAULT_SPEED: f64 = 0.1;

    pub fn new(pattern: impl Into<String>, speed: f64) -> Self {
        Self {
            pattern: pattern.into(),
            speed,
        }
    }

    /// Whether `speed` sits inside the range the controls offer. Values
    /// outside it are still valid modulation rates.
    pub fn is_in_ui_range(&self) -> bool {
        (Self::MIN_SPEED..=Self::MAX_SPEED).contains(&self.speed)
    }
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self::new(Pattern::default().name(), Self::DEFAULT_SPEED)
    }
}

/// Finished conversion together with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// 16-bit, raw-integer stereo audio.
    pub buffer: SampleBuffer,
    /// Pattern that actually ran after name resolution.
    pub pattern: Pattern,
    pub clipped_samples: usize,
}

/// Applies a spatial pattern to a whole buffer in one synchronous pass.
///
/// The engine holds no per-call state; the only sequential state involved is
/// the random source the caller passes in.
#[derive(Debug, Clone, Default)]
pub struct EffectEngine {
    config: EngineConfig,
}

impl EffectEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Spatialises `buffer` with the named pattern and returns new 16-bit
    /// raw-integer audio of the same length and sample rate.
    pub fn process<R: Rng + ?Sized>(
        &self,
        buffer: &SampleBuffer,
        pattern: &str,
        speed: f64,
        rng: &mut R,
    ) -> Result<SampleBuffer> {
        let params = EffectParameters::new(pattern, speed);
        Ok(self.render(buffer, &params, rng)?.buffer)
    }

    /// Like [`process`](Self::process) but also reports which pattern ran
    /// and how many samples were saturated.
    pub fn render<R: Rng + ?Sized>(
        &self,
        buffer: &SampleBuffer,
        params: &EffectParameters,
        rng: &mut R,
    ) -> Result<Rendered> {
        if buffer.is_empty() {
            return Err(SpatialError::invalid("cannot process an empty buffer"));
        }
        if buffer.channel_count() != SampleBuffer::CHANNELS {
            return Err(SpatialError::UnsupportedChannelCount(buffer.channel_count()));
        }
        if !params.speed.is_finite() {
            return Err(SpatialError::invalid(format!(
                "speed must be a finite number, got {}",
                params.speed
            )));
        }

        let pattern = Pattern::resolve(&params.pattern);
        let left = buffer.left();
        let right = buffer.right();

        // A single frame has no time span to modulate over.
        let channels = if buffer.len() <= 1 {
            tracing::debug!(%pattern, "single-frame buffer passed through unmodified");
            StereoChannels::new(left, right)
        } else {
            let time_axis = TimeAxis::for_buffer(buffer);
            let ctx = PatternContext {
                left: &left,
                right: &right,
                sample_rate: buffer.sample_rate(),
                time_axis: &time_axis,
                speed: params.speed,
                domain: buffer.domain(),
            };
            tracing::debug!(
                %pattern,
                frames = buffer.len(),
                speed = params.speed,
                "applying pattern"
            );
            pattern.apply(&ctx, rng)
        };

        let reconstruction = Reconstructor::new(self.config.rounding).reconstruct(
            &channels.left,
            &channels.right,
            buffer.domain(),
        )?;

        let output = SampleBuffer::from_pcm16(
            buffer.sample_rate(),
            SampleBuffer::CHANNELS,
            &reconstruction.samples,
        )?;
        debug_assert_eq!(output.len(), buffer.len());
        debug_assert_eq!(output.domain(), AmplitudeDomain::RawInteger);

        Ok(Rendered {
            buffer: output,
            pattern,
            clipped_samples: reconstruction.clipped_samples,
        })
    }
}
