use serde::{Deserialize, Serialize};

use crate::{Result, SpatialError};

/// Largest positive 16-bit PCM magnitude. Normalized audio is scaled by this
/// value when it is brought back into the integer domain.
pub const PCM16_MAX: f64 = i16::MAX as f64;

/// Most negative 16-bit PCM value.
pub const PCM16_MIN: f64 = i16::MIN as f64;

/// Describes how amplitude values inside a [`SampleBuffer`] are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmplitudeDomain {
    /// Native 16-bit PCM range, `[-32768, 32767]`.
    RawInteger,
    /// Values scaled to `[-1.0, 1.0]`.
    #[default]
    Normalized,
}

impl AmplitudeDomain {
    /// Value that represents full positive scale in this domain.
    pub fn full_scale(self) -> f64 {
        match self {
            Self::RawInteger => PCM16_MAX,
            Self::Normalized => 1.0,
        }
    }

    /// Inclusive `(min, max)` bounds of a 16-bit signal expressed in this
    /// domain.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::RawInteger => (PCM16_MIN, PCM16_MAX),
            Self::Normalized => (PCM16_MIN / PCM16_MAX, 1.0),
        }
    }
}

/// One instant of stereo audio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub left: f64,
    pub right: f64,
}

impl Frame {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Builds a frame by duplicating a mono sample into both channels.
    pub fn mono(value: f64) -> Self {
        Self::new(value, value)
    }
}

/// Fully materialised stereo audio.
///
/// Buffers are never mutated by the engine; processing always produces a new
/// buffer. Every frame shares the buffer's [`AmplitudeDomain`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    bits_per_sample: u16,
    domain: AmplitudeDomain,
    frames: Vec<Frame>,
}

impl SampleBuffer {
    /// Number of channels every buffer exposes to the engine.
    pub const CHANNELS: u16 = 2;

    /// Creates a buffer from already paired frames.
    pub fn from_frames(
        sample_rate: u32,
        frames: Vec<Frame>,
        domain: AmplitudeDomain,
    ) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SpatialError::invalid("sample rate must be positive"));
        }

        Ok(Self {
            sample_rate,
            bits_per_sample: 16,
            domain,
            frames,
        })
    }

    /// Builds a stereo buffer from interleaved samples, duplicating mono
    /// input into both channels.
    pub fn from_interleaved(
        sample_rate: u32,
        channels: u16,
        samples: &[f64],
        domain: AmplitudeDomain,
    ) -> Result<Self> {
        let frames: Vec<Frame> = match channels {
            1 => samples.iter().copied().map(Frame::mono).collect(),
            2 => {
                if samples.len() % 2 != 0 {
                    return Err(SpatialError::invalid(format!(
                        "stereo data holds an odd number of samples ({})",
                        samples.len()
                    )));
                }
                samples
                    .chunks_exact(2)
                    .map(|pair| Frame::new(pair[0], pair[1]))
                    .collect()
            }
            other => return Err(SpatialError::UnsupportedChannelCount(other)),
        };

        Self::from_frames(sample_rate, frames, domain)
    }

    /// Builds a raw-integer buffer from interleaved 16-bit PCM.
    pub fn from_pcm16(sample_rate: u32, channels: u16, samples: &[i16]) -> Result<Self> {
        let widened: Vec<f64> = samples.iter().map(|&s| f64::from(s)).collect();
        Self::from_interleaved(sample_rate, channels, &widened, AmplitudeDomain::RawInteger)
    }

    /// Pairs two separate channel arrays into a buffer.
    pub fn from_channels(
        sample_rate: u32,
        left: &[f64],
        right: &[f64],
        domain: AmplitudeDomain,
    ) -> Result<Self> {
        if left.len() != right.len() {
            return Err(SpatialError::invalid(format!(
                "channel lengths differ ({} vs {})",
                left.len(),
                right.len()
            )));
        }

        let frames: Vec<Frame> = left
            .iter()
            .zip(right)
            .map(|(&l, &r)| Frame::new(l, r))
            .collect();
        Self::from_frames(sample_rate, frames, domain)
    }

    /// Records the bit depth the audio had before it reached the engine.
    pub fn with_bits_per_sample(mut self, bits: u16) -> Self {
        self.bits_per_sample = bits;
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        Self::CHANNELS
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn domain(&self) -> AmplitudeDomain {
        self.domain
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Length of the audio in seconds (`frame_count / sample_rate`).
    pub fn duration_seconds(&self) -> f64 {
        self.frames.len() as f64 / f64::from(self.sample_rate)
    }

    /// Copies the left channel out of the buffer.
    pub fn left(&self) -> Vec<f64> {
        self.frames.iter().map(|frame| frame.left).collect()
    }

    /// Copies the right channel out of the buffer.
    pub fn right(&self) -> Vec<f64> {
        self.frames.iter().map(|frame| frame.right).collect()
    }

    /// Re-expresses the buffer in another amplitude domain.
    pub fn into_domain(self, domain: AmplitudeDomain) -> Self {
        if domain == self.domain {
            return self;
        }

        let (to, from) = (domain.full_scale(), self.domain.full_scale());
        let frames = self
            .frames
            .into_iter()
            .map(|frame| Frame::new(frame.left * to / from, frame.right * to / from))
            .collect();

        Self {
            frames,
            domain,
            ..self
        }
    }

    /// Interleaved 16-bit PCM suitable for a WAV encoder. Values are scaled
    /// out of the normalized domain when needed, saturated and truncated
    /// toward zero.
    pub fn to_pcm16(&self) -> Vec<i16> {
        let scale = PCM16_MAX / self.domain.full_scale();
        let mut interleaved = Vec::with_capacity(self.frames.len() * 2);
        for frame in &self.frames {
            interleaved.push(saturate_pcm16(frame.left * scale));
            interleaved.push(saturate_pcm16(frame.right * scale));
        }
        interleaved
    }
}

fn saturate_pcm16(value: f64) -> i16 {
    value.clamp(PCM16_MIN, PCM16_MAX) as i16
}

/// Audio as handed over by a decoder: interleaved PCM already normalised to
/// 16-bit signed samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
    /// Bit depth of the source before conversion to 16-bit.
    pub bits_per_sample: u16,
}

impl DecodedAudio {
    /// Upmixes the decoded samples into a stereo buffer expressed in the
    /// requested working domain.
    pub fn into_buffer(self, domain: AmplitudeDomain) -> Result<SampleBuffer> {
        let buffer = SampleBuffer::from_pcm16(self.sample_rate, self.channels, &self.samples)?
            .with_bits_per_sample(self.bits_per_sample);
        Ok(buffer.into_domain(domain))
    }
}
