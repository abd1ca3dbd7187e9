//! Library of spatial patterns.
//!
//! Every pattern is a pure function over whole channel arrays: it reads the
//! input channels from a [`PatternContext`] and returns freshly allocated
//! [`StereoChannels`] of the same length. Randomised patterns draw from the
//! caller's generator and never touch global state.

mod delay;
mod gating;
mod modulation;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{AmplitudeDomain, TimeAxis};

pub use delay::{delay_effect, echo_effect, random_delay};
pub use gating::{pulse_effect, pulse_gate, smooth_right_left};
pub use modulation::{circular, random_pan, sine};

/// Named channel-gain or delay modulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pattern {
    #[default]
    Circular,
    Sine,
    #[serde(rename = "Smooth Right-Left")]
    SmoothRightLeft,
    #[serde(rename = "Random Pan")]
    RandomPan,
    #[serde(rename = "Delay Effect")]
    DelayEffect,
    #[serde(rename = "Random Delay")]
    RandomDelay,
    #[serde(rename = "Pulse Effect")]
    PulseEffect,
    #[serde(rename = "Echo Effect")]
    EchoEffect,
}

impl Pattern {
    /// Every pattern, in the order they are offered to users.
    pub const ALL: [Pattern; 8] = [
        Pattern::Circular,
        Pattern::Sine,
        Pattern::SmoothRightLeft,
        Pattern::RandomPan,
        Pattern::DelayEffect,
        Pattern::RandomDelay,
        Pattern::PulseEffect,
        Pattern::EchoEffect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Circular => "Circular",
            Self::Sine => "Sine",
            Self::SmoothRightLeft => "Smooth Right-Left",
            Self::RandomPan => "Random Pan",
            Self::DelayEffect => "Delay Effect",
            Self::RandomDelay => "Random Delay",
            Self::PulseEffect => "Pulse Effect",
            Self::EchoEffect => "Echo Effect",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pattern| pattern.name() == name)
    }

    /// Looks up `name`, substituting [`Pattern::Circular`] for anything
    /// unrecognised.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::debug!(requested = name, "unknown pattern, using Circular");
            Self::default()
        })
    }

    /// Whether the pattern consumes entropy from the random source.
    pub fn is_randomized(self) -> bool {
        matches!(self, Self::RandomPan | Self::RandomDelay)
    }

    /// Runs the pattern over the channels in `ctx`.
    pub fn apply<R: Rng + ?Sized>(self, ctx: &PatternContext<'_>, rng: &mut R) -> StereoChannels {
        match self {
            Self::Circular => circular(ctx),
            Self::Sine => sine(ctx),
            Self::SmoothRightLeft => smooth_right_left(ctx),
            Self::RandomPan => random_pan(ctx, rng),
            Self::DelayEffect => delay_effect(ctx),
            Self::RandomDelay => random_delay(ctx, rng),
            Self::PulseEffect => pulse_effect(ctx),
            Self::EchoEffect => echo_effect(ctx),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only inputs shared by every pattern.
#[derive(Debug, Clone, Copy)]
pub struct PatternContext<'a> {
    pub left: &'a [f64],
    pub right: &'a [f64],
    pub sample_rate: u32,
    pub time_axis: &'a TimeAxis,
    pub speed: f64,
    pub domain: AmplitudeDomain,
}

impl PatternContext<'_> {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Angular rate `2π·speed` used by the periodic patterns.
    pub(crate) fn omega(&self) -> f64 {
        std::f64::consts::TAU * self.speed
    }

    /// Converts a duration into a whole number of frames at this context's
    /// sample rate.
    pub(crate) fn frames_for(&self, seconds: f64) -> usize {
        frames_for(self.sample_rate, seconds)
    }
}

/// Output of a pattern: two channel arrays of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StereoChannels {
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl StereoChannels {
    pub fn new(left: Vec<f64>, right: Vec<f64>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "channels must have the same length");
        Self { left, right }
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Rounds `sample_rate · seconds` to the nearest frame count.
pub fn frames_for(sample_rate: u32, seconds: f64) -> usize {
    (f64::from(sample_rate) * seconds).round().max(0.0) as usize
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Owns the channels and axis a [`PatternContext`] borrows from.
    pub struct Fixture {
        pub left: Vec<f64>,
        pub right: Vec<f64>,
        pub sample_rate: u32,
        pub axis: TimeAxis,
        pub speed: f64,
        pub domain: AmplitudeDomain,
    }

    impl Fixture {
        pub fn new(left: Vec<f64>, right: Vec<f64>, sample_rate: u32) -> Self {
            let duration = left.len() as f64 / f64::from(sample_rate);
            Self {
                axis: TimeAxis::new(left.len(), duration),
                left,
                right,
                sample_rate,
                speed: 0.1,
                domain: AmplitudeDomain::RawInteger,
            }
        }

        pub fn constant(value: f64, len: usize, sample_rate: u32) -> Self {
            Self::new(vec![value; len], vec![value; len], sample_rate)
        }

        pub fn with_speed(mut self, speed: f64) -> Self {
            self.speed = speed;
            self
        }

        pub fn ctx(&self) -> PatternContext<'_> {
            PatternContext {
                left: &self.left,
                right: &self.right,
                sample_rate: self.sample_rate,
                time_axis: &self.axis,
                speed: self.speed,
                domain: self.domain,
            }
        }
    }
}
