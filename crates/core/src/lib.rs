//! Core library for the Spatializer application.
//!
//! The crate turns a stereo (or upmixed mono) recording into a spatially
//! animated mix by modulating channel gain and delay over time. Everything
//! here is pure and synchronous: callers decode audio into a
//! [`SampleBuffer`], hand it to the [`EffectEngine`] together with a pattern
//! name, a speed and a random source, and get a new 16-bit buffer back.
//! File dialogs, codecs and other I/O live in the application crate.

pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod reconstruct;
pub mod timeline;

pub use buffer::{AmplitudeDomain, DecodedAudio, Frame, SampleBuffer};
pub use config::{AppConfig, EngineConfig};
pub use engine::{EffectEngine, EffectParameters, Rendered};
pub use error::{Result, SpatialError};
pub use pattern::{Pattern, PatternContext, StereoChannels};
pub use reconstruct::{Reconstruction, Reconstructor, RoundingPolicy};
pub use timeline::TimeAxis;
