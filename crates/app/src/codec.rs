//! File decoding and WAV encoding around the engine.

use std::fs::File;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use spatializer_core::{DecodedAudio, Result, SampleBuffer, SpatialError};
use symphonia::core::audio::SampleBuffer as PcmScratch;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decodes the first audio track of `path` into interleaved 16-bit PCM.
pub fn decode_file(path: &Path) -> Result<DecodedAudio> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| SpatialError::msg(format!("failed to probe {}: {e}", path.display())))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| SpatialError::msg(format!("no audio track in {}", path.display())))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16);
    let bits_per_sample = track.codec_params.bits_per_sample.unwrap_or(16) as u16;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| SpatialError::msg(format!("failed to create decoder: {e}")))?;

    let mut samples = Vec::new();
    let mut scratch: Option<PcmScratch<i16>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(SpatialError::msg(format!("error reading packet: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = e, "skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(SpatialError::msg(format!("failed to decode packet: {e}"))),
        };

        let spec = *decoded.spec();
        sample_rate.get_or_insert(spec.rate);
        channels.get_or_insert(spec.channels.count() as u16);

        let needed = decoded.capacity() * spec.channels.count();
        if scratch.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            scratch = Some(PcmScratch::new(decoded.capacity() as u64, spec));
        }
        if let Some(buf) = scratch.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    let sample_rate =
        sample_rate.ok_or_else(|| SpatialError::msg("decoder did not report a sample rate"))?;
    let channels = channels.ok_or_else(|| SpatialError::msg("decoder did not report channels"))?;

    tracing::debug!(
        path = %path.display(),
        sample_rate,
        channels,
        bits_per_sample,
        samples = samples.len(),
        "decoded audio"
    );

    Ok(DecodedAudio {
        sample_rate,
        channels,
        samples,
        bits_per_sample,
    })
}

/// Writes `buffer` as a 16-bit stereo WAV file.
pub fn write_wav(path: &Path, buffer: &SampleBuffer) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.channel_count(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_error)?;
    for sample in buffer.to_pcm16() {
        writer.write_sample(sample).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)?;

    tracing::debug!(path = %path.display(), frames = buffer.len(), "wrote wav");
    Ok(())
}

fn wav_error(e: hound::Error) -> SpatialError {
    match e {
        hound::Error::IoError(io) => SpatialError::Io(io),
        other => SpatialError::msg(format!("wav encoding failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_round_trip_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let buffer = SampleBuffer::from_pcm16(22_050, 2, &[1, -1, 300, -300, i16::MAX, i16::MIN])
            .unwrap();

        write_wav(&path, &buffer).unwrap();
        let decoded = decode_file(&path).unwrap();

        assert_eq!(decoded.sample_rate, 22_050);
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.bits_per_sample, 16);
        assert_eq!(decoded.samples, buffer.to_pcm16());
    }

    #[test]
    fn decodes_mono_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for sample in [5_i16, -5, 5] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let decoded = decode_file(&path).unwrap();
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.samples, vec![5, -5, 5]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = decode_file(Path::new("/definitely/not/here.wav")).unwrap_err();
        assert!(matches!(err, SpatialError::Io(_)));
    }
}
