use rand::Rng;

use super::{PatternContext, StereoChannels};

const ECHO_DELAY_SECONDS: f64 = 0.3;
const ECHO_GAIN: f64 = 0.5;
const HAAS_DELAY_SECONDS: f64 = 0.2;
const MAX_RANDOM_DELAY_SECONDS: f64 = 0.5;

/// Mixes a half-level copy of each channel, delayed by 300 ms, back into
/// itself. The sum may exceed full scale; reconstruction saturates it.
pub fn echo_effect(ctx: &PatternContext<'_>) -> StereoChannels {
    let delay = ctx.frames_for(ECHO_DELAY_SECONDS);
    StereoChannels::new(add_echo(ctx.left, delay), add_echo(ctx.right, delay))
}

/// Fixed 200 ms inter-channel offset: the left channel is delayed and the
/// right channel is advanced.
pub fn delay_effect(ctx: &PatternContext<'_>) -> StereoChannels {
    let delay = ctx.frames_for(HAAS_DELAY_SECONDS);
    StereoChannels::new(delayed(ctx.left, delay), advanced(ctx.right, delay))
}

/// Delays only the right channel by a single random amount in `[0, 0.5)` s.
pub fn random_delay<R: Rng + ?Sized>(ctx: &PatternContext<'_>, rng: &mut R) -> StereoChannels {
    let seconds: f64 = rng.gen_range(0.0..MAX_RANDOM_DELAY_SECONDS);
    let delay = ctx.frames_for(seconds);
    tracing::trace!(seconds, delay, "random delay drawn");

    StereoChannels::new(ctx.left.to_vec(), delayed(ctx.right, delay))
}

/// Shifts `input` later by `delay` frames, zero-filling the head and
/// dropping whatever falls past the end.
pub(crate) fn delayed(input: &[f64], delay: usize) -> Vec<f64> {
    let delay = delay.min(input.len());
    let mut out = vec![0.0; delay];
    out.extend_from_slice(&input[..input.len() - delay]);
    out
}

/// Shifts `input` earlier by `advance` frames, zero-filling the tail.
pub(crate) fn advanced(input: &[f64], advance: usize) -> Vec<f64> {
    let advance = advance.min(input.len());
    let mut out = input[advance..].to_vec();
    out.resize(input.len(), 0.0);
    out
}

fn add_echo(input: &[f64], delay: usize) -> Vec<f64> {
    input
        .iter()
        .zip(delayed(input, delay))
        .map(|(&dry, wet)| dry + ECHO_GAIN * wet)
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::super::test_support::Fixture;
    use super::*;

    #[test]
    fn shifts_zero_fill_the_vacated_end() {
        let input = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(delayed(&input, 1), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(advanced(&input, 1), vec![2.0, 3.0, 4.0, 0.0]);
        assert_eq!(delayed(&input, 0), input.to_vec());
        assert_eq!(advanced(&input, 10), vec![0.0; 4]);
    }

    #[test]
    fn echo_adds_half_level_copy() {
        // 10 Hz puts the echo three frames behind the dry signal.
        let fixture = Fixture::new(
            vec![100.0, 0.0, 0.0, 0.0, 0.0],
            vec![0.0, 200.0, 0.0, 0.0, 0.0],
            10,
        );
        let out = echo_effect(&fixture.ctx());

        assert_eq!(out.left, vec![100.0, 0.0, 0.0, 50.0, 0.0]);
        assert_eq!(out.right, vec![0.0, 200.0, 0.0, 0.0, 100.0]);
    }

    #[test]
    fn delay_effect_offsets_channels_in_opposite_directions() {
        // 10 Hz gives a two frame offset.
        let fixture = Fixture::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            10,
        );
        let out = delay_effect(&fixture.ctx());

        assert_eq!(out.left, vec![0.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(out.right, vec![3.0, 4.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn delay_longer_than_buffer_clears_shifted_channels() {
        let fixture = Fixture::constant(100.0, 4, 8_000);
        let out = delay_effect(&fixture.ctx());

        assert_eq!(out.right, vec![0.0; 4]);
        assert_eq!(out.left, vec![0.0; 4]);
    }

    #[test]
    fn random_delay_moves_only_the_right_channel() {
        let fixture = Fixture::new(
            (1..=20).map(f64::from).collect(),
            (1..=20).map(f64::from).collect(),
            20,
        );
        let out = random_delay(&fixture.ctx(), &mut StdRng::seed_from_u64(42));

        assert_eq!(out.left, fixture.left);
        let shift = out.right.iter().take_while(|&&v| v == 0.0).count();
        assert!(shift <= 10, "delay of {shift} frames exceeds 0.5 s");
        assert_eq!(out.right[shift..], fixture.right[..20 - shift]);

        let again = random_delay(&fixture.ctx(), &mut StdRng::seed_from_u64(42));
        assert_eq!(out, again);
    }
}
