use super::{PatternContext, StereoChannels};

const TRANSITION_SECONDS: f64 = 5.0;
const TRANSITION_DEPTH: f64 = 0.95;
const PULSE_SECONDS: f64 = 0.5;

/// Sweeps the image between the speakers in blocks of two five-second
/// ramps.
///
/// Inside each block the right channel ramps up across the first half and
/// back down across the second, while the left channel does the opposite.
/// Both ramps peak at 95% gain. Frames after the last complete block pass
/// through untouched. The result is clipped to the 16-bit range of the
/// buffer's domain.
pub fn smooth_right_left(ctx: &PatternContext<'_>) -> StereoChannels {
    let mut left = ctx.left.to_vec();
    let mut right = ctx.right.to_vec();
    let transition = ctx.frames_for(TRANSITION_SECONDS);

    if transition > 0 {
        let block = 2 * transition;
        for start in (0..ctx.len() / block).map(|cycle| cycle * block) {
            for k in 0..transition {
                let rising = ramp(k, transition) * TRANSITION_DEPTH;
                let falling = ramp(transition - 1 - k, transition) * TRANSITION_DEPTH;

                right[start + k] *= rising;
                left[start + k] *= falling;
                right[start + transition + k] *= falling;
                left[start + transition + k] *= rising;
            }
        }
    }

    let (min, max) = ctx.domain.bounds();
    for sample in left.iter_mut().chain(right.iter_mut()) {
        *sample = sample.clamp(min, max);
    }

    StereoChannels::new(left, right)
}

/// Hard on/off gating with half-second pulses. The right channel uses the
/// left gate reversed end to end.
pub fn pulse_effect(ctx: &PatternContext<'_>) -> StereoChannels {
    let gate = pulse_gate(ctx.len(), ctx.frames_for(PULSE_SECONDS));

    let left = ctx.left.iter().zip(&gate).map(|(s, g)| s * g).collect();
    let right = ctx
        .right
        .iter()
        .zip(gate.iter().rev())
        .map(|(s, g)| s * g)
        .collect();

    StereoChannels::new(left, right)
}

/// Square wave of `len` values: `pulse` ones followed by `pulse` zeros,
/// repeated. A zero-length pulse leaves the signal ungated.
pub fn pulse_gate(len: usize, pulse: usize) -> Vec<f64> {
    if pulse == 0 {
        return vec![1.0; len];
    }

    (0..len)
        .map(|i| if i % (2 * pulse) < pulse { 1.0 } else { 0.0 })
        .collect()
}

/// Position `k` on a linear `0 → 1` ramp of `len` points (endpoints
/// included).
fn ramp(k: usize, len: usize) -> f64 {
    if len <= 1 {
        0.0
    } else {
        k as f64 / (len - 1) as f64
    }
}
