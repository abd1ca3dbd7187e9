use rand::Rng;

use super::{PatternContext, StereoChannels};

/// Phase-quadrature panning: the left gain follows a raised cosine and the
/// right gain a raised sine, so the source appears to circle the listener.
pub fn circular(ctx: &PatternContext<'_>) -> StereoChannels {
    let omega = ctx.omega();
    modulate(ctx, |t| {
        let angle = omega * t;
        (0.5 * (1.0 + angle.cos()), 0.5 * (1.0 + angle.sin()))
    })
}

/// Opposed panning: as the left gain rises the right gain falls.
pub fn sine(ctx: &PatternContext<'_>) -> StereoChannels {
    let omega = ctx.omega();
    modulate(ctx, |t| {
        let s = (omega * t).sin();
        (0.5 * (1.0 + s), 0.5 * (1.0 - s))
    })
}

/// Draws an independent pan position in `[-1, 1)` for every frame.
pub fn random_pan<R: Rng + ?Sized>(ctx: &PatternContext<'_>, rng: &mut R) -> StereoChannels {
    let mut left = Vec::with_capacity(ctx.len());
    let mut right = Vec::with_capacity(ctx.len());

    for (&l, &r) in ctx.left.iter().zip(ctx.right) {
        let pan: f64 = rng.gen_range(-1.0..1.0);
        left.push(l * 0.5 * (1.0 + pan));
        right.push(r * 0.5 * (1.0 - pan));
    }

    StereoChannels::new(left, right)
}

/// Applies a time-dependent `(left, right)` gain pair to every frame.
fn modulate(ctx: &PatternContext<'_>, gains: impl Fn(f64) -> (f64, f64)) -> StereoChannels {
    let (left, right): (Vec<f64>, Vec<f64>) = ctx
        .left
        .iter()
        .zip(ctx.right)
        .zip(ctx.time_axis.iter())
        .map(|((&l, &r), t)| {
            let (gain_l, gain_r) = gains(t);
            (l * gain_l, r * gain_r)
        })
        .unzip();

    StereoChannels::new(left, right)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::super::test_support::Fixture;
    use super::*;

    #[test]
    fn circular_with_zero_speed_halves_the_right_channel() {
        let fixture =
            Fixture::new(vec![5.0, -5.0, 5.0], vec![5.0, -5.0, 5.0], 8_000).with_speed(0.0);
        let out = circular(&fixture.ctx());

        assert_eq!(out.left, vec![5.0, -5.0, 5.0]);
        assert_eq!(out.right, vec![2.5, -2.5, 2.5]);
    }

    #[test]
    fn circular_quarter_turn_swaps_gains() {
        // Two frames over one second: t = [0, 1]; speed 0.25 puts the second
        // frame a quarter turn around the circle.
        let fixture = Fixture::constant(1.0, 2, 2).with_speed(0.25);
        let out = circular(&fixture.ctx());

        assert_relative_eq!(out.left[0], 1.0);
        assert_relative_eq!(out.right[0], 0.5);
        assert_relative_eq!(out.left[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(out.right[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn sine_gains_are_complementary() {
        let fixture = Fixture::constant(1.0, 50, 10).with_speed(0.8);
        let out = sine(&fixture.ctx());

        for (l, r) in out.left.iter().zip(&out.right) {
            assert_relative_eq!(l + r, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn random_pan_is_reproducible_with_a_seed() {
        let fixture = Fixture::constant(1_000.0, 128, 100);

        let first = random_pan(&fixture.ctx(), &mut StdRng::seed_from_u64(3));
        let second = random_pan(&fixture.ctx(), &mut StdRng::seed_from_u64(3));
        assert_eq!(first, second);

        for (l, r) in first.left.iter().zip(&first.right) {
            assert!((0.0..=1_000.0).contains(l));
            assert_relative_eq!(l + r, 1_000.0, epsilon = 1e-9);
        }
    }
}
