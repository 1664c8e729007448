//! Fader curve helpers.
//!
//! Widgets show send amounts on a position scale that spends most of its
//! travel near unity gain. The curve maps amplitude `g` to position
//! `((6 * log2(g) + 192) / 198) ^ 8`, which puts unity at about 0.78 and
//! +6 dB at the top of the range.

/// Largest amplitude the curve reaches (position 1.0), about +6 dB.
pub const MAX_AMP: f32 = 2.0;

/// Converts a linear amplitude to a fader position in `[0, 1]`.
pub fn amp_to_fader(amp: f32) -> f32 {
    if amp <= 0.0 || !amp.is_finite() {
        return 0.0;
    }
    let base = (6.0 * amp.log2() + 192.0) / 198.0;
    base.max(0.0).powi(8).min(1.0)
}

/// Converts a fader position in `[0, 1]` to a linear amplitude.
pub fn fader_to_amp(fader: f32) -> f32 {
    if fader <= 0.0 || !fader.is_finite() {
        return 0.0;
    }
    let fader = fader.min(1.0);
    let exp = (fader.powf(1.0 / 8.0) * 198.0 - 192.0) / 6.0;
    exp.exp2()
}

/// Returns `true` if `a` and `b` differ by at most `epsilon`.
#[inline]
pub fn floats_equal_epsilon(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_maps_to_zero() {
        assert_eq!(amp_to_fader(0.0), 0.0);
        assert_eq!(amp_to_fader(-1.0), 0.0);
        assert_eq!(fader_to_amp(0.0), 0.0);
    }

    #[test]
    fn test_unity_position() {
        let pos = amp_to_fader(1.0);
        assert!((pos - 0.7818).abs() < 1e-3, "unity at {pos}");
        assert!((fader_to_amp(pos) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_top_of_range() {
        assert!((fader_to_amp(1.0) - MAX_AMP).abs() < 1e-4);
        assert_eq!(amp_to_fader(10.0), 1.0);
    }

    #[test]
    fn test_inverse_on_samples() {
        for amp in [0.01, 0.1, 0.25, 0.5, 0.9, 1.5] {
            let back = fader_to_amp(amp_to_fader(amp));
            assert!((back - amp).abs() / amp < 1e-3, "{amp} -> {back}");
        }
    }

    #[test]
    fn test_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let pos = amp_to_fader(i as f32 / 50.0);
            assert!(pos >= prev);
            prev = pos;
        }
    }

    #[test]
    fn test_epsilon_compare() {
        assert!(floats_equal_epsilon(1.0, 1.000_005, 0.00001));
        assert!(!floats_equal_epsilon(1.0, 1.0001, 0.00001));
    }
}
