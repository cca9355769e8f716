//! Per-object tint generation
//!
//! Hues advance by the golden angle so that any run of consecutive indices
//! stays well separated around the color wheel.

/// Hue increment between consecutive indices, in degrees.
pub const GOLDEN_ANGLE_DEG: f32 = 137.508;

const SATURATION: f32 = 0.7;
const LIGHTNESS: f32 = 0.6;

/// Returns the RGB tint (each channel in 0..=1) for an object seed.
pub fn color_for_index(index: u64) -> [f32; 3] {
    // Reduce in f64 so large seeds keep their fractional hue.
    let hue = ((index as f64 * GOLDEN_ANGLE_DEG as f64) % 360.0) as f32;
    hsl_to_rgb(hue, SATURATION, LIGHTNESS)
}

/// Chooses the color seed for the object at `index`.
///
/// Unnamed objects use their position. Names ending in digits (such as the
/// synthetic `object7`) use that number, and any other name is hashed so the
/// same name always gets the same tint.
pub fn seed_for_object(index: usize, name: Option<&str>) -> u64 {
    let Some(name) = name else {
        return index as u64;
    };

    let digits_start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    if let Some(start) = digits_start {
        if let Ok(number) = name[start..].parse::<u64>() {
            return number;
        }
    }

    fnv1a(name.as_bytes()) % 1000
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(PRIME))
}

/// Convert HSL color to RGB (h: 0-360, s: 0-1, l: 0-1)
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
        assert!(close(hsl_to_rgb(42.0, 0.0, 0.3), [0.3, 0.3, 0.3]));
    }

    #[test]
    fn test_index_zero_is_red_tint() {
        // hue 0, s 0.7, l 0.6 -> q = 0.88, p = 0.32
        assert!(close(color_for_index(0), [0.88, 0.32, 0.32]));
    }

    #[test]
    fn test_deterministic() {
        for i in 0..100 {
            assert_eq!(color_for_index(i), color_for_index(i));
        }
    }

    #[test]
    fn test_consecutive_indices_differ() {
        for i in 0..1000u64 {
            let a = color_for_index(i);
            let b = color_for_index(i + 1);
            assert!(!close(a, b), "indices {} and {} collide", i, i + 1);
        }
    }

    #[test]
    fn test_channels_in_range() {
        for i in 0..500 {
            for c in color_for_index(i) {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_seed_for_object() {
        assert_eq!(seed_for_object(3, None), 3);
        assert_eq!(seed_for_object(0, Some("object12")), 12);
        assert_eq!(seed_for_object(0, Some("part-7")), 7);

        let hashed = seed_for_object(5, Some("bracket"));
        assert_eq!(hashed, seed_for_object(9, Some("bracket")));
        assert!(hashed < 1000);
    }
}
