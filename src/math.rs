//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Vec3` inputs, making them straightforward to unit-test.

use bevy::prelude::{Vec2, Vec3};

/// Upper bound (inclusive) of a raw colour channel roll.
pub const CHANNEL_MAX: u8 = 100;

/// Channels rolled below this value are lifted by the same amount.
pub const BRIGHTEN_THRESHOLD: u8 = 50;

/// Channel sums above this value get one channel toned down.
pub const SATURATION_LIMIT: u16 = 115;

/// Amount subtracted from the picked channel when the sum is too high.
pub const SATURATION_CORRECTION: u8 = 30;

/// Lifts a raw `[0, 100]` channel into `[50, 100]`.
///
/// Values below 50 get +50; everything else passes through.
///
/// # Examples
/// ```
/// # use hex_map::math::brighten_channel;
/// assert_eq!(brighten_channel(0), 50);
/// assert_eq!(brighten_channel(49), 99);
/// assert_eq!(brighten_channel(50), 50);
/// ```
pub fn brighten_channel(raw: u8) -> u8 {
    if raw < BRIGHTEN_THRESHOLD {
        raw + BRIGHTEN_THRESHOLD
    } else {
        raw
    }
}

/// Maps a uniform `[0, 1)` sample onto a channel index (0 red, 1 green, 2 blue).
///
/// `< 0.34` picks red, `> 0.66` picks green, the middle band picks blue.
pub fn pick_channel(sample: f64) -> usize {
    if sample < 0.34 {
        0
    } else if sample > 0.66 {
        1
    } else {
        2
    }
}

/// Tones down one channel when the `[r, g, b]` sum exceeds [`SATURATION_LIMIT`].
///
/// `sample` is the uniform draw that selects the channel (see [`pick_channel`]).
pub fn correct_saturation(channels: [u8; 3], sample: f64) -> [u8; 3] {
    let sum: u16 = channels.iter().map(|&c| u16::from(c)).sum();
    if sum <= SATURATION_LIMIT {
        return channels;
    }
    let mut out = channels;
    let idx = pick_channel(sample);
    out[idx] = out[idx].saturating_sub(SATURATION_CORRECTION);
    out
}

/// Normalises a `[0, 100]` channel to the `[0, 1]` range the renderer expects.
pub fn normalize_channel(channel: u8) -> f32 {
    f32::from(channel) / f32::from(CHANNEL_MAX)
}

/// Vertex data for a flat hexagon fan lying in the XZ plane.
#[derive(Debug, Clone, PartialEq)]
pub struct FanMesh {
    /// Centre vertex followed by the six corners.
    pub positions: Vec<[f32; 3]>,
    /// Up-facing normal per vertex.
    pub normals: Vec<[f32; 3]>,
    /// Planar UVs spanning the corner bounding box.
    pub uvs: Vec<[f32; 2]>,
    /// Six triangles, centre first.
    pub indices: Vec<u16>,
}

/// Builds a triangle fan from six centre-relative hex corners.
///
/// Corner `(x, y)` maps to world `(x, 0, y)`, matching how hex planar
/// positions are placed on the ground plane.
pub fn hex_fan(corners: &[Vec2; 6]) -> FanMesh {
    let min = corners.iter().fold(Vec2::splat(f32::MAX), |acc, c| acc.min(*c));
    let max = corners.iter().fold(Vec2::splat(f32::MIN), |acc, c| acc.max(*c));
    let extent = (max - min).max(Vec2::splat(f32::EPSILON));
    let uv = |p: Vec2| {
        let t = (p - min) / extent;
        [t.x, t.y]
    };

    let mut positions = Vec::with_capacity(7);
    let mut uvs = Vec::with_capacity(7);
    positions.push([0.0, 0.0, 0.0]);
    uvs.push(uv(Vec2::ZERO));
    for c in corners {
        positions.push([c.x, 0.0, c.y]);
        uvs.push(uv(*c));
    }

    let indices = (0..6u16)
        .flat_map(|i| [0, i + 1, (i + 1) % 6 + 1])
        .collect();

    FanMesh {
        normals: vec![[0.0, 1.0, 0.0]; positions.len()],
        positions,
        uvs,
        indices,
    }
}

/// Position on an orbit around `target`.
///
/// `alpha` is the azimuth around +Y measured from +X, `beta` the polar angle
/// measured from +Y (both radians). `beta = 0` sits straight above the target.
pub fn orbit_position(target: Vec3, distance: f32, alpha: f32, beta: f32) -> Vec3 {
    target
        + distance
            * Vec3::new(
                alpha.cos() * beta.sin(),
                beta.cos(),
                alpha.sin() * beta.sin(),
            )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── brighten_channel ───────────────────────────────────────────

    #[test]
    fn low_channels_are_lifted() {
        for raw in 0..BRIGHTEN_THRESHOLD {
            assert_eq!(brighten_channel(raw), raw + 50);
        }
    }

    #[test]
    fn high_channels_pass_through() {
        for raw in BRIGHTEN_THRESHOLD..=CHANNEL_MAX {
            assert_eq!(brighten_channel(raw), raw);
        }
    }

    #[test]
    fn brightened_range_is_50_to_100() {
        for raw in 0..=CHANNEL_MAX {
            let c = brighten_channel(raw);
            assert!((50..=100).contains(&c), "{raw} -> {c}");
        }
    }

    // ── pick_channel ───────────────────────────────────────────────

    #[test]
    fn pick_thresholds() {
        assert_eq!(pick_channel(0.0), 0);
        assert_eq!(pick_channel(0.3399), 0);
        assert_eq!(pick_channel(0.34), 2);
        assert_eq!(pick_channel(0.5), 2);
        assert_eq!(pick_channel(0.66), 2);
        assert_eq!(pick_channel(0.6601), 1);
        assert_eq!(pick_channel(0.999), 1);
    }

    // ── correct_saturation ─────────────────────────────────────────

    #[test]
    fn sum_at_limit_is_untouched() {
        assert_eq!(correct_saturation([40, 40, 35], 0.1), [40, 40, 35]);
    }

    #[test]
    fn red_is_reduced_for_low_sample() {
        assert_eq!(correct_saturation([60, 70, 80], 0.1), [30, 70, 80]);
    }

    #[test]
    fn green_is_reduced_for_high_sample() {
        assert_eq!(correct_saturation([60, 70, 80], 0.9), [60, 40, 80]);
    }

    #[test]
    fn blue_is_reduced_for_middle_sample() {
        assert_eq!(correct_saturation([60, 70, 80], 0.5), [60, 70, 50]);
    }

    #[test]
    fn every_lifted_triple_loses_exactly_30_from_one_channel() {
        let lifted = BRIGHTEN_THRESHOLD..=CHANNEL_MAX;
        for r in lifted.clone() {
            for g in lifted.clone() {
                for b in lifted.clone() {
                    for sample in [0.1, 0.5, 0.9] {
                        let before = [r, g, b];
                        let after = correct_saturation(before, sample);
                        let changed = before.iter().zip(&after).filter(|(x, y)| x != y).count();
                        assert_eq!(changed, 1, "{before:?} -> {after:?}");
                        let sum = |c: [u8; 3]| c.iter().map(|&v| u16::from(v)).sum::<u16>();
                        assert_eq!(sum(before) - sum(after), 30, "{before:?} -> {after:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn correction_never_underflows() {
        assert_eq!(correct_saturation([10, 100, 100], 0.0), [0, 100, 100]);
    }

    // ── normalize_channel ──────────────────────────────────────────

    #[test]
    fn normalize_bounds() {
        assert_eq!(normalize_channel(0), 0.0);
        assert_eq!(normalize_channel(100), 1.0);
        assert!((normalize_channel(50) - 0.5).abs() < 1e-6);
    }

    // ── hex_fan ────────────────────────────────────────────────────

    fn unit_flat_corners() -> [Vec2; 6] {
        std::array::from_fn(|i| {
            let angle = (i as f32) * std::f32::consts::FRAC_PI_3;
            Vec2::new(angle.cos(), angle.sin())
        })
    }

    #[test]
    fn fan_has_centre_plus_six_corners() {
        let fan = hex_fan(&unit_flat_corners());
        assert_eq!(fan.positions.len(), 7);
        assert_eq!(fan.normals.len(), 7);
        assert_eq!(fan.uvs.len(), 7);
        assert_eq!(fan.indices.len(), 18);
        assert_eq!(fan.positions[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn fan_lies_on_ground_plane() {
        let fan = hex_fan(&unit_flat_corners());
        assert!(fan.positions.iter().all(|p| p[1] == 0.0));
        assert!(fan.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn fan_indices_wrap_around() {
        let fan = hex_fan(&unit_flat_corners());
        assert_eq!(&fan.indices[15..18], &[0, 6, 1]);
        assert!(fan.indices.iter().all(|&i| i < 7));
    }

    #[test]
    fn fan_uvs_stay_in_unit_square() {
        let fan = hex_fan(&unit_flat_corners());
        for [u, v] in fan.uvs {
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
        }
    }

    // ── orbit_position ─────────────────────────────────────────────

    #[test]
    fn orbit_straight_above() {
        let p = orbit_position(Vec3::ZERO, 10.0, 0.0, 0.0);
        assert!((p - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn orbit_quarter_turn_half_tilt() {
        let p = orbit_position(
            Vec3::ZERO,
            10.0,
            std::f32::consts::FRAC_PI_2,
            std::f32::consts::FRAC_PI_4,
        );
        let s = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((p - Vec3::new(0.0, s, s)).length() < 1e-4, "got {p:?}");
    }

    #[test]
    fn orbit_keeps_distance() {
        let target = Vec3::new(3.0, 1.0, -2.0);
        let p = orbit_position(target, 7.5, 1.1, 0.7);
        assert!((p.distance(target) - 7.5).abs() < 1e-4);
    }
}
