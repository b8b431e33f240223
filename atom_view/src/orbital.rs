//! Orbital geometry generation
//!
//! Places electrons evenly around a ring with a small vertical jitter. The
//! jitter rng is seeded per shell, so a shell's layout is reproducible for
//! as long as the scene lives and across regenerations with the same inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Half-width of the vertical jitter band applied to each electron
pub const JITTER_HALF_WIDTH: f32 = 0.15;

/// One electron's resting position on its shell, before any rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Compute resting positions for `electron_count` electrons on a ring.
///
/// Electron `i` sits at angle `i/n * 2π` on the ring of the given radius,
/// with `y` drawn uniformly from `[-JITTER_HALF_WIDTH, +JITTER_HALF_WIDTH]`.
/// A count of zero yields an empty vec.
pub fn positions(shell_index: usize, electron_count: u32, radius: f32) -> Vec<OrbitalPosition> {
    let mut rng = StdRng::seed_from_u64(0x0513_0000 ^ shell_index as u64);

    (0..electron_count)
        .map(|i| {
            let angle = (i as f32 / electron_count as f32) * TAU;
            OrbitalPosition {
                x: angle.cos() * radius,
                y: rng.gen_range(-JITTER_HALF_WIDTH..=JITTER_HALF_WIDTH),
                z: angle.sin() * radius,
            }
        })
        .collect()
}

/// Cached electron layout for one shell.
///
/// Positions are generated once per `(electron_count, radius)` pair and only
/// regenerated when either changes. Hover state never touches this cache, so
/// electrons hold still while being inspected.
#[derive(Debug, Clone)]
pub struct ShellGeometry {
    shell_index: usize,
    electron_count: u32,
    radius: f32,
    positions: Vec<OrbitalPosition>,
}

impl ShellGeometry {
    pub fn new(shell_index: usize, electron_count: u32, radius: f32) -> Self {
        Self {
            shell_index,
            electron_count,
            radius,
            positions: positions(shell_index, electron_count, radius),
        }
    }

    /// Regenerate only if electron count or radius changed
    pub fn update(&mut self, electron_count: u32, radius: f32) {
        if electron_count != self.electron_count || radius != self.radius {
            self.electron_count = electron_count;
            self.radius = radius;
            self.positions = positions(self.shell_index, electron_count, radius);
        }
    }

    pub fn positions(&self) -> &[OrbitalPosition] {
        &self.positions
    }

    pub fn electron_count(&self) -> u32 {
        self.electron_count
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_position_count_matches_electron_count() {
        for count in [0u32, 1, 2, 7, 8, 14, 18, 32] {
            assert_eq!(positions(0, count, 1.5).len(), count as usize);
        }
    }

    #[test]
    fn test_zero_electrons_yield_empty_sequence() {
        assert!(positions(3, 0, 2.0).is_empty());
    }

    #[test]
    fn test_all_electrons_at_ring_radius() {
        let radius = 2.5;
        for pos in positions(1, 8, radius) {
            let axis_distance = (pos.x * pos.x + pos.z * pos.z).sqrt();
            assert!((axis_distance - radius).abs() < EPS);
        }
    }

    #[test]
    fn test_even_angular_spacing() {
        let count = 14;
        let points = positions(2, count, 2.0);
        let expected_step = TAU / count as f32;
        for i in 0..count as usize {
            let a = points[i].z.atan2(points[i].x);
            let b = points[(i + 1) % count as usize].z.atan2(points[(i + 1) % count as usize].x);
            let mut step = b - a;
            if step < 0.0 {
                step += TAU;
            }
            assert!((step - expected_step).abs() < 1e-4);
        }
    }

    #[test]
    fn test_jitter_stays_in_band() {
        for pos in positions(0, 18, 3.0) {
            assert!(pos.y.abs() <= JITTER_HALF_WIDTH + EPS);
        }
    }

    #[test]
    fn test_regeneration_is_deterministic() {
        let a = positions(1, 8, 1.5);
        let b = positions(1, 8, 1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_electron_rests_on_x_axis() {
        let points = positions(0, 1, 1.0);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 1.0).abs() < EPS);
        assert!(points[0].z.abs() < EPS);
        assert!(points[0].y.abs() <= JITTER_HALF_WIDTH);
    }

    #[test]
    fn test_cache_returns_identical_positions() {
        let mut geometry = ShellGeometry::new(0, 8, 1.0);
        let before = geometry.positions().to_vec();

        // Same inputs: nothing regenerates
        geometry.update(8, 1.0);
        assert_eq!(geometry.positions(), &before[..]);

        // Changed radius: regenerated at the new radius
        geometry.update(8, 2.0);
        assert_eq!(geometry.positions().len(), 8);
        let axis_distance =
            (geometry.positions()[0].x.powi(2) + geometry.positions()[0].z.powi(2)).sqrt();
        assert!((axis_distance - 2.0).abs() < EPS);
    }
}
