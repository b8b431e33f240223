//! Hover tracking and ray picking
//!
//! The pointer can rest on the nucleus or on exactly one shell at a time.
//! Picking casts a ray from the cursor through the camera and tests the
//! nucleus sphere and a radial band around each shell ring; the bands do
//! not overlap, which is what enforces the one-region-at-a-time rule.

use common::OrbitCamera;
use glam::{Vec3, Vec4};

/// Width of the pickable band on either side of a shell ring.
/// Must stay below half the shell radius step so bands never overlap.
pub const SHELL_PICK_BAND: f32 = 0.2;

/// The region currently under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverTarget {
    #[default]
    None,
    Nucleus,
    Shell(usize),
}

/// Tracks the single hovered region.
///
/// Entering a region implicitly clears any other; a leave event only
/// clears the state when it matches the current target, so out-of-order
/// enter/leave delivery cannot wedge the machine.
#[derive(Debug, Default)]
pub struct HoverState {
    current: HoverTarget,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> HoverTarget {
        self.current
    }

    /// Pointer entered a region; always trusted, replaces any other target
    pub fn enter(&mut self, target: HoverTarget) {
        self.current = target;
    }

    /// Pointer left a region; ignored unless it matches the current target
    pub fn leave(&mut self, target: HoverTarget) {
        if self.current == target {
            self.current = HoverTarget::None;
        }
    }

    /// Fold a per-frame pick result into enter/leave transitions
    pub fn observe(&mut self, picked: HoverTarget) {
        if picked == self.current {
            return;
        }
        self.leave(self.current);
        if picked != HoverTarget::None {
            self.enter(picked);
        }
    }
}

/// Build a world-space ray from a cursor position.
///
/// Returns `(origin, direction)` with the direction normalized.
pub fn cursor_ray(
    cursor: (f32, f32),
    viewport: (u32, u32),
    camera: &OrbitCamera,
) -> (Vec3, Vec3) {
    let ndc_x = (cursor.0 / viewport.0.max(1) as f32) * 2.0 - 1.0;
    let ndc_y = 1.0 - (cursor.1 / viewport.1.max(1) as f32) * 2.0;

    let inverse = camera.view_projection().inverse();
    let point = inverse * Vec4::new(ndc_x, ndc_y, 0.5, 1.0);
    let point = point.truncate() / point.w;

    let origin = camera.position;
    (origin, (point - origin).normalize_or_zero())
}

/// Test a ray against the nucleus sphere and the shell ring bands.
///
/// The atom sits at the world origin with shells in the y = 0 plane.
/// Nucleus takes precedence over shells when both would match.
pub fn pick(
    origin: Vec3,
    direction: Vec3,
    nucleus_radius: f32,
    shell_radii: &[f32],
) -> HoverTarget {
    // Sphere test against the nucleus at the origin
    let to_center = -origin;
    let along = to_center.dot(direction);
    if along > 0.0 {
        let closest_sq = to_center.length_squared() - along * along;
        if closest_sq <= nucleus_radius * nucleus_radius {
            return HoverTarget::Nucleus;
        }
    }

    // Intersect the shell plane (y = 0)
    if direction.y.abs() < 1e-6 {
        return HoverTarget::None;
    }
    let t = -origin.y / direction.y;
    if t <= 0.0 {
        return HoverTarget::None;
    }
    let hit = origin + direction * t;
    let ring_distance = (hit.x * hit.x + hit.z * hit.z).sqrt();

    if ring_distance <= nucleus_radius {
        return HoverTarget::Nucleus;
    }

    let mut best: Option<(usize, f32)> = None;
    for (index, radius) in shell_radii.iter().enumerate() {
        let gap = (ring_distance - radius).abs();
        if gap <= SHELL_PICK_BAND && best.map_or(true, |(_, g)| gap < g) {
            best = Some((index, gap));
        }
    }

    match best {
        Some((index, _)) => HoverTarget::Shell(index),
        None => HoverTarget::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_is_mutually_exclusive() {
        let mut state = HoverState::new();
        state.enter(HoverTarget::Shell(0));
        assert_eq!(state.current(), HoverTarget::Shell(0));

        state.enter(HoverTarget::Shell(2));
        assert_eq!(state.current(), HoverTarget::Shell(2));

        state.enter(HoverTarget::Nucleus);
        assert_eq!(state.current(), HoverTarget::Nucleus);
    }

    #[test]
    fn test_leave_only_clears_matching_target() {
        let mut state = HoverState::new();
        state.enter(HoverTarget::Shell(1));

        // Stale leave from a region we already left
        state.leave(HoverTarget::Shell(0));
        assert_eq!(state.current(), HoverTarget::Shell(1));

        state.leave(HoverTarget::Shell(1));
        assert_eq!(state.current(), HoverTarget::None);
    }

    #[test]
    fn test_out_of_order_enter_then_leave() {
        let mut state = HoverState::new();
        state.enter(HoverTarget::Shell(0));
        state.enter(HoverTarget::Shell(1));
        // The leave for shell 0 arrives late; most recent enter wins
        state.leave(HoverTarget::Shell(0));
        assert_eq!(state.current(), HoverTarget::Shell(1));
    }

    #[test]
    fn test_observe_folds_pick_results() {
        let mut state = HoverState::new();
        state.observe(HoverTarget::Nucleus);
        assert_eq!(state.current(), HoverTarget::Nucleus);

        state.observe(HoverTarget::Shell(3));
        assert_eq!(state.current(), HoverTarget::Shell(3));

        state.observe(HoverTarget::None);
        assert_eq!(state.current(), HoverTarget::None);
    }

    #[test]
    fn test_ray_through_origin_picks_nucleus() {
        let target = pick(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            0.4,
            &[1.0, 1.5, 2.0],
        );
        assert_eq!(target, HoverTarget::Nucleus);
    }

    #[test]
    fn test_ray_through_ring_band_picks_that_shell() {
        let target = pick(
            Vec3::new(0.0, 5.0, 1.5),
            Vec3::new(0.0, -1.0, 0.0),
            0.4,
            &[1.0, 1.5, 2.0],
        );
        assert_eq!(target, HoverTarget::Shell(1));
    }

    #[test]
    fn test_ray_outside_all_bands_picks_nothing() {
        let target = pick(
            Vec3::new(0.0, 5.0, 10.0),
            Vec3::new(0.0, -1.0, 0.0),
            0.4,
            &[1.0, 1.5, 2.0],
        );
        assert_eq!(target, HoverTarget::None);

        // Parallel to the shell plane, missing the nucleus
        let target = pick(
            Vec3::new(0.0, 3.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            0.4,
            &[1.0, 1.5, 2.0],
        );
        assert_eq!(target, HoverTarget::None);
    }

    #[test]
    fn test_cursor_ray_through_screen_center_hits_nucleus() {
        let camera = OrbitCamera::new(16.0 / 9.0);
        let (origin, direction) = cursor_ray((640.0, 360.0), (1280, 720), &camera);
        let target = pick(origin, direction, 0.4, &[1.0, 1.5]);
        assert_eq!(target, HoverTarget::Nucleus);
    }
}
