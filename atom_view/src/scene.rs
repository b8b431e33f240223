//! Scene composition for one element
//!
//! Builds the nucleus and one shell per `electron_shells` entry, owns the
//! hover flags, and advances everything from a single elapsed-time value.
//! All rotations and scales are pure functions of `(elapsed, hovered)`, so
//! a frame can be recomputed idempotently at any time.

use crate::elements::{Element, ELECTRON_COLOR};
use crate::elements::parse_hex_color;
use crate::hover::{HoverState, HoverTarget};
use crate::orbital::ShellGeometry;

/// Innermost shell ring radius
pub const SHELL_BASE_RADIUS: f32 = 1.0;
/// Radius step between consecutive shells
pub const SHELL_RADIUS_STEP: f32 = 0.5;
/// Angular speed of the innermost shell (rad/s)
pub const SHELL_BASE_SPEED: f32 = 0.5;
/// Speed lost per shell index
pub const SHELL_SPEED_FALLOFF: f32 = 0.1;
/// Outer shells never stop or reverse
pub const SHELL_SPEED_FLOOR: f32 = 0.1;

/// Nucleus size curve: clamp(ln(z) * scale + base, 0, max)
pub const NUCLEUS_SIZE_SCALE: f32 = 0.12;
pub const NUCLEUS_SIZE_BASE: f32 = 0.25;
pub const NUCLEUS_SIZE_MAX: f32 = 0.5;
/// Nucleus spin rate (rad/s)
pub const NUCLEUS_SPIN_RATE: f32 = 0.5;
/// Hover pulse: scale = 1 + amplitude * sin(rate * t)
pub const NUCLEUS_PULSE_AMPLITUDE: f32 = 0.08;
pub const NUCLEUS_PULSE_RATE: f32 = 2.5;

/// Two-level emissive feedback shared by nucleus and electrons
pub const EMISSIVE_IDLE: f32 = 0.2;
pub const EMISSIVE_HOVERED: f32 = 0.6;
/// Two-level ring opacity
pub const RING_ALPHA_IDLE: f32 = 0.3;
pub const RING_ALPHA_HOVERED: f32 = 0.7;
/// Hover wobble: sinusoidal tilt superimposed on the base rotation
pub const WOBBLE_RATE: f32 = 2.0;
pub const WOBBLE_AMPLITUDE: f32 = 0.15;

/// Visual nucleus radius for an atomic number.
///
/// Log-scaled so size differences stay legible across the whole table,
/// capped so heavy elements never swallow their innermost shell. An
/// atomic number of zero degrades to the minimum size.
pub fn nucleus_size(atomic_number: u32) -> f32 {
    let z = atomic_number.max(1) as f32;
    (z.ln() * NUCLEUS_SIZE_SCALE + NUCLEUS_SIZE_BASE).clamp(0.0, NUCLEUS_SIZE_MAX)
}

/// Ring radius for a shell index
pub fn shell_radius(shell_index: usize) -> f32 {
    SHELL_BASE_RADIUS + shell_index as f32 * SHELL_RADIUS_STEP
}

/// Angular speed for a shell index; outer shells rotate slower
pub fn shell_speed(shell_index: usize) -> f32 {
    (SHELL_BASE_SPEED - shell_index as f32 * SHELL_SPEED_FALLOFF).max(SHELL_SPEED_FLOOR)
}

/// The nucleus sphere
#[derive(Debug)]
pub struct Nucleus {
    pub atomic_number: u32,
    pub color: [f32; 4],
    pub hovered: bool,
}

impl Nucleus {
    pub fn size(&self) -> f32 {
        nucleus_size(self.atomic_number)
    }

    /// Spin angle about the vertical axis at time `t`
    pub fn rotation(&self, t: f32) -> f32 {
        t * NUCLEUS_SPIN_RATE
    }

    /// Pulse scale at time `t`; pinned to 1 unless hovered
    pub fn scale(&self, t: f32) -> f32 {
        if self.hovered {
            1.0 + NUCLEUS_PULSE_AMPLITUDE * (NUCLEUS_PULSE_RATE * t).sin()
        } else {
            1.0
        }
    }

    pub fn emissive(&self) -> f32 {
        if self.hovered {
            EMISSIVE_HOVERED
        } else {
            EMISSIVE_IDLE
        }
    }
}

/// One electron shell: ring plus cached electron markers.
///
/// The ring is tinted with the element color; electron markers share the
/// fixed [`ELECTRON_COLOR`] accent.
#[derive(Debug)]
pub struct Shell {
    pub index: usize,
    pub ring_color: [f32; 4],
    pub hovered: bool,
    geometry: ShellGeometry,
    angular_speed: f32,
}

impl Shell {
    pub fn new(index: usize, electron_count: u32, ring_color: [f32; 4]) -> Self {
        Self {
            index,
            ring_color,
            hovered: false,
            geometry: ShellGeometry::new(index, electron_count, shell_radius(index)),
            angular_speed: shell_speed(index),
        }
    }

    pub fn radius(&self) -> f32 {
        self.geometry.radius()
    }

    pub fn electron_count(&self) -> u32 {
        self.geometry.electron_count()
    }

    pub fn geometry(&self) -> &ShellGeometry {
        &self.geometry
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    /// Group rotation about the vertical axis at time `t`
    pub fn rotation(&self, t: f32) -> f32 {
        t * self.angular_speed
    }

    /// Additive tilt wobble; zero unless hovered
    pub fn tilt(&self, t: f32) -> f32 {
        if self.hovered {
            WOBBLE_AMPLITUDE * (WOBBLE_RATE * t).sin()
        } else {
            0.0
        }
    }

    pub fn ring_alpha(&self) -> f32 {
        if self.hovered {
            RING_ALPHA_HOVERED
        } else {
            RING_ALPHA_IDLE
        }
    }

    pub fn emissive(&self) -> f32 {
        if self.hovered {
            EMISSIVE_HOVERED
        } else {
            EMISSIVE_IDLE
        }
    }
}

/// Everything composed for one element: nucleus, shells, captions, hover.
pub struct AtomScene {
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_number: u32,
    pub nucleus: Nucleus,
    pub shells: Vec<Shell>,
    pub electron_color: [f32; 4],
    hover: HoverState,
    elapsed: f32,
    frames: u64,
}

impl AtomScene {
    /// Compose the scene for one element.
    ///
    /// Degrades gracefully on bad data: an empty shell list builds a
    /// nucleus-only scene, a zero-electron shell keeps its bare ring.
    pub fn new(element: &Element) -> Self {
        let tint = element.color_rgba();
        let electron_color = parse_hex_color(ELECTRON_COLOR).unwrap_or(tint);

        let shells = element
            .electron_shells
            .iter()
            .enumerate()
            .map(|(index, &count)| Shell::new(index, count, tint))
            .collect();

        Self {
            symbol: element.symbol,
            name: element.name,
            atomic_number: element.atomic_number,
            nucleus: Nucleus {
                atomic_number: element.atomic_number,
                color: tint,
                hovered: false,
            },
            shells,
            electron_color,
            hover: HoverState::new(),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Advance the scene to an absolute elapsed time.
    ///
    /// Elapsed time never rewinds; a stale smaller value is clamped.
    pub fn advance(&mut self, elapsed: f32) {
        self.elapsed = elapsed.max(self.elapsed);
        self.frames += 1;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fold a pick result into the hover state and per-part flags
    pub fn observe_hover(&mut self, picked: HoverTarget) {
        self.hover.observe(picked);
        self.apply_hover();
    }

    pub fn hover_target(&self) -> HoverTarget {
        self.hover.current()
    }

    fn apply_hover(&mut self) {
        let current = self.hover.current();
        self.nucleus.hovered = current == HoverTarget::Nucleus;
        for shell in &mut self.shells {
            shell.hovered = current == HoverTarget::Shell(shell.index);
        }
    }

    /// Ring radii, innermost first, for picking
    pub fn shell_radii(&self) -> Vec<f32> {
        self.shells.iter().map(|s| s.radius()).collect()
    }

    /// Annotation for the hovered region, if any
    pub fn hover_caption(&self) -> Option<String> {
        match self.hover.current() {
            HoverTarget::Nucleus => {
                Some(format!("Nucleus: {} protons", self.atomic_number))
            }
            HoverTarget::Shell(index) => self
                .shells
                .get(index)
                .map(|shell| format!("Shell {}: {} electrons", index + 1, shell.electron_count())),
            HoverTarget::None => None,
        }
    }
}

/// Mount/unmount lifecycle around [`AtomScene`].
///
/// The host drives `advance` from its frame callback; once the view is
/// unmounted the call becomes a no-op, so a stale callback can fire
/// without touching anything.
#[derive(Default)]
pub struct AtomView {
    scene: Option<AtomScene>,
}

impl AtomView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a fresh scene for the element, replacing any previous one
    pub fn mount(&mut self, element: &Element) {
        log::info!("Mounting 3D model for {} ({})", element.name, element.symbol);
        self.scene = Some(AtomScene::new(element));
    }

    /// Tear the scene down, releasing its cached geometry
    pub fn unmount(&mut self) {
        self.scene = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.scene.is_some()
    }

    pub fn scene(&self) -> Option<&AtomScene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut AtomScene> {
        self.scene.as_mut()
    }

    /// Advance the mounted scene; no-op when unmounted
    pub fn advance(&mut self, elapsed: f32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.advance(elapsed);
        }
    }

    /// Frames advanced by the mounted scene, zero when unmounted
    pub fn frames(&self) -> u64 {
        self.scene.as_ref().map_or(0, |s| s.frames())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{element_by_atomic_number, Category, MatterState};

    fn test_element(atomic_number: u32, shells: &'static [u32]) -> Element {
        Element {
            atomic_number,
            symbol: "??",
            name: "Testium",
            atomic_weight: 0.0,
            group: None,
            period: 1,
            block: "s",
            category: Category::Nonmetal,
            state: MatterState::Gas,
            discoverer: None,
            electron_shells: shells,
            color: "#ffffff",
        }
    }

    #[test]
    fn test_nucleus_size_monotonic_and_capped() {
        let mut last = 0.0;
        for z in 1..=118 {
            let size = nucleus_size(z);
            assert!(size >= last, "size shrank at z={}", z);
            assert!(size <= NUCLEUS_SIZE_MAX);
            last = size;
        }
    }

    #[test]
    fn test_nucleus_size_degrades_on_zero() {
        assert_eq!(nucleus_size(0), nucleus_size(1));
    }

    #[test]
    fn test_shell_speed_has_floor() {
        for index in 0..12 {
            assert!(shell_speed(index) >= SHELL_SPEED_FLOOR);
        }
        // Far outer shells still rotate forward
        assert_eq!(shell_speed(9), SHELL_SPEED_FLOOR);
    }

    #[test]
    fn test_hydrogen_scene() {
        let hydrogen = element_by_atomic_number(1).unwrap();
        let scene = AtomScene::new(hydrogen);

        assert_eq!(scene.shells.len(), 1);
        assert_eq!(scene.shells[0].electron_count(), 1);

        // At t = 0, before any rotation, the lone electron rests on the
        // positive x axis at the ring radius, jitter aside.
        let positions = scene.shells[0].geometry().positions();
        assert_eq!(positions.len(), 1);
        assert!((positions[0].x - scene.shells[0].radius()).abs() < 1e-5);
        assert!(positions[0].z.abs() < 1e-5);
        assert!(positions[0].y.abs() <= crate::orbital::JITTER_HALF_WIDTH);
        assert_eq!(scene.shells[0].rotation(0.0), 0.0);
    }

    #[test]
    fn test_iron_scene() {
        let iron = element_by_atomic_number(26).unwrap();
        let scene = AtomScene::new(iron);

        let counts: Vec<u32> = scene.shells.iter().map(|s| s.electron_count()).collect();
        assert_eq!(counts, vec![2, 8, 14, 2]);

        let radii = scene.shell_radii();
        for pair in radii.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_empty_shell_list_builds_nucleus_only() {
        let scene = AtomScene::new(&test_element(0, &[]));
        assert!(scene.shells.is_empty());
        assert!(scene.nucleus.size() > 0.0);
    }

    #[test]
    fn test_zero_electron_shell_keeps_its_ring() {
        let scene = AtomScene::new(&test_element(2, &[0]));
        assert_eq!(scene.shells.len(), 1);
        assert_eq!(scene.shells[0].electron_count(), 0);
        assert!(scene.shells[0].geometry().positions().is_empty());
        assert!(scene.shells[0].radius() > 0.0);
    }

    #[test]
    fn test_hover_flags_are_exclusive() {
        let iron = element_by_atomic_number(26).unwrap();
        let mut scene = AtomScene::new(iron);

        scene.observe_hover(HoverTarget::Shell(1));
        assert!(scene.shells[1].hovered);
        assert!(!scene.nucleus.hovered);

        scene.observe_hover(HoverTarget::Shell(2));
        assert!(!scene.shells[1].hovered);
        assert!(scene.shells[2].hovered);

        scene.observe_hover(HoverTarget::Nucleus);
        assert!(scene.nucleus.hovered);
        assert!(scene.shells.iter().all(|s| !s.hovered));
    }

    #[test]
    fn test_nucleus_pulse_only_while_hovered() {
        let mut nucleus = Nucleus {
            atomic_number: 8,
            color: [1.0; 4],
            hovered: false,
        };
        assert_eq!(nucleus.scale(1.3), 1.0);
        assert_eq!(nucleus.emissive(), EMISSIVE_IDLE);

        nucleus.hovered = true;
        let scale = nucleus.scale(1.3);
        assert!((scale - 1.0).abs() <= NUCLEUS_PULSE_AMPLITUDE + 1e-6);
        assert!(scale != 1.0);
        assert_eq!(nucleus.emissive(), EMISSIVE_HOVERED);
    }

    #[test]
    fn test_wobble_is_additive_only() {
        let mut shell = Shell::new(0, 2, [1.0; 4]);
        let base = shell.rotation(2.0);
        assert_eq!(shell.tilt(2.0), 0.0);

        shell.hovered = true;
        // Base rotation is untouched by the wobble
        assert_eq!(shell.rotation(2.0), base);
        assert!(shell.tilt(0.9).abs() <= WOBBLE_AMPLITUDE);
    }

    #[test]
    fn test_advance_never_rewinds() {
        let mut scene = AtomScene::new(&test_element(1, &[1]));
        scene.advance(1.0);
        scene.advance(0.5);
        assert_eq!(scene.elapsed(), 1.0);
        assert_eq!(scene.frames(), 2);
    }

    #[test]
    fn test_hover_captions() {
        let iron = element_by_atomic_number(26).unwrap();
        let mut scene = AtomScene::new(iron);
        assert_eq!(scene.hover_caption(), None);

        scene.observe_hover(HoverTarget::Nucleus);
        assert_eq!(scene.hover_caption().unwrap(), "Nucleus: 26 protons");

        scene.observe_hover(HoverTarget::Shell(2));
        assert_eq!(scene.hover_caption().unwrap(), "Shell 3: 14 electrons");
    }

    #[test]
    fn test_unmount_stops_the_frame_counter() {
        let hydrogen = element_by_atomic_number(1).unwrap();
        let mut view = AtomView::new();

        view.mount(hydrogen);
        view.advance(0.016);
        view.advance(0.033);
        assert_eq!(view.frames(), 2);

        view.unmount();
        assert!(!view.is_mounted());

        // Stale frame callbacks after unmount are no-ops
        view.advance(0.050);
        view.advance(0.066);
        assert_eq!(view.frames(), 0);
    }

    #[test]
    fn test_remount_replaces_the_scene() {
        let mut view = AtomView::new();
        view.mount(element_by_atomic_number(1).unwrap());
        view.advance(1.0);

        view.mount(element_by_atomic_number(26).unwrap());
        assert_eq!(view.frames(), 0);
        assert_eq!(view.scene().unwrap().shells.len(), 4);
    }
}
