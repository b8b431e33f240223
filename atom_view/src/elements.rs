//! Static element dataset and color tables
//!
//! The viewer does not compute any chemistry: shell occupancy, weights, and
//! categories are illustrative reference data for the first 36 elements.

/// Broad periodic-table category, used for panel accents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    Nonmetal,
    Halogen,
    NobleGas,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::AlkaliMetal => "alkali metal",
            Category::AlkalineEarthMetal => "alkaline earth metal",
            Category::TransitionMetal => "transition metal",
            Category::PostTransitionMetal => "post-transition metal",
            Category::Metalloid => "metalloid",
            Category::Nonmetal => "nonmetal",
            Category::Halogen => "halogen",
            Category::NobleGas => "noble gas",
        }
    }
}

/// State of matter at standard conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatterState {
    Solid,
    Liquid,
    Gas,
}

impl MatterState {
    pub fn label(&self) -> &'static str {
        match self {
            MatterState::Solid => "solid",
            MatterState::Liquid => "liquid",
            MatterState::Gas => "gas",
        }
    }
}

/// Display theme, threaded explicitly into color lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// One chemical element record, read-only input to the 3D view.
///
/// `electron_shells` is ordered innermost-first. The shell sum is not
/// required to equal `atomic_number`; the view must not assume it.
#[derive(Debug, Clone, Copy)]
pub struct Element {
    pub atomic_number: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_weight: f32,
    pub group: Option<u32>,
    pub period: u32,
    pub block: &'static str,
    pub category: Category,
    pub state: MatterState,
    pub discoverer: Option<&'static str>,
    pub electron_shells: &'static [u32],
    pub color: &'static str,
}

impl Element {
    /// Tint color as linear-ish RGBA, falling back to grey on bad data
    pub fn color_rgba(&self) -> [f32; 4] {
        parse_hex_color(self.color).unwrap_or([0.5, 0.5, 0.5, 1.0])
    }
}

/// Electron marker color shared by all elements
pub const ELECTRON_COLOR: &str = "#4ecdc4";

/// Parse a `#rrggbb` hex color into RGBA components in `[0, 1]`
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    ])
}

/// Category accent color for the given theme
pub fn category_color(category: Category, theme: Theme) -> [f32; 4] {
    let hex = match (category, theme) {
        (Category::AlkaliMetal, Theme::Light) => "#3b82f6",
        (Category::AlkalineEarthMetal, Theme::Light) => "#10b981",
        (Category::TransitionMetal, Theme::Light) => "#f59e0b",
        (Category::PostTransitionMetal, Theme::Light) => "#6b7280",
        (Category::Metalloid, Theme::Light) => "#f97316",
        (Category::Nonmetal, Theme::Light) => "#ec4899",
        (Category::Halogen, Theme::Light) => "#8b5cf6",
        (Category::NobleGas, Theme::Light) => "#06b6d4",
        (Category::AlkaliMetal, Theme::Dark) => "#60a5fa",
        (Category::AlkalineEarthMetal, Theme::Dark) => "#34d399",
        (Category::TransitionMetal, Theme::Dark) => "#fbbf24",
        (Category::PostTransitionMetal, Theme::Dark) => "#9ca3af",
        (Category::Metalloid, Theme::Dark) => "#fb923c",
        (Category::Nonmetal, Theme::Dark) => "#f472b6",
        (Category::Halogen, Theme::Dark) => "#a78bfa",
        (Category::NobleGas, Theme::Dark) => "#22d3ee",
    };
    // Table entries are compile-time constants; the parse cannot fail
    parse_hex_color(hex).unwrap_or([0.5, 0.5, 0.5, 1.0])
}

/// Look up an element by atomic number
pub fn element_by_atomic_number(atomic_number: u32) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.atomic_number == atomic_number)
}

macro_rules! element {
    ($z:expr, $sym:expr, $name:expr, $weight:expr, $group:expr, $period:expr, $block:expr,
     $category:expr, $state:expr, $discoverer:expr, $shells:expr, $color:expr) => {
        Element {
            atomic_number: $z,
            symbol: $sym,
            name: $name,
            atomic_weight: $weight,
            group: $group,
            period: $period,
            block: $block,
            category: $category,
            state: $state,
            discoverer: $discoverer,
            electron_shells: &$shells,
            color: $color,
        }
    };
}

use Category::*;
use MatterState::*;

/// The full dataset: hydrogen through krypton
pub const ELEMENTS: &[Element] = &[
    // Period 1
    element!(1, "H", "Hydrogen", 1.008, Some(1), 1, "s", Nonmetal, Gas, Some("Henry Cavendish"), [1], "#ff6b6b"),
    element!(2, "He", "Helium", 4.003, Some(18), 1, "s", NobleGas, Gas, Some("Pierre Janssen"), [2], "#4ecdc4"),
    // Period 2
    element!(3, "Li", "Lithium", 6.94, Some(1), 2, "s", AlkaliMetal, Solid, Some("Johan August Arfwedson"), [2, 1], "#45b7d1"),
    element!(4, "Be", "Beryllium", 9.012, Some(2), 2, "s", AlkalineEarthMetal, Solid, Some("Louis-Nicolas Vauquelin"), [2, 2], "#96ceb4"),
    element!(5, "B", "Boron", 10.81, Some(13), 2, "p", Metalloid, Solid, Some("Joseph Louis Gay-Lussac"), [2, 3], "#feca57"),
    element!(6, "C", "Carbon", 12.01, Some(14), 2, "p", Nonmetal, Solid, Some("Ancient"), [2, 4], "#ff9ff3"),
    element!(7, "N", "Nitrogen", 14.01, Some(15), 2, "p", Nonmetal, Gas, Some("Daniel Rutherford"), [2, 5], "#54a0ff"),
    element!(8, "O", "Oxygen", 16.00, Some(16), 2, "p", Nonmetal, Gas, Some("Joseph Priestley"), [2, 6], "#5f27cd"),
    element!(9, "F", "Fluorine", 19.00, Some(17), 2, "p", Halogen, Gas, Some("André-Marie Ampère"), [2, 7], "#00d2d3"),
    element!(10, "Ne", "Neon", 20.18, Some(18), 2, "p", NobleGas, Gas, Some("William Ramsay"), [2, 8], "#ff6348"),
    // Period 3
    element!(11, "Na", "Sodium", 22.99, Some(1), 3, "s", AlkaliMetal, Solid, Some("Humphry Davy"), [2, 8, 1], "#45b7d1"),
    element!(12, "Mg", "Magnesium", 24.31, Some(2), 3, "s", AlkalineEarthMetal, Solid, Some("Joseph Black"), [2, 8, 2], "#96ceb4"),
    element!(13, "Al", "Aluminum", 26.98, Some(13), 3, "p", PostTransitionMetal, Solid, Some("Hans Christian Ørsted"), [2, 8, 3], "#a4b0be"),
    element!(14, "Si", "Silicon", 28.09, Some(14), 3, "p", Metalloid, Solid, Some("Jöns Jacob Berzelius"), [2, 8, 4], "#feca57"),
    element!(15, "P", "Phosphorus", 30.97, Some(15), 3, "p", Nonmetal, Solid, Some("Hennig Brand"), [2, 8, 5], "#ff9ff3"),
    element!(16, "S", "Sulfur", 32.07, Some(16), 3, "p", Nonmetal, Solid, Some("Ancient"), [2, 8, 6], "#54a0ff"),
    element!(17, "Cl", "Chlorine", 35.45, Some(17), 3, "p", Halogen, Gas, Some("Carl Wilhelm Scheele"), [2, 8, 7], "#5f27cd"),
    element!(18, "Ar", "Argon", 39.95, Some(18), 3, "p", NobleGas, Gas, Some("Lord Rayleigh"), [2, 8, 8], "#00d2d3"),
    // Period 4
    element!(19, "K", "Potassium", 39.10, Some(1), 4, "s", AlkaliMetal, Solid, Some("Humphry Davy"), [2, 8, 8, 1], "#45b7d1"),
    element!(20, "Ca", "Calcium", 40.08, Some(2), 4, "s", AlkalineEarthMetal, Solid, Some("Humphry Davy"), [2, 8, 8, 2], "#96ceb4"),
    element!(21, "Sc", "Scandium", 44.96, Some(3), 4, "d", TransitionMetal, Solid, Some("Lars Fredrik Nilson"), [2, 8, 9, 2], "#ffd93d"),
    element!(22, "Ti", "Titanium", 47.87, Some(4), 4, "d", TransitionMetal, Solid, Some("William Gregor"), [2, 8, 10, 2], "#ffd93d"),
    element!(23, "V", "Vanadium", 50.94, Some(5), 4, "d", TransitionMetal, Solid, Some("Andrés Manuel del Río"), [2, 8, 11, 2], "#ffd93d"),
    element!(24, "Cr", "Chromium", 51.996, Some(6), 4, "d", TransitionMetal, Solid, Some("Louis Nicolas Vauquelin"), [2, 8, 13, 1], "#ffd93d"),
    element!(25, "Mn", "Manganese", 54.94, Some(7), 4, "d", TransitionMetal, Solid, Some("Carl Wilhelm Scheele"), [2, 8, 13, 2], "#ffd93d"),
    element!(26, "Fe", "Iron", 55.85, Some(8), 4, "d", TransitionMetal, Solid, Some("Ancient"), [2, 8, 14, 2], "#ffd93d"),
    element!(27, "Co", "Cobalt", 58.93, Some(9), 4, "d", TransitionMetal, Solid, Some("Georg Brandt"), [2, 8, 15, 2], "#ffd93d"),
    element!(28, "Ni", "Nickel", 58.69, Some(10), 4, "d", TransitionMetal, Solid, Some("Axel Fredrik Cronstedt"), [2, 8, 16, 2], "#ffd93d"),
    element!(29, "Cu", "Copper", 63.55, Some(11), 4, "d", TransitionMetal, Solid, Some("Ancient"), [2, 8, 18, 1], "#ffd93d"),
    element!(30, "Zn", "Zinc", 65.38, Some(12), 4, "d", TransitionMetal, Solid, Some("Ancient"), [2, 8, 18, 2], "#ffd93d"),
    element!(31, "Ga", "Gallium", 69.72, Some(13), 4, "p", PostTransitionMetal, Solid, Some("Lecoq de Boisbaudran"), [2, 8, 18, 3], "#a4b0be"),
    element!(32, "Ge", "Germanium", 72.63, Some(14), 4, "p", Metalloid, Solid, Some("Clemens Winkler"), [2, 8, 18, 4], "#feca57"),
    element!(33, "As", "Arsenic", 74.92, Some(15), 4, "p", Metalloid, Solid, Some("Albertus Magnus"), [2, 8, 18, 5], "#feca57"),
    element!(34, "Se", "Selenium", 78.97, Some(16), 4, "p", Nonmetal, Solid, Some("Jöns Jacob Berzelius"), [2, 8, 18, 6], "#ff9ff3"),
    element!(35, "Br", "Bromine", 79.90, Some(17), 4, "p", Halogen, Liquid, Some("Antoine Jérôme Balard"), [2, 8, 18, 7], "#5f27cd"),
    element!(36, "Kr", "Krypton", 83.80, Some(18), 4, "p", NobleGas, Gas, Some("William Ramsay"), [2, 8, 18, 8], "#00d2d3"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_has_36_elements() {
        assert_eq!(ELEMENTS.len(), 36);
    }

    #[test]
    fn test_atomic_numbers_unique_and_ascending() {
        for (i, element) in ELEMENTS.iter().enumerate() {
            assert_eq!(element.atomic_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_all_colors_parse() {
        for element in ELEMENTS {
            assert!(
                parse_hex_color(element.color).is_some(),
                "bad color for {}",
                element.symbol
            );
        }
        assert!(parse_hex_color(ELECTRON_COLOR).is_some());
    }

    #[test]
    fn test_every_element_has_a_shell() {
        for element in ELEMENTS {
            assert!(!element.electron_shells.is_empty());
            assert!(element.electron_shells.len() as u32 <= element.period);
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#000000"), Some([0.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse_hex_color("#ffffff"), Some([1.0, 1.0, 1.0, 1.0]));
        let teal = parse_hex_color("#4ecdc4").unwrap();
        assert!((teal[0] - 78.0 / 255.0).abs() < 1e-6);
        assert!((teal[1] - 205.0 / 255.0).abs() < 1e-6);
        assert!((teal[2] - 196.0 / 255.0).abs() < 1e-6);

        assert_eq!(parse_hex_color("4ecdc4"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_lookup_by_atomic_number() {
        assert_eq!(element_by_atomic_number(26).unwrap().symbol, "Fe");
        assert!(element_by_atomic_number(0).is_none());
        assert!(element_by_atomic_number(37).is_none());
    }

    #[test]
    fn test_category_colors_differ_by_theme() {
        let light = category_color(Category::NobleGas, Theme::Light);
        let dark = category_color(Category::NobleGas, Theme::Dark);
        assert_ne!(light, dark);
    }

    #[test]
    fn test_iron_reference_data() {
        let iron = element_by_atomic_number(26).unwrap();
        assert_eq!(iron.electron_shells, &[2, 8, 14, 2]);
        assert_eq!(iron.category, Category::TransitionMetal);
    }
}
