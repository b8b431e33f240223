//! Element details sidebar and hover captions
//!
//! Displays the selected element's reference data using egui.

use egui::{Align2, Color32, Context, RichText};

use crate::elements::{category_color, Element, Theme, ELEMENTS};
use crate::scene::AtomScene;

/// Actions requested from the sidebar this frame
#[derive(Debug, Default)]
pub struct SidebarResponse {
    pub selected: Option<u32>,
    pub toggle_theme: bool,
}

fn accent(element: &Element, theme: Theme) -> Color32 {
    let c = category_color(element.category, theme);
    Color32::from_rgb(
        (c[0] * 255.0) as u8,
        (c[1] * 255.0) as u8,
        (c[2] * 255.0) as u8,
    )
}

/// Draw the element details sidebar
pub fn draw_element_sidebar(ctx: &Context, element: &Element, theme: Theme) -> SidebarResponse {
    let mut response = SidebarResponse::default();

    egui::SidePanel::right("element_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new(format!("{} · {}", element.symbol, element.name))
                        .color(accent(element, theme)),
                );
            });
            ui.label(RichText::new(element.category.label()).italics());
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("◀ Prev").clicked() && element.atomic_number > 1 {
                        response.selected = Some(element.atomic_number - 1);
                    }
                    if ui.button("Next ▶").clicked()
                        && (element.atomic_number as usize) < ELEMENTS.len()
                    {
                        response.selected = Some(element.atomic_number + 1);
                    }
                    let theme_label = match theme {
                        Theme::Light => "🌙 Dark",
                        Theme::Dark => "☀ Light",
                    };
                    if ui.button(theme_label).clicked() {
                        response.toggle_theme = true;
                    }
                });

                ui.add_space(4.0);
                egui::ComboBox::from_label("Element")
                    .selected_text(format!("{} {}", element.atomic_number, element.symbol))
                    .show_ui(ui, |ui| {
                        for candidate in ELEMENTS {
                            let label = format!(
                                "{} {} · {}",
                                candidate.atomic_number, candidate.symbol, candidate.name
                            );
                            if ui
                                .selectable_label(
                                    candidate.atomic_number == element.atomic_number,
                                    label,
                                )
                                .clicked()
                            {
                                response.selected = Some(candidate.atomic_number);
                            }
                        }
                    });

                ui.add_space(8.0);
                egui::Grid::new("element_properties")
                    .num_columns(2)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Atomic number").strong());
                        ui.label(element.atomic_number.to_string());
                        ui.end_row();

                        ui.label(RichText::new("Atomic weight").strong());
                        ui.label(format!("{}", element.atomic_weight));
                        ui.end_row();

                        ui.label(RichText::new("Group").strong());
                        ui.label(
                            element
                                .group
                                .map(|g| g.to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        );
                        ui.end_row();

                        ui.label(RichText::new("Period").strong());
                        ui.label(element.period.to_string());
                        ui.end_row();

                        ui.label(RichText::new("Block").strong());
                        ui.label(element.block);
                        ui.end_row();

                        ui.label(RichText::new("State").strong());
                        ui.label(element.state.label());
                        ui.end_row();

                        ui.label(RichText::new("Discovered by").strong());
                        ui.label(element.discoverer.unwrap_or("Unknown"));
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.collapsing(RichText::new("Electron shells").strong(), |ui| {
                    for (index, count) in element.electron_shells.iter().enumerate() {
                        ui.label(format!("Shell {}: {} electrons", index + 1, count));
                    }
                });

                ui.add_space(8.0);
                ui.collapsing(RichText::new("Controls").strong(), |ui| {
                    ui.label("Drag: orbit the camera");
                    ui.label("Shift + drag: pan");
                    ui.label("Scroll: zoom");
                    ui.label("Left / Right: previous / next element");
                    ui.label("Esc / Enter: close / reopen the model");
                    ui.label("Hover: highlight the nucleus or a shell");
                });
            });
        });

    response
}

/// Draw the two-line element caption inside the canvas
pub fn draw_element_caption(ctx: &Context, scene: &AtomScene, element: &Element, theme: Theme) {
    egui::Area::new(egui::Id::new("element_caption"))
        .anchor(Align2::LEFT_BOTTOM, [16.0, -16.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(scene.symbol)
                    .size(32.0)
                    .strong()
                    .color(accent(element, theme)),
            );
            ui.label(RichText::new(scene.name).size(16.0));
        });
}

/// Placeholder shown while no scene is mounted
pub fn draw_loading_placeholder(ctx: &Context) {
    egui::Area::new(egui::Id::new("loading_placeholder"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("Loading 3D model...").size(18.0));
        });
}

/// Draw the floating caption for the hovered region, if any
pub fn draw_hover_caption(ctx: &Context, scene: &AtomScene) {
    let Some(caption) = scene.hover_caption() else {
        return;
    };

    egui::Area::new(egui::Id::new("hover_caption"))
        .anchor(Align2::CENTER_TOP, [0.0, 24.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(RichText::new(caption).strong());
            });
        });
}
