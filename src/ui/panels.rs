use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{PAGE_TITLE, REPO_URL};
use crate::controls::{ControlChange, ControlDomain, ControlId, ControlValue};
use crate::reactive::Freshness;
use crate::state::AppState;
use crate::ui::layout::{place, ROW_GROUPS, ROW_WIDTHS};
use crate::ui::plot;
use crate::ui::table::{self, TableAction};
use crate::views::{ViewArtifact, ViewId};

const CARD_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the sidebar. Edits are collected as messages and applied once the
/// widgets are drawn.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sidebar");
    ui.separator();

    let mut changes = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for id in ControlId::ALL {
                ui.strong(id.label());
                if let Some(value) = control_widget(ui, state, id) {
                    changes.push(ControlChange::new(id, value));
                }
                ui.add_space(6.0);
            }

            ui.separator();
            ui.add(egui::Hyperlink::from_label_and_url("Github", REPO_URL).open_in_new_tab(true));
        });

    for change in changes {
        state.apply(change);
    }
}

/// Draw one control; returns the new value if the user changed it.
fn control_widget(ui: &mut Ui, state: &AppState, id: ControlId) -> Option<ControlValue> {
    let controls = &state.controls;
    match id.domain() {
        ControlDomain::Choices(choices) => {
            let mut attr = controls.selected_attribute;
            egui::ComboBox::from_id_salt(id.name())
                .selected_text(attr.column())
                .show_ui(ui, |ui: &mut Ui| {
                    for choice in choices {
                        ui.selectable_value(&mut attr, *choice, choice.column());
                    }
                });
            (attr != controls.selected_attribute).then_some(ControlValue::Attribute(attr))
        }
        ControlDomain::Numeric(range) => {
            let mut n = controls.plotly_bin_count;
            let before = n;
            ui.add(egui::DragValue::new(&mut n).range(range).speed(0.2));
            (n != before).then_some(ControlValue::Count(n))
        }
        ControlDomain::Slider(range) => {
            let mut n = controls.seaborn_bin_count;
            let before = n;
            ui.add(egui::Slider::new(&mut n, range));
            (n != before).then_some(ControlValue::Count(n))
        }
        ControlDomain::MultiSelect(all) => {
            let mut selected = controls.selected_species.clone();
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for species in all {
                    let mut checked = selected.contains(species);
                    let text = RichText::new(species.name()).color(state.colors.color_for(*species));
                    if ui.checkbox(&mut checked, text).changed() {
                        if checked {
                            selected.insert(*species);
                        } else {
                            selected.remove(species);
                        }
                    }
                }
            });
            (selected != controls.selected_species).then_some(ControlValue::Species(selected))
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(PAGE_TITLE);
        ui.separator();
        if state.dataset.is_empty() {
            ui.label(RichText::new("No records with a body mass").color(Color32::YELLOW));
        } else {
            ui.label(format!(
                "{} records ({} dropped for missing body mass)",
                state.dataset.len(),
                state.dataset.dropped
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Main area – cards
// ---------------------------------------------------------------------------

enum CardAction {
    Table(TableAction),
    ToggleFullscreen(ViewId),
}

pub fn main_area(ui: &mut Ui, state: &mut AppState) {
    let mut actions = Vec::new();

    if let Some(view) = state.fullscreen {
        let size = ui.available_size();
        card(ui, state, view, size.x, size.y, &mut actions);
    } else {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                let full_width = ui.available_width();
                for group in ROW_GROUPS {
                    for row in place(&ROW_WIDTHS, group) {
                        ui.horizontal_top(|ui: &mut Ui| {
                            for slot in row {
                                let width = full_width * slot.fraction - ui.spacing().item_spacing.x;
                                card(ui, state, slot.item, width, CARD_HEIGHT, &mut actions);
                            }
                        });
                    }
                }
            });
    }

    for action in actions {
        match action {
            CardAction::Table(TableAction::Sort(col)) => state.sort_table(col),
            CardAction::Table(TableAction::Page(p)) => state.set_table_page(p),
            CardAction::ToggleFullscreen(view) => state.toggle_fullscreen(view),
        }
    }
}

fn card(
    ui: &mut Ui,
    state: &AppState,
    view: ViewId,
    width: f32,
    height: f32,
    actions: &mut Vec<CardAction>,
) {
    ui.allocate_ui(egui::vec2(width, height), |ui: &mut Ui| {
        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            let inner = egui::vec2(width - 14.0, height - 14.0).max(egui::Vec2::ZERO);
            ui.set_min_size(inner);
            ui.set_max_size(inner);

            ui.horizontal(|ui: &mut Ui| {
                ui.strong(view.title()).on_hover_text(card_hover(state, view));
                if state.graph.freshness(view) == Some(Freshness::Stale) {
                    ui.spinner();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                    let label = if state.fullscreen == Some(view) { "🗗" } else { "⛶" };
                    if ui.small_button(label).on_hover_text("Full screen").clicked() {
                        actions.push(CardAction::ToggleFullscreen(view));
                    }
                });
            });
            ui.separator();

            match state.output(view) {
                Some(Ok(artifact)) => {
                    if let Some(a) = draw_artifact(ui, state, artifact) {
                        actions.push(CardAction::Table(a));
                    }
                }
                Some(Err(e)) => {
                    ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
                }
                None => {
                    ui.label("Not rendered yet.");
                }
            }
        });
    });
}

fn card_hover(state: &AppState, view: ViewId) -> String {
    let deps: Vec<&str> = state
        .graph
        .dependencies(view)
        .map(|d| d.iter().map(|c| c.name()).collect())
        .unwrap_or_default();
    let reads = if deps.is_empty() {
        "Reads no controls".to_string()
    } else {
        format!("Reads {}", deps.join(", "))
    };
    format!("{reads}; rendered {} time(s)", state.graph.runs(view))
}

fn draw_artifact(ui: &mut Ui, state: &AppState, artifact: &ViewArtifact) -> Option<TableAction> {
    match artifact {
        ViewArtifact::Table(t) => {
            table::data_table(ui, t, state.table_sort, state.table_page, state.page_size)
        }
        ViewArtifact::Grid(t) => {
            table::data_grid(ui, t);
            None
        }
        ViewArtifact::CategoryHistogram(h) => {
            plot::species_histogram(ui, h, &state.colors);
            None
        }
        ViewArtifact::DistributionHistogram(h) => {
            plot::distribution_histogram(ui, h, &state.colors);
            None
        }
        ViewArtifact::Scatter(s) => {
            plot::scatter(ui, s, &state.colors);
            None
        }
    }
}
