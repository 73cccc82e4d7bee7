use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use factbook_explorer::data::filter::FilterBounds;
use factbook_explorer::{Field, Measure, Session};

use crate::state::AppState;

/// Step sizes of the population / area inputs and the growth sliders.
const POPULATION_STEP: u64 = 1_000_000;
const AREA_STEP: u64 = 1_000;
const GROWTH_STEP: f64 = 0.01;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };

    let (pop_lo, pop_hi) = count_range(session, Field::Population);
    let (area_lo, area_hi) = count_range(session, Field::Area);
    let (growth_lo, growth_hi) = percent_range(session);

    let bounds: &mut FilterBounds = &mut state.bounds;
    let mut reset = false;
    let mut download = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            count_input(ui, "Minimum Population", &mut bounds.min_pop, pop_lo, pop_hi, POPULATION_STEP);
            count_input(ui, "Maximum Population", &mut bounds.max_pop, pop_lo, pop_hi, POPULATION_STEP);
            ui.add_space(6.0);

            count_input(ui, "Minimum Area", &mut bounds.min_area, area_lo, area_hi, AREA_STEP);
            count_input(ui, "Maximum Area", &mut bounds.max_area, area_lo, area_hi, AREA_STEP);
            ui.add_space(6.0);

            ui.label("Minimum Population Growth (%)");
            ui.add(egui::Slider::new(&mut bounds.min_growth, growth_lo..=growth_hi).step_by(GROWTH_STEP));
            ui.label("Maximum Population Growth (%)");
            ui.add(egui::Slider::new(&mut bounds.max_growth, growth_lo..=growth_hi).step_by(GROWTH_STEP));
            ui.add_space(6.0);

            reset = ui.button("Reset filters").clicked();

            let inverted = bounds.inverted_fields();
            if !inverted.is_empty() {
                let names: Vec<&str> = inverted.iter().map(|f| f.label()).collect();
                ui.label(
                    RichText::new(format!("Minimum above maximum: {}", names.join(", ")))
                        .color(Color32::YELLOW),
                );
            }

            ui.separator();
            ui.strong("Download Filtered Data");
            download = ui.button("Download CSV").clicked();
        });

    if reset {
        state.reset_filters();
    }
    if download {
        save_file_dialog(state);
    }
}

/// Number input with `−` / `+` buttons stepping by `step`, clamped to the
/// observed range.
fn count_input(ui: &mut Ui, label: &str, value: &mut u64, lo: u64, hi: u64, step: u64) {
    ui.label(label);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("−").clicked() {
            *value = value.saturating_sub(step).max(lo);
        }
        ui.add(
            egui::DragValue::new(value)
                .range(lo..=hi)
                .speed(step as f64 / 10.0),
        );
        if ui.small_button("+").clicked() {
            *value = value.saturating_add(step).min(hi);
        }
    });
}

fn count_range(session: &Session, field: Field) -> (u64, u64) {
    match session.table().extent(field) {
        Some((Measure::Count(lo), Measure::Count(hi))) => (lo, hi),
        _ => (0, 0),
    }
}

fn percent_range(session: &Session) -> (f64, f64) {
    session
        .table()
        .extent(Field::PopulationGrowth)
        .map(|(lo, hi)| (lo.as_f64(), hi.as_f64()))
        .unwrap_or((0.0, 0.0))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}: {} countries loaded, {} matching",
                session.source().display(),
                session.table().len(),
                state.visible.get()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open factbook data")
        .add_filter("Supported files", &["db", "sqlite", "sqlite3", "csv"])
        .add_filter("SQLite", &["db", "sqlite", "sqlite3"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(&state.config.export_file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.save_export(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }
}
