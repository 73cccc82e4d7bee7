use eframe::egui::{self, Color32, ScrollArea, Ui};
use factbook_explorer::DashboardConfig;

use crate::state::{AppState, Tab};
use crate::ui::{maps, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FactbookApp {
    pub state: AppState,
}

impl FactbookApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::with_config(config),
        }
    }
}

impl eframe::App for FactbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.track_bounds();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters + download ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: background, title, tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(uri) = &self.state.background_uri {
                egui::Image::new(uri.as_str())
                    .tint(Color32::from_white_alpha(60))
                    .paint_at(ui, ui.max_rect());
            }
            dashboard(ui, &mut self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Global Demographics Dashboard");
    ui.label("Explore population, growth, and area statistics using CIA World Factbook data.");
    ui.separator();

    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded  (File → Open…)");
        });
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::BarCharts, "Bar Charts");
        ui.selectable_value(&mut state.tab, Tab::Scatter, "Scatter Plot");
        ui.selectable_value(&mut state.tab, Tab::Maps, "Choropleth Maps");
    });
    ui.separator();

    let views = session.render(&state.bounds);
    if state.visible.note(views.subset.len()) {
        // The top bar was drawn with the previous count.
        ui.ctx().request_repaint();
    }

    egui::Frame::new()
        .fill(plot::PANEL_FILL)
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| match state.tab {
                    Tab::BarCharts => plot::bar_charts(ui, &views),
                    Tab::Scatter => plot::scatter_plot(ui, &views),
                    Tab::Maps => maps::choropleth_maps(ui, &views),
                });
        });
}
