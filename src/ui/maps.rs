use eframe::egui::{self, Sense, Ui};
use egui_extras::{Column, TableBuilder};
use factbook_explorer::data::views::ChoroplethView;
use factbook_explorer::{Field, ViewSet};

use crate::color::{ColorMap, ColorScale};
use crate::ui::plot::{color_legend, no_data};

// ---------------------------------------------------------------------------
// Choropleth tab
// ---------------------------------------------------------------------------

/// One colour-coded region list per choropleth view, keyed by ISO-3 code.
pub fn choropleth_maps(ui: &mut Ui, views: &ViewSet<'_>) {
    for view in &views.choropleths {
        let (title, scale) = match view.field {
            Field::Population => ("Population by Country", ColorScale::Viridis),
            Field::PopulationGrowth => ("Population Growth by Country", ColorScale::Plasma),
            Field::Area => ("Country Area", ColorScale::Cividis),
        };
        egui::CollapsingHeader::new(title)
            .id_salt(view.field.column())
            .default_open(view.field == Field::Population)
            .show(ui, |ui: &mut Ui| region_table(ui, view, scale));
    }
}

fn region_table(ui: &mut Ui, view: &ChoroplethView<'_>, scale: ColorScale) {
    if view.entries.is_empty() {
        no_data(ui);
        return;
    }

    let color_map = ColorMap::new(scale, view.entries.iter().map(|e| e.value.as_f64()));
    color_legend(ui, view.field, &color_map);

    ui.push_id(view.field.column(), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::exact(48.0))
            .column(Column::exact(56.0))
            .column(Column::remainder().at_least(140.0))
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("");
                });
                header.col(|ui| {
                    ui.strong("Code");
                });
                header.col(|ui| {
                    ui.strong("Country");
                });
                header.col(|ui| {
                    ui.strong(view.field.label());
                });
            })
            .body(|mut body| {
                for entry in &view.entries {
                    let fill = color_map.color_for(entry.value.as_f64());
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            let (rect, _) = ui.allocate_exact_size(egui::vec2(40.0, 14.0), Sense::hover());
                            ui.painter().rect_filled(rect, 2.0, fill);
                        });
                        row.col(|ui| {
                            ui.monospace(entry.code);
                        });
                        row.col(|ui| {
                            ui.label(entry.name);
                        });
                        row.col(|ui| {
                            ui.label(entry.value.to_string());
                        });
                    });
                }
            });
    });
}
