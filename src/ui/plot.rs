use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};
use factbook_explorer::{Field, Record, ViewSet};

use crate::color::{format_compact, ColorMap, ColorScale};

const BAR_PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Bar charts tab
// ---------------------------------------------------------------------------

/// The three top-10 leaderboards.
pub fn bar_charts(ui: &mut Ui, views: &ViewSet<'_>) {
    ui.heading("Top 10 Countries by Population");
    leaderboard(ui, "top_population", &views.top_population, Field::Population, ColorScale::Viridis);

    ui.heading("Top 10 Countries by Area");
    leaderboard(ui, "top_area", &views.top_area, Field::Area, ColorScale::Plasma);

    ui.heading("Top 10 Fastest Growing Populations");
    leaderboard(ui, "top_growth", &views.top_growth, Field::PopulationGrowth, ColorScale::Cividis);
}

/// Horizontal bar chart, rank 1 at the top.
fn leaderboard(ui: &mut Ui, id: &str, records: &[&Record], field: Field, scale: ColorScale) {
    if records.is_empty() {
        no_data(ui);
        return;
    }

    let n = records.len();
    let colors = scale.palette(n);
    let bars: Vec<Bar> = records
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(rank, (rec, color))| {
            Bar::new((n - 1 - rank) as f64, field.value(rec).as_f64())
                .name(&rec.name)
                .fill(color)
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = records.iter().rev().map(|r| r.name.clone()).collect();

    Plot::new(id)
        .height(BAR_PLOT_HEIGHT)
        .x_axis_label(field.label())
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_grid([true, false])
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .x_axis_formatter(|mark, _range| format_compact(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name(field.label()));
        });
}

// ---------------------------------------------------------------------------
// Scatter tab
// ---------------------------------------------------------------------------

/// Population vs area on log-log axes, coloured by growth, sized by
/// population.
pub fn scatter_plot(ui: &mut Ui, views: &ViewSet<'_>) {
    ui.heading("Population vs Area");
    if views.scatter.is_empty() {
        no_data(ui);
        return;
    }

    let color_map = ColorMap::new(ColorScale::Viridis, views.scatter.iter().map(|p| p.growth));
    let max_pop = views
        .scatter
        .iter()
        .map(|p| p.population)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    color_legend(ui, Field::PopulationGrowth, &color_map);

    Plot::new("population_vs_area")
        .x_axis_label("Area (sq km, log scale)")
        .y_axis_label("Population (log scale)")
        .x_axis_formatter(|mark, _range| format_compact(10f64.powf(mark.value)))
        .y_axis_formatter(|mark, _range| format_compact(10f64.powf(mark.value)))
        .label_formatter(|name, value| {
            format!(
                "{name}\narea {}\npopulation {}",
                format_compact(10f64.powf(value.x)),
                format_compact(10f64.powf(value.y))
            )
        })
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for point in &views.scatter {
                let xy = [log10(point.area), log10(point.population)];
                let radius = 2.0 + 14.0 * (point.population as f64 / max_pop).sqrt() as f32;
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![xy]))
                        .name(point.name)
                        .radius(radius)
                        .color(color_map.color_for(point.growth)),
                );
            }
        });
}

/// Log10 with zero pinned to 1.
fn log10(v: u64) -> f64 {
    (v.max(1) as f64).log10()
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

pub fn no_data(ui: &mut Ui) {
    ui.label("No data matches the current filters.");
    ui.add_space(8.0);
}

pub fn color_legend(ui: &mut Ui, field: Field, color_map: &ColorMap) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(format!("{}:", field.label()));
        for (label, color) in color_map.legend_entries(5) {
            ui.colored_label(color, "■");
            ui.label(label);
        }
    });
}

/// Backdrop behind the tab content, keeps charts legible over the background image.
pub const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(20, 20, 20, 200);
