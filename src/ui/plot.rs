use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::SpeciesColors;
use crate::views::histogram::{BinnedHistogram, CategoryHistogram};
use crate::views::scatter::{axis_label, ScatterPlot};

// ---------------------------------------------------------------------------
// Count by species
// ---------------------------------------------------------------------------

/// One bar per species, each its own legend entry.
pub fn species_histogram(ui: &mut Ui, hist: &CategoryHistogram, colors: &SpeciesColors) {
    ui.weak(format!("n = {}", hist.total()));
    Plot::new("species_histogram")
        .legend(Legend::default())
        .x_axis_label(hist.x_label)
        .y_axis_label(hist.y_label)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (species, count)) in hist.bars.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64)
                    .width(0.8)
                    .name(species.name());
                let chart = BarChart::new(vec![bar])
                    .name(species.name())
                    .color(colors.color_for(*species));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Binned distribution
// ---------------------------------------------------------------------------

/// Layers overlap, so each is drawn semi-transparent.
pub fn distribution_histogram(ui: &mut Ui, hist: &BinnedHistogram, colors: &SpeciesColors) {
    ui.horizontal(|ui: &mut Ui| {
        if !hist.title.is_empty() {
            ui.strong(hist.title);
        }
        ui.weak(format!("n = {}, {} bins", hist.total(), hist.bin_count()));
    });
    let width = hist.bin_width();

    Plot::new("distribution_histogram")
        .legend(Legend::default())
        .x_axis_label(hist.x_label)
        .y_axis_label(hist.y_label)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for layer in &hist.layers {
                let bars: Vec<Bar> = layer
                    .counts
                    .iter()
                    .zip(&hist.edges)
                    .filter(|(count, _)| **count > 0)
                    .map(|(&count, &left)| Bar::new(left + width / 2.0, count as f64).width(width))
                    .collect();
                let chart = BarChart::new(bars)
                    .name(layer.species.name())
                    .color(colors.color_for(layer.species).gamma_multiply(0.6));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

pub fn scatter(ui: &mut Ui, plot: &ScatterPlot, colors: &SpeciesColors) {
    ui.horizontal(|ui: &mut Ui| {
        if !plot.title.is_empty() {
            ui.strong(plot.title);
        }
        if plot.skipped > 0 {
            ui.weak(format!(
                "{} points, {} without {}",
                plot.point_count(),
                plot.skipped,
                plot.y
            ));
        }
    });

    Plot::new("scatter")
        .legend(Legend::default())
        .x_axis_label(axis_label(plot.x))
        .y_axis_label(axis_label(plot.y))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &plot.series {
                let points = Points::new(PlotPoints::new(series.points.clone()))
                    .name(series.species.name())
                    .color(colors.color_for(series.species))
                    .radius(3.0);
                plot_ui.points(points);
            }
        });
}
