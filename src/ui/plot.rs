use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, VLine};

use crate::color::{Trace, TracePalette};
use crate::state::{AppState, PlotView};

// ---------------------------------------------------------------------------
// Analysis plot (central panel)
// ---------------------------------------------------------------------------

/// Only finite points can be drawn.
fn finite_points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter()
        .zip(y)
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(&xi, &yi)| [xi, yi])
        .collect()
}

/// Render the view selector and the selected plot.
pub fn analysis_plot(ui: &mut Ui, state: &mut AppState, palette: &TracePalette) {
    let signal_label = state.mode.label();
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.view, PlotView::Signal, format!("{signal_label} Spectrum"));
        ui.selectable_value(&mut state.view, PlotView::Absorbance, "Absorbance Spectrum");
        ui.selectable_value(&mut state.view, PlotView::Tauc, "Tauc Plot");
    });

    let Some(preview) = &state.preview else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to compute a Tauc plot  (File → Open…)");
        });
        return;
    };

    let wavelength = &preview.series.wavelength_nm;
    match state.view {
        PlotView::Signal => {
            Plot::new("signal_plot")
                .legend(Legend::default())
                .x_axis_label("Wavelength (nm)")
                .y_axis_label(signal_label)
                .show(ui, |plot_ui| {
                    let measured = preview.optics.measured(state.mode);
                    plot_ui.line(
                        Line::new(finite_points(wavelength, measured))
                            .name(signal_label)
                            .color(palette.color_for(Trace::Signal))
                            .width(1.5),
                    );
                });
        }
        PlotView::Absorbance => {
            Plot::new("absorbance_plot")
                .legend(Legend::default())
                .x_axis_label("Wavelength (nm)")
                .y_axis_label("Absorbance")
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(finite_points(wavelength, &preview.optics.absorbance))
                            .name("Absorbance")
                            .color(palette.color_for(Trace::Absorbance))
                            .width(1.5),
                    );
                });
        }
        PlotView::Tauc => {
            Plot::new("tauc_plot")
                .legend(Legend::default())
                .x_axis_label("Photon Energy (eV)")
                .y_axis_label("(αhν)^n")
                .allow_boxed_zoom(true)
                .show(ui, |plot_ui| {
                    let tauc = &preview.tauc;
                    plot_ui.line(
                        Line::new(finite_points(&tauc.photon_energy_ev, &tauc.tauc_value))
                            .name(format!("Tauc Plot ({})", tauc.transition))
                            .color(palette.color_for(Trace::Tauc))
                            .width(1.5),
                    );

                    let Some(report) = &state.report else {
                        return;
                    };
                    plot_ui.points(
                        Points::new(finite_points(
                            &report.domain.photon_energy_ev,
                            &report.domain.tauc_value,
                        ))
                        .name("Fit region")
                        .color(palette.color_for(Trace::FitDomain))
                        .radius(2.5),
                    );

                    // Fitted line from the x-intercept to the top of the fit region.
                    let gap = report.band_gap.value_ev;
                    let x_end = report.fit.fit_domain[1];
                    let fit_line: PlotPoints = [gap, x_end]
                        .iter()
                        .map(|&x| [x, report.fit.evaluate(x)])
                        .collect();
                    plot_ui.line(
                        Line::new(fit_line)
                            .name("Linear Fit")
                            .color(palette.color_for(Trace::FitLine))
                            .style(egui_plot::LineStyle::dashed_loose())
                            .width(2.0),
                    );
                    plot_ui.vline(
                        VLine::new(gap)
                            .name(format!("Band gap {}", report.band_gap))
                            .color(palette.band_gap_marker()),
                    );
                });
        }
    }
}
