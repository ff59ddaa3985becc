use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use gapfinder::optics::{AcquisitionMode, TransitionType};

use crate::state::AppState;

const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Left side panel – analysis controls
// ---------------------------------------------------------------------------

/// Render the column / mode / fit-range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No data loaded.");
        return;
    };
    let columns: Vec<String> = table.column_names.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Column selection ----
            ui.strong("Wavelength column (nm)");
            if let Some(col) = column_combo(ui, "wavelength_column", &columns, state.wavelength_column.as_deref()) {
                state.set_wavelength_column(col);
            }

            ui.strong("Signal column");
            if let Some(col) = column_combo(ui, "signal_column", &columns, state.signal_column.as_deref()) {
                state.set_signal_column(col);
            }
            ui.separator();

            // ---- Mode / transition ----
            ui.strong("Acquisition mode");
            ui.horizontal(|ui: &mut Ui| {
                for mode in AcquisitionMode::ALL {
                    if ui.selectable_label(state.mode == mode, mode.label()).clicked() {
                        state.set_mode(mode);
                    }
                }
            });

            ui.strong("Electronic transition");
            ui.horizontal(|ui: &mut Ui| {
                for transition in TransitionType::ALL {
                    if ui
                        .selectable_label(state.transition == transition, transition.to_string())
                        .clicked()
                    {
                        state.set_transition(transition);
                    }
                }
            });
            ui.separator();

            // ---- Linear region ----
            ui.strong("Linear region (eV)");
            if let Some((lo, hi)) = state.energy_bounds {
                let (mut x_min, mut x_max) = state.fit_range;
                let changed_min = ui
                    .add(egui::DragValue::new(&mut x_min).speed(0.005).range(lo..=hi).prefix("min "))
                    .changed();
                let changed_max = ui
                    .add(egui::DragValue::new(&mut x_max).speed(0.005).range(lo..=hi).prefix("max "))
                    .changed();
                if changed_min || changed_max {
                    state.set_fit_range(x_min, x_max);
                }
                if ui.small_button("Full range").clicked() {
                    state.set_fit_range(lo, hi);
                }
            } else {
                ui.label("No finite photon energies.");
            }
            ui.separator();

            // ---- Result ----
            match state.report.as_ref().map(|r| (r.band_gap, r.fit)) {
                Some((band_gap, fit)) => {
                    ui.label(
                        RichText::new(format!("Estimated Band Gap: {band_gap}"))
                            .strong()
                            .size(16.0),
                    );
                    ui.label(format!(
                        "slope {:.4}, intercept {:.4} ({} points)",
                        fit.slope, fit.intercept, fit.points_used
                    ));
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.button("Save CSV…").clicked() {
                            save_file_dialog(state, "csv");
                        }
                        if ui.button("Save TXT…").clicked() {
                            save_file_dialog(state, "txt");
                        }
                    });
                }
                None => {
                    ui.label("No band gap available.");
                }
            }
        });
}

/// Combo box over `columns`; returns the newly chosen column, if any.
fn column_combo(ui: &mut Ui, id: &str, columns: &[String], current: Option<&str>) -> Option<String> {
    let mut chosen = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or("–"))
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui.selectable_label(current == Some(col.as_str()), col).clicked() {
                    chosen = Some(col.clone());
                }
            }
        });
    chosen
}

// ---------------------------------------------------------------------------
// Right side panel – literature
// ---------------------------------------------------------------------------

pub fn literature_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Literature");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Material");
        ui.text_edit_singleline(&mut state.material);
    });
    if ui
        .add_enabled(!state.material.trim().is_empty(), egui::Button::new("Search Crossref"))
        .clicked()
    {
        state.search_literature();
    }

    ScrollArea::vertical()
        .id_salt("works")
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui: &mut Ui| {
            for work in &state.works {
                let title = if work.title.is_empty() { "(untitled)" } else { work.title.as_str() };
                egui::CollapsingHeader::new(title)
                    .id_salt(work.doi.as_deref().unwrap_or(title))
                    .default_open(work.extracted_band_gap.is_some())
                    .show(ui, |ui: &mut Ui| {
                        if let Some(doi) = &work.doi {
                            ui.label(format!("DOI: {doi}"));
                        }
                        match (work.estimate(), work.source) {
                            (Some(estimate), Some(source)) => {
                                ui.label(RichText::new(format!("{estimate} ({source})")).strong());
                            }
                            (Some(estimate), None) => {
                                ui.label(RichText::new(estimate.to_string()).strong());
                            }
                            (None, _) => {
                                ui.label("No band-gap value found.");
                            }
                        }
                        if let Some(note) = &work.note {
                            ui.label(RichText::new(note).color(Color32::GRAY));
                        }
                    });
            }
        });
    ui.separator();

    // ---- Comparison ----
    ui.strong("Compare with literature value");
    ui.horizontal(|ui: &mut Ui| {
        ui.text_edit_singleline(&mut state.literature_value);
        if ui.button("Compare").clicked() {
            state.compare_with_literature();
        }
    });
    if let Some(c) = &state.comparison {
        let (text, color) = if c.within_tolerance {
            ("within tolerance", Color32::GREEN)
        } else {
            ("outside tolerance", Color32::RED)
        };
        ui.label(
            RichText::new(format!(
                "{:.2} eV vs {:.2} eV: Δ = {:.3} eV, {text}",
                c.computed_ev, c.literature_ev, c.difference_ev
            ))
            .color(color),
        );
    }
}

// ---------------------------------------------------------------------------
// Data preview
// ---------------------------------------------------------------------------

/// First rows of the loaded table.
pub fn data_preview(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };
    let title = format!(
        "Data Preview – {} ({} rows)",
        state.source_name.as_deref().unwrap_or(""),
        table.len()
    );

    egui::CollapsingHeader::new(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().at_least(70.0), table.column_names.len())
                .header(20.0, |mut header| {
                    for name in &table.column_names {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for row in table.head(PREVIEW_ROWS) {
                        body.row(18.0, |mut cells| {
                            for cell in row {
                                cells.col(|ui: &mut Ui| {
                                    ui.label(cell.to_string());
                                });
                            }
                        });
                    }
                });
        });
    ui.separator();
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
            let can_export = state.report.is_some();
            if ui.add_enabled(can_export, egui::Button::new("Save CSV…")).clicked() {
                save_file_dialog(state, "csv");
                ui.close_menu();
            }
            if ui.add_enabled(can_export, egui::Button::new("Save TXT…")).clicked() {
                save_file_dialog(state, "txt");
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} – {} rows",
                state.source_name.as_deref().unwrap_or(""),
                table.len()
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
        .set_title("Open spectral data")
        .add_filter("Supported files", &["csv", "txt", "tsv", "json", "parquet", "pq", "xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Tab-delimited text", &["txt", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("Excel", &["xlsx", "xls"])
        .pick_file();

    if let Some(path) = file {
        match gapfinder::data::loader::load_file(&path) {
            Ok(table) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                state.set_table(table, name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn save_file_dialog(state: &mut AppState, extension: &str) {
    let file = rfd::FileDialog::new()
        .set_title("Save band gap results")
        .add_filter(extension.to_ascii_uppercase(), &[extension])
        .set_file_name(format!("band_gap_results.{extension}"))
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}
