use std::path::Path;

use gapfinder::compare::{self, Comparison};
use gapfinder::config::Settings;
use gapfinder::data::model::DataTable;
use gapfinder::export;
use gapfinder::literature::{LiteratureSearcher, LiteratureWork, ReqwestTransport};
use gapfinder::optics::{
    AcquisitionMode, OpticalQuantities, SpectralSeries, TaucSeries, TransitionType, tauc, transform,
};
use gapfinder::pipeline::{self, TaucReport, TaucRequest};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which plot the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotView {
    Signal,
    Absorbance,
    #[default]
    Tauc,
}

/// Series prepared for plotting; present whenever the selected columns are numeric.
pub struct Preview {
    pub series: SpectralSeries,
    pub optics: OpticalQuantities,
    pub tauc: TaucSeries,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded table (None until user loads a file).
    pub table: Option<DataTable>,
    pub source_name: Option<String>,

    pub wavelength_column: Option<String>,
    pub signal_column: Option<String>,
    pub mode: AcquisitionMode,
    pub transition: TransitionType,

    /// Selected linear region (eV) and the finite photon-energy bounds it may span.
    pub fit_range: (f64, f64),
    pub energy_bounds: Option<(f64, f64)>,

    pub preview: Option<Preview>,
    /// Fit result for the current selection (None if the fit failed).
    pub report: Option<TaucReport>,

    pub view: PlotView,

    pub material: String,
    pub works: Vec<LiteratureWork>,
    pub literature_value: String,
    pub comparison: Option<Comparison>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            table: None,
            source_name: None,
            wavelength_column: None,
            signal_column: None,
            mode: AcquisitionMode::default(),
            transition: TransitionType::default(),
            fit_range: (0.0, 0.0),
            energy_bounds: None,
            preview: None,
            report: None,
            view: PlotView::default(),
            material: String::new(),
            works: Vec::new(),
            literature_value: String::new(),
            comparison: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table and pick default wavelength/signal columns.
    pub fn set_table(&mut self, table: DataTable, source_name: String) {
        let numeric = table.numeric_columns();
        self.wavelength_column = numeric.first().map(|s| s.to_string());
        self.signal_column = numeric.get(1).or(numeric.first()).map(|s| s.to_string());

        self.table = Some(table);
        self.source_name = Some(source_name);
        self.status_message = None;
        self.refresh(true);
    }

    pub fn set_wavelength_column(&mut self, column: String) {
        self.wavelength_column = Some(column);
        self.refresh(true);
    }

    pub fn set_signal_column(&mut self, column: String) {
        self.signal_column = Some(column);
        self.refresh(true);
    }

    pub fn set_mode(&mut self, mode: AcquisitionMode) {
        self.mode = mode;
        self.refresh(false);
    }

    pub fn set_transition(&mut self, transition: TransitionType) {
        self.transition = transition;
        self.refresh(false);
    }

    pub fn set_fit_range(&mut self, x_min: f64, x_max: f64) {
        self.fit_range = (x_min, x_max);
        self.refresh(false);
    }

    /// Rebuild the preview and rerun the fit. `reset_range` widens the fit
    /// range to the full photon-energy span (new axis).
    pub fn refresh(&mut self, reset_range: bool) {
        self.report = None;
        self.comparison = None;
        self.preview = match self.build_preview() {
            Ok(preview) => Some(preview),
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                None
            }
        };

        let Some(preview) = &self.preview else {
            self.energy_bounds = None;
            return;
        };
        self.energy_bounds = preview.tauc.energy_bounds();
        if reset_range {
            if let Some(bounds) = self.energy_bounds {
                self.fit_range = bounds;
            }
        }

        let request = TaucRequest {
            transition: self.transition,
            fit_range: Some(self.fit_range),
        };
        match pipeline::analyze(preview.series.clone(), &request) {
            Ok(report) => {
                self.status_message = None;
                self.report = Some(report);
            }
            Err(e) => {
                log::warn!("fit failed: {e}");
                self.status_message = Some(format!("Fit failed: {e}"));
            }
        }
    }

    fn build_preview(&self) -> gapfinder::Result<Preview> {
        let (Some(table), Some(wl), Some(sig)) =
            (&self.table, &self.wavelength_column, &self.signal_column)
        else {
            return Err(gapfinder::AnalysisError::Validation(
                "select wavelength and signal columns".into(),
            ));
        };
        let series = table.spectral_series(wl, sig, self.mode)?;
        let optics = transform::transform(&series);
        let tauc = tauc::tauc_series(&series, &optics, self.transition);
        Ok(Preview {
            series,
            optics,
            tauc,
        })
    }

    /// Query the literature for `self.material`. Blocks until done.
    pub fn search_literature(&mut self) {
        self.works.clear();
        let transport = match ReqwestTransport::new() {
            Ok(t) => t,
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };
        let searcher = LiteratureSearcher::new(
            &transport,
            self.settings.literature.clone(),
            &self.settings.extraction,
        );
        match searcher.search(&self.material) {
            Ok(works) => {
                if let Some(value) = works.iter().find_map(|w| w.extracted_band_gap) {
                    self.literature_value = format!("{value} eV");
                }
                self.works = works;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("literature search failed: {e}");
                self.status_message = Some(format!("Literature search failed: {e}"));
            }
        }
    }

    /// Compare the computed band gap with `self.literature_value`.
    pub fn compare_with_literature(&mut self) {
        let Some(report) = &self.report else {
            self.status_message = Some("No band gap computed yet".into());
            return;
        };
        match compare::compare(report.band_gap.value_ev, &self.literature_value) {
            Ok(comparison) => {
                self.comparison = Some(comparison);
                self.status_message = None;
            }
            Err(e) => {
                self.comparison = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn export(&mut self, path: &Path) {
        let Some(report) = &self.report else {
            return;
        };
        match export::export_to_path(report, path) {
            Ok(()) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gapfinder::data::model::CellValue;

    fn table() -> DataTable {
        let rows = (0..20)
            .map(|i| {
                let wl = 300.0 + i as f64 * 20.0;
                vec![
                    CellValue::Text(format!("s{i}")),
                    CellValue::Number(wl),
                    CellValue::Number(0.05 + i as f64 * 0.04),
                ]
            })
            .collect();
        DataTable::from_rows(vec!["id".into(), "nm".into(), "R".into()], rows)
    }

    #[test]
    fn loading_picks_numeric_columns_and_fits() {
        let mut state = AppState::new(Settings::default());
        state.set_table(table(), "sample.csv".into());
        assert_eq!(state.wavelength_column.as_deref(), Some("nm"));
        assert_eq!(state.signal_column.as_deref(), Some("R"));
        assert!(state.preview.is_some());
        assert!(state.report.is_some());
        assert_eq!(Some(state.fit_range), state.energy_bounds);
    }

    #[test]
    fn text_column_reports_an_error() {
        let mut state = AppState::new(Settings::default());
        state.set_table(table(), "sample.csv".into());
        state.set_signal_column("id".into());
        assert!(state.preview.is_none());
        assert!(state.report.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn narrow_range_fails_the_fit_but_keeps_preview() {
        let mut state = AppState::new(Settings::default());
        state.set_table(table(), "sample.csv".into());
        state.set_fit_range(10.0, 10.5);
        assert!(state.preview.is_some());
        assert!(state.report.is_none());
        assert!(state.status_message.as_deref().unwrap_or_default().contains("Fit failed"));
    }

    #[test]
    fn comparison_uses_the_computed_gap() {
        let mut state = AppState::new(Settings::default());
        state.set_table(table(), "sample.csv".into());
        let gap = state.report.as_ref().unwrap().band_gap.value_ev;
        state.literature_value = format!("{gap} eV");
        state.compare_with_literature();
        assert!(state.comparison.unwrap().within_tolerance);

        state.literature_value = "n/a".into();
        state.compare_with_literature();
        assert!(state.comparison.is_none());
    }
}
