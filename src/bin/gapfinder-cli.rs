//! GapFinder command-line interface.
//!
//! ```sh
//! gapfinder-cli columns spectrum.csv
//! gapfinder-cli analyze spectrum.csv -w "Wavelength (nm)" -s R --min 3.1 --max 3.5 -o results.csv
//! gapfinder-cli literature "TiO2 anatase"
//! gapfinder-cli compare 3.21 "3.2 eV"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use gapfinder::compare;
use gapfinder::config::Settings;
use gapfinder::data::loader::load_file;
use gapfinder::export;
use gapfinder::literature::{LiteratureSearcher, ReqwestTransport};
use gapfinder::optics::{AcquisitionMode, TransitionType};
use gapfinder::pipeline::{TaucRequest, analyze};

#[derive(Parser)]
#[command(name = "gapfinder-cli")]
#[command(about = "Band gap estimation from Tauc plots, with a literature cross-check")]
#[command(version)]
struct Cli {
    /// TOML settings file (literature endpoints, extraction heuristics).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the columns of a data file and which of them are numeric.
    Columns {
        /// Data file (.csv, .txt, .tsv, .json, .parquet, .xlsx).
        file: PathBuf,
    },
    /// Compute the band gap of a spectrum.
    Analyze {
        /// Data file (.csv, .txt, .tsv, .json, .parquet, .xlsx).
        file: PathBuf,
        /// Column holding the wavelength in nm.
        #[arg(short, long)]
        wavelength: String,
        /// Column holding reflectance or transmittance.
        #[arg(short, long)]
        signal: String,
        /// `reflectance` (`r`) or `transmittance` (`t`).
        #[arg(short, long, default_value = "reflectance")]
        mode: AcquisitionMode,
        /// `direct` or `indirect`.
        #[arg(short, long, default_value = "direct")]
        transition: TransitionType,
        /// Lower bound of the linear region (eV).
        #[arg(long, requires = "max")]
        min: Option<f64>,
        /// Upper bound of the linear region (eV).
        #[arg(long, requires = "min")]
        max: Option<f64>,
        /// Export file; `.txt` writes the TXT layout, anything else CSV.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Literature value to compare against, e.g. "3.2 eV".
        #[arg(long)]
        literature: Option<String>,
    },
    /// Search Crossref for band-gap values of a material.
    Literature {
        /// Material name, e.g. "ZnO".
        material: String,
    },
    /// Compare a computed band gap with a literature value (0.1 eV tolerance).
    Compare {
        computed: f64,
        /// Literature value whose first token is numeric, e.g. "2.5 eV".
        literature: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Columns { file } => {
            let table = load_file(&file)?;
            let numeric = table.numeric_columns();
            println!("{} ({} rows)", file.display(), table.len());
            for name in &table.column_names {
                let kind = if numeric.contains(&name.as_str()) { "numeric" } else { "text" };
                println!("  {name:<30} {kind}");
            }
            Ok(())
        }
        Commands::Analyze {
            file,
            wavelength,
            signal,
            mode,
            transition,
            min,
            max,
            output,
            literature,
        } => {
            let table = load_file(&file)?;
            let series = table.spectral_series(&wavelength, &signal, mode)?;
            let request = TaucRequest {
                transition,
                fit_range: min.zip(max),
            };
            let report = analyze(series, &request)?;

            println!("Transition:          {}", request.transition);
            println!(
                "Fit region:          {:.3} – {:.3} eV ({} points)",
                report.fit.fit_domain[0], report.fit.fit_domain[1], report.fit.points_used
            );
            println!(
                "Linear fit:          y = {:.6}·E {:+.6}",
                report.fit.slope, report.fit.intercept
            );
            println!("Estimated Band Gap:  {}", report.band_gap);

            if let Some(path) = output {
                export::export_to_path(&report, &path)?;
                println!("Results written to {}", path.display());
            }

            if let Some(literature) = literature {
                let c = compare::compare(report.band_gap.value_ev, &literature)?;
                println!(
                    "Literature:          {:.2} eV (Δ = {:.3} eV, {})",
                    c.literature_ev,
                    c.difference_ev,
                    if c.within_tolerance { "within tolerance" } else { "outside tolerance" }
                );
            }
            Ok(())
        }
        Commands::Literature { material } => {
            let transport = ReqwestTransport::new()?;
            let searcher = LiteratureSearcher::new(&transport, settings.literature, &settings.extraction);
            let works = searcher
                .search(&material)
                .with_context(|| format!("searching literature for '{material}'"))?;

            if works.is_empty() {
                println!("No works found for '{material}'.");
            }
            for (i, work) in works.iter().enumerate() {
                let title = if work.title.is_empty() { "(untitled)" } else { &work.title };
                println!("{}. {title}", i + 1);
                if let Some(url) = &work.resolvable_url {
                    println!("   {url}");
                }
                match (work.estimate(), work.source) {
                    (Some(estimate), Some(source)) => println!("   band gap: {estimate} ({source})"),
                    (Some(estimate), None) => println!("   band gap: {estimate}"),
                    (None, _) => println!("   band gap: not found"),
                }
                if let Some(note) = &work.note {
                    println!("   note: {note}");
                }
            }
            Ok(())
        }
        Commands::Compare { computed, literature } => {
            if !computed.is_finite() {
                bail!("computed band gap must be finite, got {computed}");
            }
            let c = compare::compare(computed, &literature)?;
            println!(
                "{:.3} eV vs {:.3} eV: difference {:.3} eV, {}",
                c.computed_ev,
                c.literature_ev,
                c.difference_ev,
                if c.within_tolerance { "within tolerance" } else { "outside tolerance" }
            );
            Ok(())
        }
    }
}
