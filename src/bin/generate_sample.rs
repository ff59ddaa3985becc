//! Writes a synthetic diffuse-reflectance spectrum with a known direct band gap
//! to `sample_data.parquet` and `sample_data.csv`.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use gapfinder::optics::tauc::photon_energy;

/// Band gap of the synthetic material (eV), close to ZnO.
const BAND_GAP_EV: f64 = 3.3;
/// Slope of `(alpha·hν)²` above the gap.
const TAUC_SLOPE: f64 = 12.0;
/// Weak sub-gap absorption (Urbach tail) so the spectrum is not flat below the edge.
const URBACH_ENERGY_EV: f64 = 0.05;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Kubelka–Munk alpha for a direct-gap absorber with an exponential tail.
fn absorption(energy_ev: f64) -> f64 {
    let tail = 0.02 * ((energy_ev - BAND_GAP_EV) / URBACH_ENERGY_EV).min(0.0).exp();
    let edge = if energy_ev > BAND_GAP_EV {
        (TAUC_SLOPE * (energy_ev - BAND_GAP_EV)).sqrt() / energy_ev
    } else {
        0.0
    };
    edge + tail
}

/// Reflectance whose Kubelka–Munk function equals `alpha`.
fn reflectance_for(alpha: f64) -> f64 {
    1.0 + alpha - (alpha * alpha + 2.0 * alpha).sqrt()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // 250 → 700 nm, step 1
    let wavelengths: Vec<f64> = (0..=450).map(|i| 250.0 + i as f64).collect();
    let reflectance: Vec<f64> = wavelengths
        .iter()
        .map(|&w| {
            let r = reflectance_for(absorption(photon_energy(w)));
            (r + rng.gauss(0.0, 0.002)).clamp(1e-4, 1.0)
        })
        .collect();

    // Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("wavelength_nm", DataType::Float64, false),
        Field::new("reflectance", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(wavelengths.clone())),
            Arc::new(Float64Array::from(reflectance.clone())),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sample_data.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    // CSV
    let csv_path = "sample_data.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    csv_writer.write_record(["wavelength_nm", "reflectance"])?;
    for (w, r) in wavelengths.iter().zip(&reflectance) {
        csv_writer.write_record([w.to_string(), r.to_string()])?;
    }
    csv_writer.flush()?;

    println!(
        "Wrote {} samples (direct gap {BAND_GAP_EV} eV) to {parquet_path} and {csv_path}",
        wavelengths.len()
    );
    println!("Try: gapfinder-cli analyze {csv_path} -w wavelength_nm -s reflectance --min 3.4 --max 3.8");
    Ok(())
}
