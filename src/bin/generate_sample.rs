use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

/// One synthetic measured cell.
struct Cell {
    sample: &'static str,
    x: Option<f64>,
    y: Option<f64>,
}

/// Draw `n` cells around quadrant-shaped clusters. `weights` gives the
/// share of cells per cluster as (weight, x_mean, y_mean).
fn generate_cells(
    sample: &'static str,
    n: usize,
    weights: &[(f64, f64, f64)],
    rng: &mut SimpleRng,
) -> Vec<Cell> {
    let total_weight: f64 = weights.iter().map(|w| w.0).sum();
    let mut cells = Vec::with_capacity(n);

    for _ in 0..n {
        let mut pick = rng.next_f64() * total_weight;
        let mut cluster = weights[0];
        for &w in weights {
            if pick < w.0 {
                cluster = w;
                break;
            }
            pick -= w.0;
        }
        let (_, mx, my) = cluster;
        let x = rng.gauss(mx, 45.0).max(0.0);
        let y = rng.gauss(my, 40.0).max(0.0);

        // ~2% dropout per channel, mimicking unreadable spreadsheet cells.
        let x = (rng.next_f64() >= 0.02).then_some(x);
        let y = (rng.next_f64() >= 0.02).then_some(y);

        cells.push(Cell { sample, x, y });
    }
    cells
}

fn write_csv(cells: &[Cell], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("creating csv");
    writer
        .write_record(["sample", "measurement_x", "measurement_y"])
        .expect("writing header");
    for cell in cells {
        // Missing values become "n/a" so the loader exercises lenient
        // coercion, exactly like a hand-edited spreadsheet would.
        writer
            .write_record([
                cell.sample.to_string(),
                cell.x.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".to_string()),
                cell.y.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".to_string()),
            ])
            .expect("writing row");
    }
    writer.flush().expect("flushing csv");
}

fn write_parquet(cells: &[Cell], path: &str) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("sample", DataType::Utf8, false),
        Field::new("measurement_x", DataType::Float64, true),
        Field::new("measurement_y", DataType::Float64, true),
    ]));

    let samples = StringArray::from(cells.iter().map(|c| c.sample).collect::<Vec<_>>());
    let xs = Float64Array::from(cells.iter().map(|c| c.x).collect::<Vec<_>>());
    let ys = Float64Array::from(cells.iter().map(|c| c.y).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(samples), Arc::new(xs), Arc::new(ys)],
    )
    .expect("building record batch");

    let file = std::fs::File::create(path).expect("creating parquet");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("creating writer");
    writer.write(&batch).expect("writing batch");
    writer.close().expect("closing writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // control: mostly resting (low/low) with a senescent high-P21 tail;
    // treated: pushed toward EdU⁺ and double-positive.
    let mut cells = generate_cells(
        "control",
        300,
        &[(0.55, 110.0, 100.0), (0.25, 110.0, 260.0), (0.20, 280.0, 120.0)],
        &mut rng,
    );
    cells.extend(generate_cells(
        "treated",
        300,
        &[(0.20, 110.0, 100.0), (0.35, 290.0, 260.0), (0.45, 290.0, 110.0)],
        &mut rng,
    ));

    write_csv(&cells, "demo_cells.csv");
    write_parquet(&cells, "demo_cells.parquet");

    println!(
        "Wrote {} cells for 2 samples to demo_cells.csv / demo_cells.parquet",
        cells.len()
    );
}
