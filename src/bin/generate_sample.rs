use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Per-species (mean, std) for bill length, bill depth, flipper length, mass.
struct SpeciesProfile {
    name: &'static str,
    count: usize,
    islands: &'static [&'static str],
    measurements: [(f64, f64); 4],
}

const PROFILES: [SpeciesProfile; 3] = [
    SpeciesProfile {
        name: "Adelie",
        count: 152,
        islands: &["Torgersen", "Biscoe", "Dream"],
        measurements: [(38.8, 2.7), (18.3, 1.2), (190.0, 6.5), (3700.0, 458.0)],
    },
    SpeciesProfile {
        name: "Gentoo",
        count: 124,
        islands: &["Biscoe"],
        measurements: [(47.5, 3.1), (15.0, 1.0), (217.0, 6.5), (5076.0, 504.0)],
    },
    SpeciesProfile {
        name: "Chinstrap",
        count: 68,
        islands: &["Dream"],
        measurements: [(48.8, 3.3), (18.4, 1.1), (196.0, 7.1), (3733.0, 384.0)],
    },
];

/// Rows with every measurement missing, matching the two gaps in the
/// published Palmer data.
const MISSING_ROWS: [usize; 2] = [3, 271];

#[derive(Serialize)]
struct Row {
    species: &'static str,
    island: &'static str,
    bill_length_mm: Option<f64>,
    bill_depth_mm: Option<f64>,
    flipper_length_mm: Option<f64>,
    body_mass_g: Option<f64>,
    sex: Option<&'static str>,
    year: i64,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for profile in &PROFILES {
        for i in 0..profile.count {
            let missing = MISSING_ROWS.contains(&rows.len());
            let mut m = profile
                .measurements
                .map(|(mean, sd)| Some((rng.gauss(mean, sd) * 10.0).round() / 10.0));
            // flipper length and body mass are whole numbers in the source
            m[2] = m[2].map(f64::round);
            m[3] = m[3].map(|g| (g / 25.0).round() * 25.0);
            if missing {
                m = [None; 4];
            }

            rows.push(Row {
                species: profile.name,
                island: rng.pick(profile.islands),
                bill_length_mm: m[0],
                bill_depth_mm: m[1],
                flipper_length_mm: m[2],
                body_mass_g: m[3],
                sex: (!missing).then(|| if i % 2 == 0 { "female" } else { "male" }),
                year: 2007 + (i % 3) as i64,
            });
        }
    }
    rows
}

fn na(v: Option<f64>) -> String {
    v.map_or_else(|| "NA".to_string(), |v| v.to_string())
}

fn write_csv(rows: &[Row], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "species",
            "island",
            "bill_length_mm",
            "bill_depth_mm",
            "flipper_length_mm",
            "body_mass_g",
            "sex",
            "year",
        ])
        .expect("Failed to write CSV header");
    for r in rows {
        writer
            .write_record([
                r.species.to_string(),
                r.island.to_string(),
                na(r.bill_length_mm),
                na(r.bill_depth_mm),
                na(r.flipper_length_mm),
                na(r.body_mass_g),
                r.sex.unwrap_or("NA").to_string(),
                r.year.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_json(rows: &[Row], path: &str) {
    let file = std::fs::File::create(path).expect("Failed to create JSON file");
    serde_json::to_writer_pretty(file, rows).expect("Failed to write JSON");
}

fn write_parquet(rows: &[Row], path: &str) {
    let float_col = |f: fn(&Row) -> Option<f64>| Float64Array::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.species).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.island).collect::<Vec<_>>())),
            Arc::new(float_col(|r| r.bill_length_mm)),
            Arc::new(float_col(|r| r.bill_depth_mm)),
            Arc::new(float_col(|r| r.flipper_length_mm)),
            Arc::new(float_col(|r| r.body_mass_g)),
            Arc::new(StringArray::from(rows.iter().map(|r| r.sex).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "penguins.csv");
    write_json(&rows, "penguins.json");
    write_parquet(&rows, "penguins.parquet");

    let missing = rows.iter().filter(|r| r.body_mass_g.is_none()).count();
    println!(
        "Wrote {} penguins ({missing} without body mass) to penguins.csv, penguins.json, penguins.parquet",
        rows.len()
    );
}
