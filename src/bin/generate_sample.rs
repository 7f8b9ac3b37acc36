use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// (region, city, latitude, longitude, relative activity)
const SOURCES: &[(&str, &str, f64, f64, u32)] = &[
    ("EGE DENIZI", "IZMIR", 38.42, 27.14, 9),
    ("SINDIRGI", "BALIKESIR", 39.24, 28.17, 7),
    ("DOGANYOL", "MALATYA", 38.31, 39.02, 8),
    ("PAZARCIK", "KAHRAMANMARAS", 37.48, 37.29, 10),
    ("NURDAGI", "GAZIANTEP", 37.18, 36.73, 5),
    ("ERCIS", "VAN", 39.03, 43.36, 6),
    ("DATCA", "MUGLA", 36.73, 27.68, 6),
    ("AKDENIZ", "ANTALYA", 36.20, 30.80, 4),
    ("SIMAV", "KUTAHYA", 39.09, 28.98, 4),
    ("DUZCE MERKEZ", "DUZCE", 40.84, 31.16, 3),
    ("MARMARA DENIZI", "TEKIRDAG", 40.75, 27.80, 3),
    ("SIVRICE", "ELAZIG", 38.45, 39.31, 5),
    ("KARLIOVA", "BINGOL", 39.29, 41.01, 3),
    ("GOLYAKA", "DUZCE", 40.77, 30.99, 2),
    ("SAMANDAG", "HATAY", 36.08, 35.97, 4),
    ("KULU", "KONYA", 39.09, 33.08, 2),
    ("YESILYURT", "TOKAT", 40.00, 36.22, 1),
    ("KIGI", "BINGOL", 39.31, 40.35, 2),
    ("AYVACIK", "CANAKKALE", 39.60, 26.40, 3),
    ("ILICA", "ERZURUM", 39.95, 41.11, 2),
    ("GOKSUN", "KAHRAMANMARAS", 38.02, 36.50, 4),
    ("ADALAR", "ISTANBUL", 40.87, 29.09, 2),
    ("SAIMBEYLI", "ADANA", 37.99, 36.09, 1),
];

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

struct Row {
    date: String,
    latitude: f64,
    longitude: f64,
    depth: f64,
    magnitude: String,
    location: Option<String>,
}

/// Gutenberg–Richter with b = 1, starting at M4.0 and capped at M7.8.
fn magnitude(rng: &mut SimpleRng) -> f64 {
    let u = rng.next_f64().max(1e-9);
    let m = (4.0 - u.log10()).min(7.8);
    (m * 10.0).round() / 10.0
}

fn pick_source(rng: &mut SimpleRng) -> &'static (&'static str, &'static str, f64, f64, u32) {
    let total: u32 = SOURCES.iter().map(|s| s.4).sum();
    let mut ticket = rng.below(total as u64) as u32;
    for source in SOURCES {
        if ticket < source.4 {
            return source;
        }
        ticket -= source.4;
    }
    &SOURCES[SOURCES.len() - 1]
}

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = (0..n)
        .map(|i| {
            let (region, city, lat, lon, _) = *pick_source(rng);
            Row {
                date: format!(
                    "{:04}.{:02}.{:02} {:02}:{:02}:{:02}",
                    2000 + (i % 24),
                    1 + rng.below(12),
                    1 + rng.below(28),
                    rng.below(24),
                    rng.below(60),
                    rng.below(60)
                ),
                latitude: lat + (rng.next_f64() - 0.5) * 0.4,
                longitude: lon + (rng.next_f64() - 0.5) * 0.4,
                depth: 2.0 + rng.next_f64() * 25.0,
                magnitude: format!("{:.1}", magnitude(rng)),
                location: Some(format!("{region} ({city})")),
            }
        })
        .collect();

    // A handful of rows the cleaner must drop.
    if rows.len() >= 4 {
        rows[0].magnitude = "abc".to_string();
        rows[1].location = Some("ACIKDENIZ".to_string());
        rows[2].location = None;
        rows[3].magnitude = String::new();
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    // Padded labels, as found in the published catalogue exports.
    writer.write_record(["Date", " Latitude", " Longitude", " Depth", " Magnitude ", "Location"])?;
    for row in rows {
        writer.write_record([
            row.date.clone(),
            format!("{:.4}", row.latitude),
            format!("{:.4}", row.longitude),
            format!("{:.1}", row.depth),
            row.magnitude.clone(),
            row.location.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> anyhow::Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Date", DataType::Utf8, false),
        Field::new("Latitude", DataType::Float64, false),
        Field::new("Longitude", DataType::Float64, false),
        Field::new("Depth", DataType::Float64, false),
        Field::new("Magnitude", DataType::Utf8, false),
        Field::new("Location", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.date.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.latitude))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.longitude))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.depth))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.magnitude.as_str()))),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.location.as_deref()).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 2_000);

    write_csv("sample_earthquakes.csv", &rows)?;
    write_parquet("sample_earthquakes.parquet", &rows)?;

    println!(
        "Wrote {} earthquakes to sample_earthquakes.csv and sample_earthquakes.parquet",
        rows.len()
    );
    Ok(())
}
