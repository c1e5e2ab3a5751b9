//! Write a synthetic `throun_data.csv` with the columns the dashboard reads.
//!
//! Usage: `cargo run --bin generate_sample [OUTPUT]` (default `data/throun_data.csv`).

use std::path::PathBuf;

/// Small deterministic xorshift generator, good enough for fake data.
struct SimpleRng(u64);

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[-1, 1)`.
    fn jitter(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 52) as f64 - 1.0
    }
}

struct Metric {
    name: &'static str,
    is_percent: bool,
    base: f64,
    trend: f64,
    noise: f64,
}

const MUNICIPALITIES: [(&str, f64); 8] = [
    ("Reykjavíkurborg", 1.15),
    ("Garðabær", 0.85),
    ("Kópavogsbær", 1.0),
    ("Hafnarfjarðarkaupstaður", 1.1),
    ("Seltjarnarnesbær", 0.7),
    ("Mosfellsbær", 0.95),
    ("Akureyrarbær", 1.05),
    ("Reykjanesbær", 1.3),
];

const SEGMENTS: [(&str, f64); 2] = [("A-hluti", 1.0), ("A- og B-hluti", 1.4)];

const METRICS: [Metric; 4] = [
    Metric {
        name: "Nettóskuldir sem hlutfall af tekjum",
        is_percent: true,
        base: 0.9,
        trend: -0.015,
        noise: 0.06,
    },
    Metric {
        name: "Skuldaviðmið",
        is_percent: true,
        base: 0.8,
        trend: -0.01,
        noise: 0.05,
    },
    Metric {
        name: "Veltufé frá rekstri sem hlutfall af tekjum",
        is_percent: true,
        base: 0.08,
        trend: 0.002,
        noise: 0.02,
    },
    Metric {
        name: "Íbúafjöldi (þús.)",
        is_percent: false,
        base: 20.0,
        trend: 0.4,
        noise: 0.3,
    },
];

fn main() {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/throun_data.csv"));
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).expect("Failed to create output directory");
    }

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output).expect("Failed to create output file");
    writer
        .write_record(["sveitarfelag", "ar", "hluti", "name", "y", "is_percent"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for (municipality, scale) in MUNICIPALITIES {
        for (segment, seg_scale) in SEGMENTS {
            for metric in &METRICS {
                for (i, year) in (2014..=2023).enumerate() {
                    let value = (metric.base + metric.trend * i as f64) * scale * seg_scale
                        + metric.noise * rng.jitter();
                    writer
                        .write_record([
                            municipality.to_string(),
                            year.to_string(),
                            segment.to_string(),
                            metric.name.to_string(),
                            format!("{value:.4}"),
                            metric.is_percent.to_string(),
                        ])
                        .expect("Failed to write row");
                    rows += 1;
                }
            }
        }
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} rows to {}", output.display());
}
