//! Writes a deterministic sample `spacex_launch_dash.csv` so the dashboard
//! runs out of the box. Pass a path argument to write elsewhere.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xorshift64*).
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (booster version category, success probability, payload range in kg)
const BOOSTERS: &[(&str, f64, (f64, f64))] = &[
    ("v1.0", 0.40, (0.0, 700.0)),
    ("v1.1", 0.55, (500.0, 4500.0)),
    ("FT", 0.78, (1500.0, 9600.0)),
    ("B4", 0.82, (2000.0, 9600.0)),
    ("B5", 0.95, (2500.0, 9600.0)),
];

const SITES: &[&str] = &[
    "CCAFS LC-40",
    "CCAFS SLC-40",
    "KSC LC-39A",
    "VAFB SLC-4E",
];

const ROWS: usize = 56;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "spacex_launch_dash.csv".to_string());

    let mut rng = SampleRng::new(20100604); // first Falcon 9 flight
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {path}"))?;

    writer.write_record([
        "Launch Site",
        "Payload Mass (kg)",
        "class",
        "Booster Version Category",
    ])?;

    for _ in 0..ROWS {
        let &(booster, success_p, (lo, hi)) = rng.pick(BOOSTERS);
        let site = rng.pick(SITES);
        let payload = lo + rng.next_f64() * (hi - lo);
        let class = if rng.next_f64() < success_p { 1 } else { 0 };

        writer.write_record([
            site.to_string(),
            format!("{payload:.1}"),
            class.to_string(),
            booster.to_string(),
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {ROWS} launch records to {path}");
    Ok(())
}
