use std::fs::File;
use std::io::{BufWriter, Write};

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
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

fn main() -> std::io::Result<()> {
    let mut rng = SimpleRng::new(42);

    // Concentric test-point rings out to the 10-degree grid extent, plus
    // the foveal point. Sensitivity declines with eccentricity.
    let rings: [(f64, usize); 5] = [(1.0, 4), (3.0, 8), (5.0, 12), (7.0, 16), (9.0, 20)];

    let table_path = "microperimetry.txt";
    let mut out = BufWriter::new(File::create(table_path)?);

    writeln!(out, "ID x_deg y_deg Threshold")?;

    let mut id = 1;
    writeln!(out, "{id} 0.00 0.00 {:.1}", rng.gauss(30.0, 0.8))?;
    id += 1;

    for &(radius, count) in &rings {
        for k in 0..count {
            let angle = 2.0 * std::f64::consts::PI * k as f64 / count as f64;
            let x = radius * angle.cos();
            let y = radius * angle.sin();
            let threshold = rng.gauss(30.0 - 0.5 * radius, 0.8);
            writeln!(out, "{id} {x:.2} {y:.2} {threshold:.1}")?;
            id += 1;
        }
    }
    out.flush()?;

    std::fs::write("config.json", format!("{{\"microperimetry\": \"{table_path}\"}}\n"))?;

    println!("Wrote {} test points to {table_path}", id - 1);
    Ok(())
}
