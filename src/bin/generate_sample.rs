//! Generate a deterministic synthetic climate table for trying the dashboard:
//! `cargo run --bin generate_sample` writes `climate_data_cleaned.csv`.

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

/// Per-country baselines: (name, co2 t/cap, renewable %, temp °C, forest %,
/// rainfall mm, population millions).
const COUNTRIES: [(&str, f64, f64, f64, f64, f64, f64); 20] = [
    ("United States", 15.0, 12.0, 12.0, 33.0, 760.0, 330.0),
    ("China", 7.5, 15.0, 9.0, 22.0, 640.0, 1400.0),
    ("India", 1.8, 20.0, 25.0, 24.0, 1080.0, 1380.0),
    ("Germany", 9.0, 25.0, 9.5, 32.0, 700.0, 83.0),
    ("Brazil", 2.3, 45.0, 25.5, 59.0, 1760.0, 212.0),
    ("Norway", 8.0, 70.0, 2.0, 33.0, 1410.0, 5.4),
    ("Japan", 9.2, 12.0, 15.0, 68.0, 1670.0, 126.0),
    ("Australia", 16.5, 11.0, 21.5, 17.0, 530.0, 25.0),
    ("Canada", 15.5, 25.0, -5.0, 38.0, 540.0, 38.0),
    ("United Kingdom", 5.6, 18.0, 9.8, 13.0, 1220.0, 67.0),
    ("France", 4.8, 16.0, 12.0, 31.0, 870.0, 65.0),
    ("Russia", 11.5, 8.0, -5.5, 49.0, 460.0, 144.0),
    ("Indonesia", 2.2, 30.0, 26.5, 49.0, 2700.0, 273.0),
    ("South Africa", 7.4, 6.0, 17.5, 7.5, 490.0, 59.0),
    ("Mexico", 3.7, 17.0, 21.0, 34.0, 760.0, 128.0),
    ("Kenya", 0.4, 75.0, 25.0, 6.3, 630.0, 53.0),
    ("Sweden", 3.8, 56.0, 2.5, 69.0, 620.0, 10.3),
    ("Chile", 4.6, 42.0, 8.5, 24.0, 1520.0, 19.0),
    ("Saudi Arabia", 17.0, 0.5, 26.0, 0.5, 59.0, 35.0),
    ("Nigeria", 0.6, 80.0, 27.0, 23.0, 1150.0, 206.0),
];

const FIRST_YEAR: i32 = 2000;
const LAST_YEAR: i32 = 2023;

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "climate_data_cleaned.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Year",
            "Country",
            "CO2 Emissions (Tons/Capita)",
            "Renewable Energy (%)",
            "Average Temperature (°C)",
            "Forest Area (%)",
            "Extreme Weather Events",
            "Sea Level Rise (mm)",
            "Rainfall (mm)",
            "Population",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for year in FIRST_YEAR..=LAST_YEAR {
        // Years since 2000, driving the global trends.
        let t = (year - FIRST_YEAR) as f64;
        for (name, co2, renew, temp, forest, rain, pop_m) in COUNTRIES {
            // Emissions rise early then flatten; renewables and warming climb.
            let co2_v = (co2 * (1.0 + 0.012 * t - 0.0004 * t * t) + rng.gauss(0.0, co2 * 0.04))
                .max(0.05);
            let renew_v = (renew + 0.55 * t + rng.gauss(0.0, 1.2)).clamp(0.0, 100.0);
            let temp_v = temp + 0.035 * t + rng.gauss(0.0, 0.35);
            let forest_v = (forest - 0.06 * t + rng.gauss(0.0, 0.3)).clamp(0.0, 100.0);
            let events = (2.0 + 0.28 * t + rng.gauss(0.0, 1.4)).max(0.0).round();
            let sea_v = 3.2 * t + rng.gauss(0.0, 2.0);
            let rain_v = (rain + rng.gauss(0.0, rain * 0.06)).max(0.0);
            let pop = (pop_m * 1.0e6 * (1.0 + 0.008 * t)).round();

            writer
                .write_record([
                    year.to_string(),
                    name.to_string(),
                    format!("{co2_v:.3}"),
                    format!("{renew_v:.2}"),
                    format!("{temp_v:.2}"),
                    format!("{forest_v:.2}"),
                    format!("{events}"),
                    format!("{sea_v:.1}"),
                    format!("{rain_v:.1}"),
                    format!("{pop}"),
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!(
        "Wrote {rows} rows ({} countries, {}-{}) to {output_path}",
        COUNTRIES.len(),
        FIRST_YEAR,
        LAST_YEAR
    );
}
