//! Writes a deterministic `movies.csv` for trying out the explorer.

use std::error::Error;

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// `1234567` → `"1,234,567"`, the way the real dataset writes gross.
fn with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

const GENRES: [&str; 8] = [
    "Drama",
    "Action",
    "Comedy",
    "Crime, Drama",
    "Adventure, Sci-Fi",
    "Animation, Family",
    "Horror",
    "Biography, History",
];

const WORDS_A: [&str; 10] = [
    "Silent", "Crimson", "Last", "Hidden", "Broken", "Golden", "Midnight", "Distant", "Iron",
    "Wild",
];

const WORDS_B: [&str; 10] = [
    "Harbor", "Empire", "Garden", "Signal", "Frontier", "Promise", "Witness", "Voyage", "Kingdom",
    "Echo",
];

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);
    let output_path = "movies.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    writer.write_record([
        "Series_Title",
        "Released_Year",
        "Certificate",
        "Genre",
        "IMDB_Rating",
        "No_of_Votes",
        "Gross",
    ])?;

    let n_movies = 250;
    let mut written = 0;
    for i in 0..n_movies {
        let title = format!("The {} {}", rng.pick(&WORDS_A), rng.pick(&WORDS_B));
        let genre = rng.pick(&GENRES);
        let year = rng.range(1950.0, 2023.0) as i32;
        // Skewed towards the 7-9 band like a curated top list.
        let rating = (rng.range(5.0, 9.3) * 10.0).round() / 10.0;
        let votes = (rng.range(25_000.0, 2_000_000.0) * (rating / 9.3)) as u64;
        let gross = (rng.range(0.2, 1.0) * votes as f64 * rng.range(50.0, 400.0)) as u64;

        // A few rows that the loader is expected to drop.
        let (year_cell, rating_cell, gross_cell) = match i % 50 {
            7 => ("PG".to_string(), format!("{rating:.1}"), with_separators(gross)),
            19 => (year.to_string(), "N/A".to_string(), with_separators(gross)),
            33 => (year.to_string(), format!("{rating:.1}"), String::new()),
            _ => (year.to_string(), format!("{rating:.1}"), with_separators(gross)),
        };

        writer.write_record([
            title.as_str(),
            year_cell.as_str(),
            rng.pick(&["U", "UA", "A", "R", "PG-13"]),
            genre,
            rating_cell.as_str(),
            votes.to_string().as_str(),
            gross_cell.as_str(),
        ])?;
        written += 1;
    }
    writer.flush()?;

    println!("Wrote {written} movies to {output_path}");
    Ok(())
}
