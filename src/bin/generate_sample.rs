//! Writes a sample Horizon export and a matching wand scan for trying the tool.

use anyhow::{Context, Result};

const EXPORT_PATH: &str = "sample_export.txt";
const SCANNED_PATH: &str = "sample_scanned.csv";
const N_ITEMS: usize = 400;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Pick from `(value, weight)` pairs.
    fn weighted<'a>(&mut self, items: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for &(value, weight) in items {
            if roll < weight {
                return value;
            }
            roll -= weight;
        }
        items[items.len() - 1].0
    }
}

struct Item {
    barcode: String,
    title: String,
    call_number: String,
    location: &'static str,
    status: &'static str,
}

fn generate_items(rng: &mut SimpleRng) -> Vec<Item> {
    let adjectives = ["Silent", "Hidden", "Last", "Northern", "Broken", "Golden", "Distant"];
    let nouns = ["River", "Garden", "Archive", "Winter", "Harbor", "Orchard", "Signal"];
    let locations = ["Adult Fiction", "Adult Nonfiction", "Juvenile", "Reference", "Periodicals"];
    let statuses = [
        ("Checked In", 70.0),
        ("Checked Out", 15.0),
        ("Lost", 5.0),
        ("In Transit", 4.0),
        ("Missing", 3.0),
        ("On Hold Shelf", 3.0),
    ];

    (0..N_ITEMS)
        .map(|i| {
            // 14-digit library barcodes with the usual leading zeros
            let barcode = format!("3{:013}", 1_200_000 + i * 7);
            let title = format!("The {} {}", rng.pick(&adjectives), rng.pick(&nouns));
            let call_number = format!(
                "{:03}.{:02} {}",
                rng.next_u64() % 1000,
                rng.next_u64() % 100,
                &title[4..7].to_ascii_uppercase()
            );
            let location = rng.pick(&locations);
            let status = rng.weighted(&statuses);
            Item {
                barcode,
                title,
                call_number,
                location,
                status,
            }
        })
        .collect()
}

fn write_export(items: &[Item]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(EXPORT_PATH)
        .context("creating export file")?;
    writer.write_record(["Barcode", "Title", "Call Number", "Location", "Item Status"])?;
    for item in items {
        writer.write_record([
            item.barcode.as_str(),
            item.title.as_str(),
            item.call_number.as_str(),
            item.location,
            item.status,
        ])?;
    }
    writer.flush().context("writing export file")?;
    Ok(())
}

/// Scan most items that are on the shelf, a few more than once, plus some
/// barcodes the export does not know about.
fn write_scanned(items: &[Item], rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(SCANNED_PATH)
        .context("creating scanned file")?;
    writer.write_record(["Barcode", "Scanned By"])?;

    let wands = ["wand-1", "wand-2"];
    let mut n_scans = 0;
    for item in items {
        let on_shelf = item.status == "Checked In" || item.status == "Lost";
        if on_shelf && rng.next_f64() < 0.92 {
            writer.write_record([item.barcode.as_str(), rng.pick(&wands)])?;
            n_scans += 1;
            if rng.next_f64() < 0.05 {
                writer.write_record([item.barcode.as_str(), rng.pick(&wands)])?;
                n_scans += 1;
            }
        }
    }
    for i in 0..10 {
        let stray = format!("3{:013}", 9_000_000 + i);
        writer.write_record([stray.as_str(), rng.pick(&wands)])?;
        n_scans += 1;
    }
    writer.flush().context("writing scanned file")?;
    Ok(n_scans)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let items = generate_items(&mut rng);
    write_export(&items)?;
    let n_scans = write_scanned(&items, &mut rng)?;

    println!("Wrote {} items to {EXPORT_PATH}", items.len());
    println!("Wrote {n_scans} scans to {SCANNED_PATH}");
    Ok(())
}
