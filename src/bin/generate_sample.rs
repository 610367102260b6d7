use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const N_WINES: usize = 60;

/// Region, wine type and the grapes typically blended there.
const STYLES: &[(&str, &str, &[&str])] = &[
    ("Bordeaux", "Rosso", &["Cabernet Sauvignon", "Merlot", "Cabernet Franc", "Petit Verdot"]),
    ("Bordeaux", "Bianco", &["Sauvignon Blanc", "Sémillon", "Muscadelle"]),
    ("Champagne", "Spumante", &["Chardonnay", "Pinot Noir", "Pinot Meunier"]),
    ("Bourgogne", "Rosso", &["Pinot Noir"]),
    ("Bourgogne", "Bianco", &["Chardonnay", "Aligoté"]),
    ("Alsace", "Bianco", &["Riesling", "Gewürztraminer", "Pinot Gris", "Sylvaner"]),
    ("Loire", "Bianco", &["Chenin Blanc", "Sauvignon Blanc", "Melon de Bourgogne"]),
    ("Loire", "Rosato", &["Cabernet Franc", "Grolleau", "Gamay"]),
    ("Provence", "Rosato", &["Grenache", "Cinsault", "Mourvèdre", "Syrah"]),
    ("Rhône", "Rosso", &["Grenache", "Syrah", "Mourvèdre", "Cinsault"]),
    ("Languedoc-Roussillon", "Rosso", &["Carignan", "Grenache", "Syrah"]),
    ("Languedoc-Roussillon", "Dolce", &["Muscat", "Grenache"]),
    ("Jura", "Bianco", &["Savagnin", "Chardonnay"]),
];

const ESTATES: &[&str] = &[
    "Château", "Domaine", "Clos", "Mas", "Maison", "Cave",
];

const PLACES: &[&str] = &[
    "des Chênes", "Saint-Martin", "de la Colline", "du Vieux Moulin", "Belair",
    "des Sources", "Beauregard", "la Croix", "des Pierres", "Montfort",
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

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

struct WineRow {
    name: String,
    wine_type: String,
    varieties: String,
    region: String,
}

fn generate_wines(rng: &mut SimpleRng) -> Vec<WineRow> {
    (0..N_WINES)
        .map(|i| {
            let &(region, wine_type, grapes) = rng.pick(STYLES);
            let name = format!("{} {} {}", rng.pick(ESTATES), rng.pick(PLACES), i + 1);

            // A non-empty prefix of the region's grapes, in blend order.
            let n_grapes = 1 + rng.below(grapes.len());
            let varieties = grapes[..n_grapes].join(", ");

            WineRow {
                name,
                wine_type: wine_type.to_string(),
                varieties,
                region: region.to_string(),
            }
        })
        .collect()
}

fn string_column(rows: &[WineRow], f: fn(&WineRow) -> &str) -> ArrayRef {
    Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn write_parquet(rows: &[WineRow], path: &str) -> anyhow::Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Vino", DataType::Utf8, false),
        Field::new("Tipo", DataType::Utf8, false),
        Field::new("Vitigni", DataType::Utf8, false),
        Field::new("Regione", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            string_column(rows, |r| &r.name),
            string_column(rows, |r| &r.wine_type),
            string_column(rows, |r| &r.varieties),
            string_column(rows, |r| &r.region),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn write_csv(rows: &[WineRow], path: &str) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Vino", "Tipo", "Vitigni", "Regione"])?;
    for r in rows {
        writer.write_record([&r.name, &r.wine_type, &r.varieties, &r.region])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_wines(&mut rng);

    let parquet_path = "sample_wines.parquet";
    let csv_path = "sample_wines.csv";
    write_parquet(&rows, parquet_path)?;
    write_csv(&rows, csv_path)?;

    println!(
        "Wrote {} wines to {parquet_path} and {csv_path}",
        rows.len()
    );
    Ok(())
}
