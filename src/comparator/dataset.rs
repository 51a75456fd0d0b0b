use super::{try_parse_price, PriceRecord};
use crate::Result;
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str;

/// Default price file, resolved against the working directory.
pub const DEFAULT_PRICE_FILE: &str = "prezzi.csv";

const SAMPLE_CSV: &str = "\
nome;prezzoMin;prezzoMax
Acqua 1,5L;0,20€;1,50€
Latte 1L;0,90€;2,20€
Benzina 1L;1,586€;2,158€
Pane 1kg;1,80€;4,50€
Caffè 250g;2,49€;5,90€
Pasta 500g;0,69€;2,10€
Olio EVO 1L;6,90€;12,50€
Smartphone;149€;1.329€
Televisore 55 pollici;399€;1.899€
Biglietto cinema;6,50€;12€
";

/// Reads price records from a semicolon-delimited file.
///
/// The header row is skipped. Rows that are too short, are not valid UTF-8,
/// have an empty name or an unparsable price are dropped; a repeated name keeps
/// its first row.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<PriceRecord>> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let records = parse_records(file)?;
    info!("Loaded {} price records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses price records from any reader; see [`load_records`].
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<PriceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (line, row) in reader.byte_records().enumerate() {
        let row = row?;
        let (Some(name), Some(min), Some(max)) = (row.get(0), row.get(1), row.get(2)) else {
            debug!("Skipping short row {}", line + 2);
            continue;
        };
        let (Ok(name), Ok(min), Ok(max)) = (
            str::from_utf8(name),
            str::from_utf8(min),
            str::from_utf8(max),
        ) else {
            debug!("Skipping row {}: not valid UTF-8", line + 2);
            continue;
        };
        if name.is_empty() {
            debug!("Skipping row {} without a name", line + 2);
            continue;
        }
        let (Some(min), Some(max)) = (try_parse_price(min), try_parse_price(max)) else {
            debug!("Skipping row {} ({name}): unparsable price", line + 2);
            continue;
        };
        if !seen.insert(name.to_string()) {
            debug!("Skipping duplicate row {} ({name})", line + 2);
            continue;
        }
        records.push(PriceRecord::new(name, min, max));
    }

    Ok(records)
}

/// Writes the bundled 10-row sample file.
pub fn write_sample(path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, SAMPLE_CSV)?;
    Ok(())
}

/// Loads `path`, generating the sample file first when it does not exist.
pub fn load_or_bootstrap(path: impl AsRef<Path>) -> Result<Vec<PriceRecord>> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("{} not found, writing sample data", path.display());
            write_sample(path)?;
        }
        Err(e) => return Err(e.into()),
    }
    load_records(path)
}
