// Turns the CSV exports into the canonical item sequence. Two header
// conventions exist in the wild; the header line decides which one applies.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::portfolio::Item;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `Actions #,Coût par action (en euros),Bénéfice (après 2 ans)` with
    /// profits such as `5%`. Every row is kept.
    Actions,
    /// `name,price,profit` with profits in percent. Rows with a price of zero
    /// or less are dropped.
    Shares,
}

impl Schema {
    /// Pick the schema from the header line. Headers that are not the
    /// `Actions` ones are read positionally as `Shares`.
    pub fn detect(header: &str) -> Result<Schema> {
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns.len() < 3 {
            return Err(Error::UnknownSchema(header.to_string()));
        }

        if columns
            .iter()
            .any(|c| c.starts_with("Coût par action") || c.starts_with("Bénéfice"))
        {
            return Ok(Schema::Actions);
        }

        let expected = ["name", "price", "profit"];
        let named = columns
            .iter()
            .zip(expected)
            .all(|(c, e)| c.eq_ignore_ascii_case(e));
        if !named {
            debug!("reading columns {:?} as name, price, profit", &columns[..3]);
        }
        Ok(Schema::Shares)
    }

    /// Parse one data row. `Ok(None)` means the row is skipped.
    fn parse_row(self, line: usize, row: &str) -> Result<Option<Item>> {
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        let [name, cost, profit, ..] = fields[..] else {
            return Err(Error::Parse {
                line,
                reason: format!("expected 3 columns, found {}", fields.len()),
            });
        };

        let cost: f64 = cost.parse().map_err(|_| Error::Parse {
            line,
            reason: format!("invalid cost {:?}", cost),
        })?;
        let percent: f64 = profit
            .trim_end_matches('%')
            .trim()
            .parse()
            .map_err(|_| Error::Parse {
                line,
                reason: format!("invalid profit {:?}", profit),
            })?;

        if self == Schema::Shares && cost <= 0.0 {
            warn!("line {}: skipping {} with price {}", line, name, cost);
            return Ok(None);
        }

        Ok(Some(Item::new(name, cost, percent / 100.0)))
    }
}

/// Read every item from a CSV source. An empty source has no items.
pub fn read(reader: impl BufRead) -> Result<Vec<Item>> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(header) => header?,
        None => return Ok(Vec::new()),
    };
    let schema = Schema::detect(header.trim_start_matches('\u{feff}'))?;

    let mut items = Vec::new();
    // the header is line 1
    for (line, row) in (2..).zip(lines) {
        let row = row?;
        if row.trim().is_empty() {
            continue;
        }
        if let Some(item) = schema.parse_row(line, &row)? {
            items.push(item);
        }
    }

    info!("read {} actions using the {:?} schema", items.len(), schema);
    Ok(items)
}

pub fn load(path: &Path) -> Result<Vec<Item>> {
    let file = File::open(path)?;
    read(BufReader::new(file))
}
