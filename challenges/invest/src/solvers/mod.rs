// Optimization engines. All of them consume the same validated portfolio and
// return the same outcome, including the choice among equally good subsets.

pub mod compact;
pub mod exhaustive;
pub mod table;

pub use compact::Compact;
pub use exhaustive::{Exhaustive, SearchStats};
pub use table::Table;

use crate::portfolio::{Outcome, Portfolio};
use crate::{Error, Result};

/// An optimization engine. `solve` is a pure function of the portfolio:
/// implementations only hold configuration and allocate their working state
/// on every call.
pub trait Solver {
    fn name(&self) -> &'static str;
    fn solve(&self, portfolio: &Portfolio) -> Result<Outcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    /// Enumerate every subset (exponential).
    Exhaustive,
    /// Two dimensional dynamic programming table.
    Table,
    /// Dynamic programming over a single rolling row.
    Compact,
}

/// Safety bounds handed to the engines. `None` keeps each engine's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Limits {
    pub max_cells: Option<u64>,
    pub max_items: Option<usize>,
}

impl Engine {
    pub fn build(self, limits: Limits) -> Box<dyn Solver> {
        match self {
            Engine::Exhaustive => Box::new(
                limits
                    .max_items
                    .map(Exhaustive::with_max_items)
                    .unwrap_or_default(),
            ),
            Engine::Table => Box::new(
                limits
                    .max_cells
                    .map(Table::with_max_cells)
                    .unwrap_or_default(),
            ),
            Engine::Compact => Box::new(
                limits
                    .max_cells
                    .map(Compact::with_max_cells)
                    .unwrap_or_default(),
            ),
        }
    }
}

/// Check the `(n + 1) * (W + 1)` table size against `max_cells` and return
/// the budget in cents as the last column index.
pub(crate) fn table_cells(portfolio: &Portfolio, max_cells: u64) -> Result<usize> {
    let capacity = portfolio.budget().0 as u64;
    let cells = (portfolio.len() as u64 + 1)
        .checked_mul(capacity + 1)
        .unwrap_or(u64::MAX);
    if cells > max_cells {
        return Err(Error::TableTooLarge {
            cells,
            limit: max_cells,
        });
    }
    Ok(capacity as usize)
}
