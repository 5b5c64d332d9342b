// Row-compressed variant of the table engine. Same recurrence, same choices,
// but it keeps one row of benefits and a single bit per cell for the walk back.
use log::debug;

use crate::money::Cents;
use crate::portfolio::{Outcome, Portfolio};
use crate::solvers::{Solver, table_cells};
use crate::Result;

/// Default bound on `(n + 1) * (W + 1)`. At one bit a cell this is 256MiB.
pub const DEFAULT_MAX_CELLS: u64 = 1 << 31;

#[derive(Debug, Clone)]
pub struct Compact {
    max_cells: u64,
}

impl Default for Compact {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl Compact {
    pub fn with_max_cells(max_cells: u64) -> Self {
        Self { max_cells }
    }
}

/// One bit per (action, budget) cell: was the action taken in that cell.
struct TakenGrid {
    width: usize,
    words: Vec<u64>,
}

impl TakenGrid {
    fn new(rows: usize, width: usize) -> Self {
        Self {
            width,
            words: vec![0; (rows * width).div_ceil(64)],
        }
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize) {
        let bit = row * self.width + col;
        self.words[bit / 64] |= 1 << (bit % 64);
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> bool {
        let bit = row * self.width + col;
        self.words[bit / 64] & (1 << (bit % 64)) != 0
    }
}

impl Solver for Compact {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn solve(&self, portfolio: &Portfolio) -> Result<Outcome> {
        let n = portfolio.len();
        let capacity = table_cells(portfolio, self.max_cells)?;
        debug!("filling a rolling row of {} cells over {} actions", capacity + 1, n);

        let mut tally = vec![0i64; capacity + 1];
        let mut taken = TakenGrid::new(n, capacity + 1);

        for i in 0..n {
            let cost = portfolio.cost(i).0 as usize;
            let benefit = portfolio.benefit(i).0;
            // Going back to front means tally[w - cost] still holds the value
            // from the previous row, so each action is counted at most once.
            // Unaffordable actions produce an empty range.
            for w in (cost..=capacity).rev() {
                let candidate = tally[w - cost] + benefit;
                // A tie only marks free actions (no cost, no benefit) as
                // taken, the same choice the table engine makes on its walk
                // back.
                if candidate > tally[w] || (cost == 0 && candidate == tally[w]) {
                    tally[w] = candidate;
                    taken.set(i, w);
                }
            }
        }

        let mut w = capacity;
        let mut chosen = Vec::new();
        for i in (0..n).rev() {
            if taken.get(i, w) {
                chosen.push(i);
                w -= portfolio.cost(i).0 as usize;
            }
        }
        chosen.reverse();

        let outcome = portfolio.outcome(&chosen);
        debug_assert_eq!(Cents(tally[capacity]), outcome.total_benefit);
        Ok(outcome)
    }
}
