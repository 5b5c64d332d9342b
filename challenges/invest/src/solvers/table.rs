// Classic 0/1 knapsack over (item prefix, budget in cents).
use log::debug;

use crate::money::Cents;
use crate::portfolio::{Outcome, Portfolio};
use crate::solvers::{Solver, table_cells};
use crate::Result;

/// Default bound on `(n + 1) * (W + 1)`. At 8 bytes a cell this is 256MiB.
pub const DEFAULT_MAX_CELLS: u64 = 1 << 25;

/// Full two dimensional table. Time and memory are `O(n * W)` where `W` is
/// the budget in cents, so large budgets get expensive quickly; see
/// [`Compact`](crate::solvers::Compact) for the row-compressed variant.
#[derive(Debug, Clone)]
pub struct Table {
    max_cells: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl Table {
    pub fn with_max_cells(max_cells: u64) -> Self {
        Self { max_cells }
    }
}

impl Solver for Table {
    fn name(&self) -> &'static str {
        "table"
    }

    fn solve(&self, portfolio: &Portfolio) -> Result<Outcome> {
        let n = portfolio.len();
        let capacity = table_cells(portfolio, self.max_cells)?;
        debug!("filling a {}x{} table", n + 1, capacity + 1);

        // tally[i][w] is the best benefit reachable with the first i actions
        // and at most w cents. Row 0 (no actions) is all zeros.
        let mut tally = vec![vec![0i64; capacity + 1]; n + 1];

        for i in 1..=n {
            let cost = portfolio.cost(i - 1).0 as usize;
            let benefit = portfolio.benefit(i - 1).0;
            for w in 0..=capacity {
                tally[i][w] = tally[i - 1][w];
                if cost <= w {
                    let candidate = tally[i - 1][w - cost] + benefit;
                    if candidate > tally[i][w] {
                        tally[i][w] = candidate;
                    }
                }
            }
        }

        // Walk back from the full table. An action is taken only when taking
        // it is strictly better than skipping it, except for free actions
        // (no cost, no benefit), which are always taken. The exhaustive search
        // breaks ties the same way.
        let mut w = capacity;
        let mut chosen = Vec::new();
        for i in (1..=n).rev() {
            let cost = portfolio.cost(i - 1).0 as usize;
            let benefit = portfolio.benefit(i - 1).0;
            if cost > w {
                continue;
            }
            let skipped = tally[i - 1][w];
            let taken = tally[i - 1][w - cost] + benefit;
            if taken > skipped || (cost == 0 && taken == skipped) {
                chosen.push(i - 1);
                w -= cost;
            }
        }
        chosen.reverse();

        let outcome = portfolio.outcome(&chosen);
        debug_assert_eq!(Cents(tally[n][capacity]), outcome.total_benefit);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::portfolio::Item;

    fn names(outcome: &Outcome) -> Vec<&str> {
        outcome.actions.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_example() {
        let portfolio = Portfolio::new(
            300.0,
            vec![
                Item::new("A", 100.0, 0.10),
                Item::new("B", 200.0, 0.20),
                Item::new("C", 300.0, 0.15),
            ],
        )
        .unwrap();

        let outcome = Table::default().solve(&portfolio).unwrap();
        assert_eq!(vec!["A", "B"], names(&outcome));
        assert_eq!("50.00", outcome.total_benefit.to_string());
    }

    #[test]
    fn test_beats_greedy_by_rate() {
        // Greedy by rate buys X first and then nothing else fits: 3.00.
        // Y and Z together use the whole budget for 4.00.
        let portfolio = Portfolio::new(
            10.0,
            vec![
                Item::new("X", 6.0, 0.50),
                Item::new("Y", 5.0, 0.40),
                Item::new("Z", 5.0, 0.40),
            ],
        )
        .unwrap();

        let outcome = Table::default().solve(&portfolio).unwrap();
        assert_eq!(vec!["Y", "Z"], names(&outcome));
        assert_eq!(Cents(400), outcome.total_benefit);
        assert_eq!(portfolio.budget(), outcome.total_cost);
    }

    #[test]
    fn test_budget_covering_everything_selects_everything() {
        let portfolio = Portfolio::new(
            600.0,
            vec![
                Item::new("A", 100.0, 0.10),
                Item::new("B", 200.0, 0.20),
                Item::new("C", 300.0, 0.15),
            ],
        )
        .unwrap();

        let outcome = Table::default().solve(&portfolio).unwrap();
        assert_eq!(vec!["A", "B", "C"], names(&outcome));
        assert_eq!(Cents(9500), outcome.total_benefit);
    }

    #[test]
    fn test_zero_cost_action_is_selected() {
        let portfolio = Portfolio::new(0.0, vec![Item::new("Free", 0.0, 0.10)]).unwrap();
        let outcome = Table::default().solve(&portfolio).unwrap();
        assert_eq!(vec!["Free"], names(&outcome));
        assert_eq!(Cents::ZERO, outcome.total_benefit);
    }

    #[test]
    fn test_losing_actions_are_skipped() {
        let portfolio = Portfolio::new(
            100.0,
            vec![Item::new("Loss", 10.0, -0.5), Item::new("Gain", 20.0, 0.1)],
        )
        .unwrap();
        let outcome = Table::default().solve(&portfolio).unwrap();
        assert_eq!(vec!["Gain"], names(&outcome));
    }

    #[test]
    fn test_empty_input() {
        let portfolio = Portfolio::new(500.0, vec![]).unwrap();
        assert_eq!(Outcome::empty(), Table::default().solve(&portfolio).unwrap());
    }

    #[test]
    fn test_rejects_oversized_table() {
        let portfolio = Portfolio::new(1000.0, vec![Item::new("A", 1.0, 0.1)]).unwrap();
        // 2 rows of 100_001 cells
        let err = Table::with_max_cells(200_001).solve(&portfolio).unwrap_err();
        assert!(matches!(
            err,
            Error::TableTooLarge {
                cells: 200_002,
                limit: 200_001
            }
        ));
        assert!(Table::with_max_cells(200_002).solve(&portfolio).is_ok());
    }
}
