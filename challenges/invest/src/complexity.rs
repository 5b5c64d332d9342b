use std::time::{Duration, Instant};

use log::info;

use crate::money::Cents;
use crate::portfolio::Portfolio;
use crate::solvers::Solver;
use crate::Result;

/// Time taken to solve the first `items` actions of a portfolio.
#[derive(Debug, Clone)]
pub struct Sample {
    pub items: usize,
    pub elapsed: Duration,
    pub total_benefit: Cents,
}

/// Solve every prefix `1..=n` of the portfolio, `n` capped at `max_items`.
pub fn measure(solver: &dyn Solver, portfolio: &Portfolio, max_items: Option<usize>) -> Result<Vec<Sample>> {
    let n = max_items.map_or(portfolio.len(), |max| max.min(portfolio.len()));

    let mut samples = Vec::with_capacity(n);
    for items in 1..=n {
        let prefix = portfolio.prefix(items);
        let start = Instant::now();
        let outcome = solver.solve(&prefix)?;
        let elapsed = start.elapsed();

        info!(
            "{}: {} actions in {:.3}s",
            solver.name(),
            items,
            elapsed.as_secs_f64()
        );
        samples.push(Sample {
            items,
            elapsed,
            total_benefit: outcome.total_benefit,
        });
    }
    Ok(samples)
}
