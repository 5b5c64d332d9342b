// Exhaustive include/exclude enumeration. Serves as the correctness oracle for
// the table engines and as the exponential complexity baseline.
use std::cmp::Ordering;

use log::debug;

use crate::money::Cents;
use crate::portfolio::{Outcome, Portfolio};
use crate::solvers::Solver;
use crate::{Error, Result};

/// Beyond roughly 20-25 actions the 2^n walk stops being practical.
pub const DEFAULT_MAX_ITEMS: usize = 30;

/// A node of the search tree. `chosen` has one flag per action; positions at
/// or past `depth` are always `false`.
pub struct Node<'a> {
    pub chosen: &'a [bool],
    pub depth: usize,
    pub cost: Cents,
    pub benefit: Cents,
}

impl Node<'_> {
    pub fn is_leaf(&self) -> bool {
        self.depth == self.chosen.len()
    }
}

/// Receives every node of the walk, feasible or not.
pub trait SubsetVisitor {
    fn visit(&mut self, node: &Node<'_>, budget: Cents);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub explored: u64,
}

#[derive(Debug, Clone)]
pub struct Exhaustive {
    max_items: usize,
}

impl Default for Exhaustive {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl Exhaustive {
    pub fn with_max_items(max_items: usize) -> Self {
        Self { max_items }
    }

    /// Solve and report how many nodes were explored.
    pub fn search(&self, portfolio: &Portfolio) -> Result<(Outcome, SearchStats)> {
        let mut best = BestSubset::new(portfolio);
        let stats = self.walk(portfolio, &mut best)?;
        let chosen: Vec<usize> = best
            .chosen
            .iter()
            .enumerate()
            .filter_map(|(i, &taken)| taken.then_some(i))
            .collect();
        debug!(
            "exhaustive search explored {} nodes over {} actions",
            stats.explored,
            portfolio.len()
        );
        Ok((portfolio.outcome(&chosen), stats))
    }

    /// Walk all 2^(n+1)-1 nodes, handing each one to `visitor`.
    pub fn walk(&self, portfolio: &Portfolio, visitor: &mut dyn SubsetVisitor) -> Result<SearchStats> {
        if portfolio.len() > self.max_items {
            return Err(Error::SearchTooLarge {
                items: portfolio.len(),
                limit: self.max_items,
            });
        }
        // fresh state for every call
        let mut walker = Walker {
            portfolio,
            visitor,
            chosen: vec![false; portfolio.len()],
            explored: 0,
        };
        walker.descend(0, Cents::ZERO, Cents::ZERO);
        Ok(SearchStats {
            explored: walker.explored,
        })
    }
}

impl Solver for Exhaustive {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, portfolio: &Portfolio) -> Result<Outcome> {
        self.search(portfolio).map(|(outcome, _)| outcome)
    }
}

struct Walker<'a, 'v> {
    portfolio: &'a Portfolio,
    visitor: &'v mut dyn SubsetVisitor,
    chosen: Vec<bool>,
    explored: u64,
}

impl Walker<'_, '_> {
    fn descend(&mut self, depth: usize, cost: Cents, benefit: Cents) {
        self.explored += 1;
        let node = Node {
            chosen: &self.chosen,
            depth,
            cost,
            benefit,
        };
        self.visitor.visit(&node, self.portfolio.budget());

        if depth == self.chosen.len() {
            return;
        }

        self.chosen[depth] = true;
        self.descend(
            depth + 1,
            cost + self.portfolio.cost(depth),
            benefit + self.portfolio.benefit(depth),
        );
        self.chosen[depth] = false;
        self.descend(depth + 1, cost, benefit);
    }
}

/// Tracks the preferred feasible subset seen so far.
struct BestSubset {
    chosen: Vec<bool>,
    benefit: Option<Cents>,
    free: Vec<bool>,
}

impl BestSubset {
    fn new(portfolio: &Portfolio) -> Self {
        let free = (0..portfolio.len())
            .map(|i| portfolio.cost(i) == Cents::ZERO && portfolio.benefit(i) == Cents::ZERO)
            .collect();
        Self {
            chosen: vec![false; portfolio.len()],
            benefit: None,
            free,
        }
    }
}

impl SubsetVisitor for BestSubset {
    fn visit(&mut self, node: &Node<'_>, budget: Cents) {
        if node.cost > budget {
            return;
        }
        let better = match self.benefit {
            None => true,
            Some(best) => prefer(node.benefit, node.chosen, best, &self.chosen, &self.free),
        };
        if better {
            self.benefit = Some(node.benefit);
            self.chosen.copy_from_slice(node.chosen);
        }
    }
}

/// Tie-break shared by every engine: higher benefit wins. On equal benefit
/// the subsets are compared from the last action backwards, at the first
/// action where they differ. A free action (no cost, no benefit) is preferred
/// included, any other action is preferred left out.
fn prefer(benefit: Cents, chosen: &[bool], best: Cents, best_chosen: &[bool], free: &[bool]) -> bool {
    match benefit.cmp(&best) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => chosen
            .iter()
            .zip(best_chosen)
            .zip(free)
            .rev()
            .find(|((a, b), _)| a != b)
            .is_some_and(|((&taken, _), &is_free)| taken == is_free),
    }
}

/// A feasible subset recorded by [`Audit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub actions: Vec<String>,
    pub total_cost: Cents,
    pub total_benefit: Cents,
}

/// Collects every affordable leaf of the walk, i.e. every affordable subset
/// exactly once, with the same running sums the search compares.
pub struct Audit<'a> {
    portfolio: &'a Portfolio,
    pub combinations: Vec<Combination>,
}

impl<'a> Audit<'a> {
    pub fn new(portfolio: &'a Portfolio) -> Self {
        Self {
            portfolio,
            combinations: Vec::new(),
        }
    }
}

impl SubsetVisitor for Audit<'_> {
    fn visit(&mut self, node: &Node<'_>, budget: Cents) {
        if !node.is_leaf() || node.cost > budget {
            return;
        }
        let actions = node
            .chosen
            .iter()
            .zip(self.portfolio.items())
            .filter(|(taken, _)| **taken)
            .map(|(_, item)| item.name.clone())
            .collect();
        self.combinations.push(Combination {
            actions,
            total_cost: node.cost,
            total_benefit: node.benefit,
        });
    }
}

/// Every affordable subset of `portfolio`, in include-before-exclude order.
pub fn audit(solver: &Exhaustive, portfolio: &Portfolio) -> Result<Vec<Combination>> {
    let mut audit = Audit::new(portfolio);
    solver.walk(portfolio, &mut audit)?;
    Ok(audit.combinations)
}
