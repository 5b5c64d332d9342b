use serde::Serialize;

use crate::money::Cents;
use crate::{Error, Result};

/// A candidate investment. `return_rate` is fractional: 0.05 for 5%.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub name: String,
    pub cost: f64,
    pub return_rate: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, cost: f64, return_rate: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            return_rate,
        }
    }

    /// Absolute monetary gain, before quantization.
    pub fn benefit(&self) -> f64 {
        self.cost * self.return_rate
    }
}

/// A validated item sequence and budget, quantized to minor units.
///
/// Building a `Portfolio` is the only place where decimal money is converted
/// to [`Cents`]; every engine reads the quantized costs and benefits from here
/// so that all of them agree to the cent. Costs round up and the budget
/// rounds down, so a quantized selection never costs more than the budget in
/// decimal terms. The sums of all costs and of all absolute benefits fit in
/// `i64`, so no partial sum an engine forms can overflow.
#[derive(Debug, Clone)]
pub struct Portfolio {
    budget: Cents,
    items: Vec<Item>,
    costs: Vec<Cents>,
    benefits: Vec<Cents>,
}

impl Portfolio {
    pub fn new(budget: f64, items: Vec<Item>) -> Result<Self> {
        if budget.is_nan() || budget < 0.0 {
            return Err(Error::NegativeBudget(budget));
        }
        let budget = Cents::from_decimal_down(budget)?;

        let mut cost_total = 0i64;
        let mut benefit_total = 0i64;
        let mut costs = Vec::with_capacity(items.len());
        let mut benefits = Vec::with_capacity(items.len());
        for item in &items {
            if item.cost.is_nan() || item.cost < 0.0 {
                return Err(Error::NegativeCost {
                    name: item.name.clone(),
                    cost: item.cost,
                });
            }
            if !item.return_rate.is_finite() {
                return Err(Error::MalformedRate {
                    name: item.name.clone(),
                    rate: item.return_rate,
                });
            }
            let cost = Cents::from_decimal_up(item.cost)?;
            let benefit = Cents::from_decimal(item.benefit())?;
            cost_total = cost_total
                .checked_add(cost.0)
                .ok_or(Error::TotalOutOfRange("cost"))?;
            benefit_total = benefit_total
                .checked_add(benefit.0.abs())
                .ok_or(Error::TotalOutOfRange("benefit"))?;
            costs.push(cost);
            benefits.push(benefit);
        }

        Ok(Self {
            budget,
            items,
            costs,
            benefits,
        })
    }

    pub fn budget(&self) -> Cents {
        self.budget
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cost(&self, index: usize) -> Cents {
        self.costs[index]
    }

    pub fn benefit(&self, index: usize) -> Cents {
        self.benefits[index]
    }

    /// The first `len` items under the same budget.
    pub fn prefix(&self, len: usize) -> Portfolio {
        let len = len.min(self.items.len());
        Portfolio {
            budget: self.budget,
            items: self.items[..len].to_vec(),
            costs: self.costs[..len].to_vec(),
            benefits: self.benefits[..len].to_vec(),
        }
    }

    /// Build the result for a set of chosen positions, given in ascending order.
    pub fn outcome(&self, chosen: &[usize]) -> Outcome {
        Outcome {
            total_benefit: chosen.iter().map(|&i| self.benefits[i]).sum(),
            total_cost: chosen.iter().map(|&i| self.costs[i]).sum(),
            actions: chosen.iter().map(|&i| self.items[i].clone()).collect(),
        }
    }
}

/// The winning subset. `actions` keeps the original input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub total_benefit: Cents,
    pub total_cost: Cents,
    pub actions: Vec<Item>,
}

impl Outcome {
    pub fn empty() -> Self {
        Self {
            total_benefit: Cents::ZERO,
            total_cost: Cents::ZERO,
            actions: Vec::new(),
        }
    }
}
