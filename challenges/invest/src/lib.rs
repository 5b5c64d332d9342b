use std::path::Path;

use log::info;

pub mod complexity;
pub mod dataset;
mod error;
pub mod money;
pub mod portfolio;
pub mod report;
pub mod solvers;

pub use error::{Error, Result};
pub use money::Cents;
pub use portfolio::{Item, Outcome, Portfolio};
pub use solvers::{Engine, Limits, Solver};

/// Everything one run needs. Built from the command line; there is no other
/// configuration source.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub budget: f64,
    pub engine: Engine,
    pub limits: Limits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budget: 500.0,
            engine: Engine::Compact,
            limits: Limits::default(),
        }
    }
}

/// Load a dataset, validate it against the budget and solve it.
pub fn optimize(path: &Path, settings: &Settings) -> Result<Outcome> {
    let items = dataset::load(path)?;
    let portfolio = Portfolio::new(settings.budget, items)?;
    let solver = settings.engine.build(settings.limits);

    info!(
        "solving {} actions under a budget of {} with the {} engine",
        portfolio.len(),
        portfolio.budget(),
        solver.name()
    );
    let outcome = solver.solve(&portfolio)?;
    info!(
        "selected {} actions for a benefit of {}",
        outcome.actions.len(),
        outcome.total_benefit
    );
    Ok(outcome)
}

/// Fixture utilities: `data/<category>/<n>.csv` is solved and its text
/// report compared with `data/<category>/<n>.out`.
pub mod testing {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    /// Discover all fixture numbers for a category
    pub fn discover_cases(data: &Path, category: &str) -> Vec<usize> {
        let case_dir = data.join(category);

        let mut case_numbers = Vec::new();
        if let Ok(entries) = fs::read_dir(&case_dir) {
            for entry in entries.flatten() {
                if let Some(file_name) = entry.file_name().to_str() {
                    if let Some(num_str) = file_name.strip_suffix(".csv") {
                        if let Ok(num) = num_str.parse::<usize>() {
                            case_numbers.push(num);
                        }
                    }
                }
            }
        }

        case_numbers.sort_unstable();
        case_numbers
    }

    /// Run a single fixture and return (expected, actual, duration)
    pub fn run_case(
        data: &Path,
        category: &str,
        case: usize,
        budget: f64,
        solver: &dyn Solver,
    ) -> std::result::Result<(String, String, Duration), String> {
        let case_dir: PathBuf = data.join(category);
        let in_file = case_dir.join(format!("{}.csv", case));
        let out_file = case_dir.join(format!("{}.out", case));

        let expected = fs::read_to_string(&out_file)
            .map_err(|e| format!("Failed to read {}: {}", out_file.display(), e))?;
        let items = dataset::load(&in_file)
            .map_err(|e| format!("Failed to load {}: {}", in_file.display(), e))?;
        let portfolio = Portfolio::new(budget, items).map_err(|e| e.to_string())?;

        let start = Instant::now();
        let outcome = solver.solve(&portfolio).map_err(|e| e.to_string())?;
        let duration = start.elapsed();

        let actual = report::render(&outcome, report::Format::Text).map_err(|e| e.to_string())?;

        Ok((
            expected.trim().to_string(),
            actual.trim().to_string(),
            duration,
        ))
    }

    /// Verify all fixtures of a category, panicking on the first mismatch
    pub fn verify_all_cases(data: &Path, category: &str, budget: f64, solver: &dyn Solver) {
        let cases = discover_cases(data, category);
        assert!(!cases.is_empty(), "No fixtures found for {}", category);

        for case in cases {
            match run_case(data, category, case, budget, solver) {
                Ok((expected, actual, duration)) => {
                    assert_eq!(
                        actual,
                        expected,
                        "Fixture {} failed with {} (took {:.2}s)\nExpected:\n{}\nActual:\n{}",
                        case,
                        solver.name(),
                        duration.as_secs_f64(),
                        expected,
                        actual
                    );
                }
                Err(e) => panic!("Fixture {} error: {}", case, e),
            }
        }
    }

    /// Run all fixtures of a category and print the results (for CLI usage).
    /// Returns the number of failed fixtures.
    pub fn run_all_cases(data: &Path, category: &str, budget: f64, solver: &dyn Solver) -> usize {
        let cases = discover_cases(data, category);
        if cases.is_empty() {
            println!("No fixtures found in {}", data.join(category).display());
            return 0;
        }

        println!(
            "Running {} fixtures for {} with the {} engine...",
            cases.len(),
            category,
            solver.name()
        );

        let mut passed = 0;
        let mut failed = 0;
        let mut total_duration = Duration::ZERO;

        for case in &cases {
            match run_case(data, category, *case, budget, solver) {
                Ok((expected, actual, duration)) => {
                    total_duration += duration;
                    let secs = duration.as_secs_f64();
                    if actual == expected {
                        println!("✓ Fixture {}: PASSED ({:.2}s)", case, secs);
                        passed += 1;
                    } else {
                        println!("✗ Fixture {}: FAILED ({:.2}s)", case, secs);
                        println!("  Expected: {}", expected);
                        println!("  Actual:   {}", actual);
                        failed += 1;
                    }
                }
                Err(e) => {
                    println!("✗ Fixture {}: ERROR - {}", case, e);
                    failed += 1;
                }
            }
        }

        println!("\nResults: {} passed, {} failed", passed, failed);
        println!("Total time: {:.2}s", total_duration.as_secs_f64());
        failed
    }
}
