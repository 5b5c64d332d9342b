use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use invest::report::{self, Format};
use invest::solvers::exhaustive;
use invest::solvers::Exhaustive;
use invest::{complexity, dataset, Engine, Limits, Portfolio, Settings};

#[derive(Parser)]
#[command(name = "invest")]
#[command(about = "Pick the most profitable actions within a budget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the best combination of actions
    Solve {
        /// CSV file with the actions
        file: PathBuf,
        #[arg(short, long, default_value_t = 500.0)]
        budget: f64,
        #[arg(short, long, value_enum, default_value_t = Engine::Compact)]
        engine: Engine,
        /// Largest dynamic programming table to allocate, in cells
        #[arg(long)]
        max_cells: Option<u64>,
        /// Largest number of actions the exhaustive search accepts
        #[arg(long)]
        max_items: Option<usize>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List every affordable combination as CSV
    Audit {
        file: PathBuf,
        #[arg(short, long, default_value_t = 500.0)]
        budget: f64,
        #[arg(long)]
        max_items: Option<usize>,
    },
    /// Time an engine over growing prefixes of the dataset
    Complexity {
        file: PathBuf,
        #[arg(short, long, default_value_t = 500.0)]
        budget: f64,
        #[arg(short, long, value_enum, default_value_t = Engine::Exhaustive)]
        engine: Engine,
        /// Stop after this many actions
        #[arg(long)]
        max_items: Option<usize>,
    },
    /// Run the fixtures of a category
    Verify {
        /// Fixture category, e.g. `actions` or `shares`
        category: String,
        #[arg(long, default_value = "data")]
        data: PathBuf,
        #[arg(short, long, default_value_t = 500.0)]
        budget: f64,
        #[arg(short, long, value_enum, default_value_t = Engine::Compact)]
        engine: Engine,
    },
}

fn run(command: Commands) -> invest::Result<ExitCode> {
    match command {
        Commands::Solve {
            file,
            budget,
            engine,
            max_cells,
            max_items,
            format,
        } => {
            let settings = Settings {
                budget,
                engine,
                limits: Limits {
                    max_cells,
                    max_items,
                },
            };
            let outcome = invest::optimize(&file, &settings)?;
            print!("{}", report::render(&outcome, format)?);
        }
        Commands::Audit {
            file,
            budget,
            max_items,
        } => {
            let portfolio = Portfolio::new(budget, dataset::load(&file)?)?;
            let solver = max_items
                .map(Exhaustive::with_max_items)
                .unwrap_or_default();
            let combinations = exhaustive::audit(&solver, &portfolio)?;
            print!("{}", report::audit(&combinations)?);
        }
        Commands::Complexity {
            file,
            budget,
            engine,
            max_items,
        } => {
            let portfolio = Portfolio::new(budget, dataset::load(&file)?)?;
            let solver = engine.build(Limits::default());
            let samples = complexity::measure(solver.as_ref(), &portfolio, max_items)?;
            print!("{}", report::complexity(&samples)?);
        }
        Commands::Verify {
            category,
            data,
            budget,
            engine,
        } => {
            let solver = engine.build(Limits::default());
            let failed = invest::testing::run_all_cases(&data, &category, budget, solver.as_ref());
            if failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // install global collector configured based on RUST_LOG env var. Reports
    // go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
