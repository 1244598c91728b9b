use clap::{Args, Parser, Subcommand};
use lifeterm::config::{DisplayConfig, LifeConfig};
use lifeterm::coord::Coord;
use lifeterm::driver::Driver;
use lifeterm::grid::{Generation, Headless, SparseGrid};
use lifeterm::patterns::{self, PatternError, Seed, DEFAULT_DENSITY};
use lifeterm::settings::Settings;
use lifeterm::{app, logging, Error};
use log::info;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lifeterm")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Conway's Game of Life on an unbounded sparse grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive board in the terminal
    Play {
        #[command(flatten)]
        seed: SeedArgs,

        /// Starting rate in generations per second
        #[arg(short, long)]
        rate: Option<f64>,

        /// Multiplier applied by speed up / slow down
        #[arg(short, long)]
        acceleration: Option<f64>,

        /// Lowest accepted starting rate
        #[arg(long)]
        min_rate: Option<f64>,

        /// Speed up stops at this rate
        #[arg(long)]
        max_rate: Option<f64>,

        /// Character used to draw live cells
        #[arg(short, long)]
        char: Option<char>,

        /// Terminal columns per cell (1 or 2)
        #[arg(short = 'w', long)]
        cell_width: Option<u16>,
    },

    /// Run a number of generations without a display and print the result
    Run {
        #[command(flatten)]
        seed: SeedArgs,

        /// Generations to simulate
        #[arg(short, long, default_value = "10")]
        generations: u64,
    },

    /// List the built-in patterns
    Patterns,
}

#[derive(Args)]
struct SeedArgs {
    /// Starting pattern (see `patterns`), or "random"
    #[arg(short, long)]
    pattern: Option<String>,

    /// Random seed for a reproducible soup (implies --pattern random, rejected with any other pattern)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fraction of soup cells alive at start
    #[arg(short, long)]
    density: Option<f64>,
}

impl SeedArgs {
    fn resolve(&self) -> Result<Seed, PatternError> {
        let random = || Seed::Random {
            seed: self.seed.unwrap_or_else(rand::random),
            density: self.density.unwrap_or(DEFAULT_DENSITY),
        };
        match self.pattern.as_deref() {
            Some(name) if name.eq_ignore_ascii_case("random") => Ok(random()),
            Some(name) if self.seed.is_some() || self.density.is_some() => {
                Err(PatternError::SoupOnly(name.to_string()))
            }
            Some(name) => Ok(Seed::Pattern(patterns::find(name)?)),
            None if self.seed.is_some() || self.density.is_some() => Ok(random()),
            None => Ok(Seed::Empty),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(path) = logging::init() {
        info!("logging to {}", path.display());
    }

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lifeterm: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> Result<(), Error> {
    let settings = Settings::load();

    match command {
        Commands::Play {
            seed,
            rate,
            acceleration,
            min_rate,
            max_rate,
            char: draw_char,
            cell_width,
        } => {
            let defaults = settings.life_config();
            let config = LifeConfig {
                rate: rate.unwrap_or(defaults.rate),
                acceleration_factor: acceleration.unwrap_or(defaults.acceleration_factor),
                min_rate: min_rate.unwrap_or(defaults.min_rate),
                max_rate: max_rate.unwrap_or(defaults.max_rate),
            };
            config.validate()?;

            let display_defaults = settings.display_config()?;
            let display = DisplayConfig {
                draw_char: draw_char.unwrap_or(display_defaults.draw_char),
                cell_width: cell_width.unwrap_or(display_defaults.cell_width),
                ..display_defaults
            };
            display.validate()?;

            app::run(&config, display, &seed.resolve()?)?;
        }
        Commands::Run { seed, generations } => {
            let config = settings.life_config();
            let seed = seed.resolve()?;
            let mut grid = SparseGrid::new(Headless);
            seed.apply(&mut grid, Default::default())?;

            let mut driver = Driver::new(grid, &config);
            let mut last = Generation::default();
            for _ in 0..generations {
                if let Some(generation) = driver.step_once() {
                    last = generation;
                }
            }
            print_board(&driver, &last);
        }
        Commands::Patterns => {
            for pattern in patterns::PATTERNS {
                let (w, h) = pattern.size();
                println!("{:<12} {:>3} cells  {}x{}", pattern.name, pattern.cells.len(), w, h);
            }
            println!("{:<12} seeded soup, density {}", "random", DEFAULT_DENSITY);
        }
    }

    Ok(())
}

/// Print the live cells' bounding box, `#` alive and `.` dead
fn print_board(driver: &Driver<Headless>, last: &Generation) {
    let grid = driver.grid();
    println!("generation {} population {}", driver.generation(), grid.population());
    if driver.generation() > 0 && last.is_empty() {
        println!("stable");
    }
    let Some((lo, hi)) = grid.bounds() else {
        return;
    };
    println!("origin {}", lo);
    for y in lo.y..=hi.y {
        let row: String = (lo.x..=hi.x)
            .map(|x| if grid.is_alive(Coord::new(x, y)) { '#' } else { '.' })
            .collect();
        println!("{}", row);
    }
}
