//! Climate Candles CLI
//!
//! Terminal front end for the candle library: one-shot subcommands for
//! stats, charts and predictions, plus a menu-driven interactive session
//! over a single dataset.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use climate_candles::data::loader;
use climate_candles::{
    build_yearly_series, predict_next, render_chart, render_table, Country, Dataset, YearlyCandle,
    DEFAULT_HORIZON,
};
use colored::Colorize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "climate-candles")]
#[command(about = "Yearly temperature candlesticks and trend forecasts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the yearly candle table for a country
    Stats {
        /// Path to the wide-format temperature CSV
        #[arg(short, long)]
        file: PathBuf,

        /// Country code (e.g. AT)
        #[arg(short, long)]
        country: String,

        /// First year of the range
        #[arg(short, long)]
        start: i32,

        /// Last year of the range
        #[arg(short, long)]
        end: i32,

        /// Write the series to a .csv or .json file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plot a candlestick chart for a country
    Chart {
        /// Path to the wide-format temperature CSV
        #[arg(short, long)]
        file: PathBuf,

        /// Country code (e.g. AT)
        #[arg(short, long)]
        country: String,

        /// First year of the range
        #[arg(short, long)]
        start: i32,

        /// Last year of the range
        #[arg(short, long)]
        end: i32,
    },

    /// Project future candles from a reference range
    Predict {
        /// Path to the wide-format temperature CSV
        #[arg(short, long)]
        file: PathBuf,

        /// Country code (e.g. AT)
        #[arg(short, long)]
        country: String,

        /// First reference year
        #[arg(short, long)]
        start: i32,

        /// Last reference year
        #[arg(short, long)]
        end: i32,

        /// Number of future years to project
        #[arg(long, default_value_t = DEFAULT_HORIZON)]
        horizon: usize,

        /// Write the projection to a .csv or .json file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Menu-driven session over one dataset
    Interactive {
        /// Path to the wide-format temperature CSV
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Stats {
            file,
            country,
            start,
            end,
            output,
        } => {
            let data = load_dataset(&file)?;
            let country = parse_country(&country)?;
            let series = build_yearly_series(&data, country, start, end)?;

            println!(
                "\n{} {} ({} to {})",
                "Yearly candles:".bold(),
                country,
                start,
                end
            );
            print!("{}", render_table(&series));

            if let Some(path) = output {
                export_series(&series, &path)?;
            }
        }

        Commands::Chart {
            file,
            country,
            start,
            end,
        } => {
            let data = load_dataset(&file)?;
            let country = parse_country(&country)?;
            let series = build_yearly_series(&data, country, start, end)?;

            println!(
                "\n{} {} temperature, {} to {}",
                "Candlestick chart:".bold(),
                country,
                start,
                end
            );
            print!("{}", render_chart(&series));
        }

        Commands::Predict {
            file,
            country,
            start,
            end,
            horizon,
            output,
        } => {
            let data = load_dataset(&file)?;
            let country = parse_country(&country)?;
            let reference = build_yearly_series(&data, country, start, end)?;
            info!("Reference series has {} candles", reference.len());
            let projected = predict_next(&reference, horizon)?;

            println!(
                "\n{} {} years for {}, from the {} to {} reference",
                "Projection:".bold(),
                horizon,
                country,
                start,
                end
            );
            print!("{}", render_table(&projected));
            print!("{}", render_chart(&projected));

            if let Some(path) = output {
                export_series(&projected, &path)?;
            }
        }

        Commands::Interactive { file } => {
            let data = load_dataset(&file)?;
            run_session(&data)?;
        }
    }

    Ok(())
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let data = Dataset::from_csv(path)?;
    info!("Loaded {} readings from {:?}", data.len(), path);
    Ok(data)
}

/// Resolve a user-supplied country code, rejecting anything unrecognized.
fn parse_country(code: &str) -> Result<Country> {
    match Country::from_code(code) {
        Country::Unknown => bail!("unknown country code: {}", code),
        country => Ok(country),
    }
}

/// Write a series to `path`, as JSON for a .json extension and CSV otherwise.
fn export_series(series: &[YearlyCandle], path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => loader::save_series_json(series, path)?,
        _ => loader::save_series_csv(series, path)?,
    }
    println!("{} {:?}", "Saved:".green(), path);
    Ok(())
}

/// Run the interactive menu session until quit or end of input.
fn run_session(data: &Dataset) -> Result<()> {
    let mut lines = io::stdin().lock().lines();
    let mut current_year = data.earliest_year()?;

    loop {
        print_menu(current_year);
        let choice = match prompt(&mut lines, "Type in 1-6")? {
            Some(line) => line,
            None => break,
        };

        match choice.trim() {
            "1" => print_help(),
            "2" => {
                let message =
                    "Enter country and year range: country,start year,end year (e.g. AT,1980,1984)";
                match prompt(&mut lines, message)? {
                    Some(input) => {
                        if let Err(err) = show_stats(data, &input) {
                            report(&err);
                        }
                    }
                    None => break,
                }
            }
            "3" => {
                let message =
                    "Enter country and year range: country,start year,end year (e.g. AT,1980,1984)";
                match prompt(&mut lines, message)? {
                    Some(input) => {
                        if let Err(err) = show_chart(data, &input) {
                            report(&err);
                        }
                    }
                    None => break,
                }
            }
            "4" => {
                let message =
                    "Enter country and reference year range: country,start year,end year (e.g. AT,2000,2010)";
                match prompt(&mut lines, message)? {
                    Some(input) => {
                        if let Err(err) = show_prediction(data, &input) {
                            report(&err);
                        }
                    }
                    None => break,
                }
            }
            "5" => {
                current_year = data.next_year(current_year)?;
                println!("Going to the next year with data.");
            }
            "6" => break,
            other => println!("{} type 1-6, not {:?}", "Invalid choice:".red(), other),
        }
    }

    println!("{}", "Bye!".green().bold());
    Ok(())
}

fn print_menu(current_year: i32) {
    println!();
    println!("{}", "============== MENU ==============".bold());
    println!("1: Print help");
    println!("2: Print weather stats");
    println!("3: Plot candlestick chart");
    println!("4: Predict future candles");
    println!("5: Advance to the next year");
    println!("6: Quit");
    println!("----------------------------------");
    println!("Current year: {}", current_year);
    println!("==================================");
}

fn print_help() {
    println!("Help - explore yearly temperature candles for European countries:");
    println!("aggregate a country's readings into OHLC candles, chart them, and");
    println!("project the coming years with per-field linear trends.");
}

/// Print a prompt and read one line; `None` means stdin is closed.
fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> Result<Option<String>> {
    println!("{}", message);
    match lines.next() {
        Some(line) => Ok(Some(line.context("Failed to read from stdin")?)),
        None => Ok(None),
    }
}

/// Parse a `COUNTRY,START,END` request line.
fn parse_range_request(input: &str) -> Result<(Country, i32, i32)> {
    let tokens: Vec<&str> = input.split(',').map(str::trim).collect();
    if tokens.len() != 3 {
        bail!(
            "bad input {:?}, expected country,start year,end year",
            input
        );
    }

    let country = parse_country(tokens[0])?;
    let start = tokens[1]
        .parse()
        .with_context(|| format!("bad start year {:?}", tokens[1]))?;
    let end = tokens[2]
        .parse()
        .with_context(|| format!("bad end year {:?}", tokens[2]))?;

    Ok((country, start, end))
}

fn show_stats(data: &Dataset, input: &str) -> Result<()> {
    let (country, start, end) = parse_range_request(input)?;
    let series = build_yearly_series(data, country, start, end)?;

    println!("\n{} {}", "Country:".cyan(), country);
    print!("{}", render_table(&series));
    Ok(())
}

fn show_chart(data: &Dataset, input: &str) -> Result<()> {
    let (country, start, end) = parse_range_request(input)?;
    let series = build_yearly_series(data, country, start, end)?;

    println!(
        "\nCandlestick chart of {}'s temperature from {} to {}",
        country, start, end
    );
    print!("{}", render_chart(&series));
    Ok(())
}

fn show_prediction(data: &Dataset, input: &str) -> Result<()> {
    let (country, start, end) = parse_range_request(input)?;
    let reference = build_yearly_series(data, country, start, end)?;
    let projected = predict_next(&reference, DEFAULT_HORIZON)?;

    println!(
        "\nNext {} years for {}, from the {} to {} reference:",
        DEFAULT_HORIZON, country, start, end
    );
    print!("{}", render_table(&projected));
    print!("{}", render_chart(&projected));
    Ok(())
}

fn report(err: &anyhow::Error) {
    println!("{} {:#}", "Error:".red(), err);
}
