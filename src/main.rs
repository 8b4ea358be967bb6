//! CLI entry point for the neighbourhood rate and point pattern tools.
//!
//! Provides subcommands for querying the hypertension and low income datasets,
//! combining them into a rate comparison, and drawing chaos game patterns from
//! a config file or a stream of clicks.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use neighbourhood_patterns::analysis::combine::combine_rates;
use neighbourhood_patterns::analysis::rates::hypertension_counts;
use neighbourhood_patterns::analysis::totals::{high_hypertension_rate, total_num_hypertension};
use neighbourhood_patterns::analysis::utility::mean;
use neighbourhood_patterns::canvas::{DEFAULT_COLOUR, ImageCanvas, warmup};
use neighbourhood_patterns::config::PatternConfig;
use neighbourhood_patterns::interactive::{ClickSource, ScriptedClicks, user_pattern};
use neighbourhood_patterns::loader::{load_hypertension_data, load_low_income_data, load_points};
use neighbourhood_patterns::output::{
    print_json, print_pretty, write_combined_csv, write_scatter_json,
};
use neighbourhood_patterns::records::AgeGroup;
use neighbourhood_patterns::sequence::{SelectionPolicy, draw_point_sequence, verify_point_sequence};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "neighbourhood_patterns")]
#[command(
    about = "Neighbourhood health statistics and chaos game point patterns",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total number of people aged 20+ with hypertension
    Total {
        /// Hypertension dataset CSV
        #[arg(long, value_name = "FILE")]
        hypertension: PathBuf,
    },
    /// Neighbourhoods whose 20+ hypertension rate is at least a threshold
    HighRate {
        #[arg(long, value_name = "FILE")]
        hypertension: PathBuf,

        /// Rate threshold between 0.0 and 1.0
        #[arg(short, long)]
        threshold: f64,
    },
    /// Hypertension counts per neighbourhood for an age group
    Counts {
        #[arg(long, value_name = "FILE")]
        hypertension: PathBuf,

        /// One of 20+, 20-44, 45-64, 65+
        #[arg(short, long, default_value = "20+")]
        age_group: AgeGroup,
    },
    /// Combine hypertension and low income rates for neighbourhoods in both datasets
    Combine {
        #[arg(long, value_name = "FILE")]
        hypertension: PathBuf,

        /// Low income dataset CSV
        #[arg(long, value_name = "FILE")]
        low_income: PathBuf,

        #[arg(short, long, default_value = "20+")]
        age_group: AgeGroup,

        /// CSV file to write the combined rates to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file to write the scatter plot description to
        #[arg(long)]
        scatter: Option<PathBuf>,
    },
    /// Draw a short diagonal line of pixels
    Warmup {
        #[arg(long, default_value_t = 800)]
        width: u32,

        #[arg(long, default_value_t = 800)]
        height: u32,

        /// PNG file to save the canvas to
        #[arg(short, long, default_value = "warmup.png")]
        output: PathBuf,
    },
    /// Draw a point sequence described by a TOML config
    Draw {
        #[arg(short, long, value_name = "FILE", default_value = "pattern.toml")]
        config: PathBuf,

        #[arg(short, long, default_value = "pattern.png")]
        output: PathBuf,
    },
    /// Check whether a list of points is a valid sequence for a config's vertices
    Verify {
        #[arg(short, long, value_name = "FILE", default_value = "pattern.toml")]
        config: PathBuf,

        /// CSV file of x,y points with a header row
        #[arg(short, long, value_name = "FILE")]
        points: PathBuf,
    },
    /// Build a pattern from clicks read as x,y lines
    Interactive {
        /// File of clicks, or - for stdin
        #[arg(long, default_value = "-")]
        clicks: String,

        #[arg(short = 'v', long, default_value_t = 3)]
        num_vertices: usize,

        /// 1 (uniform) or 2 (avoid neighbours)
        #[arg(short, long, default_value = "1")]
        sequence: SelectionPolicy,

        #[arg(short = 'n', long, default_value_t = 100_000)]
        num_points: usize,

        #[arg(long, default_value_t = 800)]
        width: u32,

        #[arg(long, default_value_t = 800)]
        height: u32,

        /// Seed for a reproducible pattern
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, default_value = "pattern.png")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/neighbourhood_patterns.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("neighbourhood_patterns.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Total { hypertension } => {
            let data = load_hypertension_data(&hypertension)?;
            let total = total_num_hypertension(&data);
            info!(
                neighbourhoods = data.len(),
                total,
                "Total people aged 20+ with hypertension"
            );
        }
        Commands::HighRate {
            hypertension,
            threshold,
        } => {
            if !(0.0..=1.0).contains(&threshold) {
                warn!(threshold, "Threshold is outside 0.0..=1.0");
            }
            let data = load_hypertension_data(&hypertension)?;
            let mut names: Vec<_> = high_hypertension_rate(&data, threshold)
                .into_iter()
                .collect();
            names.sort();

            info!(
                threshold,
                matched = names.len(),
                "High hypertension rate neighbourhoods"
            );
            print_json(&names)?;
        }
        Commands::Counts {
            hypertension,
            age_group,
        } => {
            let data = load_hypertension_data(&hypertension)?;
            let counts = hypertension_counts(&data, age_group);

            for record in &data {
                info!(
                    neighbourhood = %record.name,
                    age_group = %age_group,
                    count = counts[&record.name],
                    "Hypertension count"
                );
            }
        }
        Commands::Combine {
            hypertension,
            low_income,
            age_group,
            output,
            scatter,
        } => {
            let low_income_data = load_low_income_data(&low_income)?;
            let hypertension_data = load_hypertension_data(&hypertension)?;

            let combined = combine_rates(&hypertension_data, &low_income_data, age_group);
            print_pretty(&combined);

            let hypertension_rates: Vec<f64> =
                combined.iter().map(|r| r.hypertension_rate).collect();
            let low_income_rates: Vec<f64> = combined.iter().map(|r| r.low_income_rate).collect();
            info!(
                matched = combined.len(),
                age_group = %age_group,
                mean_hypertension_rate = mean(&hypertension_rates),
                mean_low_income_rate = mean(&low_income_rates),
                "Combined rates"
            );

            if let Some(path) = output {
                write_combined_csv(&path, &combined)?;
            }
            if let Some(path) = scatter {
                write_scatter_json(&path, &combined, age_group)?;
            }
        }
        Commands::Warmup {
            width,
            height,
            output,
        } => {
            let mut canvas = ImageCanvas::new(width, height)?;
            let drawn = warmup(&mut canvas);
            info!(drawn, "Warmup drawn");
            canvas.save(&output)?;
        }
        Commands::Draw { config, output } => {
            let config = PatternConfig::load_from_file(&config)?;
            let mut rng = seeded_rng(config.pattern.seed);
            let mut canvas = ImageCanvas::new(config.canvas.width, config.canvas.height)?;

            let drawn = draw_point_sequence(
                &mut canvas,
                &config.vertices(),
                config.initial_point(),
                config.pattern.num_points,
                config.pattern.policy,
                &mut rng,
                config.colour()?,
            )?;
            info!(drawn, "Pattern drawn");
            canvas.save(&output)?;
        }
        Commands::Verify { config, points } => {
            let config = PatternConfig::load_from_file(&config)?;
            let points = load_points(&points)?;

            let valid = verify_point_sequence(
                &config.vertices(),
                config.initial_point(),
                &points,
                config.pattern.policy,
            );
            info!(
                points = points.len(),
                policy = %config.pattern.policy,
                valid,
                "Sequence checked"
            );
            if !valid {
                bail!("points are not a valid {} sequence", config.pattern.policy);
            }
        }
        Commands::Interactive {
            clicks,
            num_vertices,
            sequence,
            num_points,
            width,
            height,
            seed,
            output,
        } => {
            let mut canvas = ImageCanvas::new(width, height)?;
            let mut rng = seeded_rng(seed);

            let mut source: Box<dyn ClickSource> = if clicks == "-" {
                Box::new(ScriptedClicks::new(io::stdin().lock()))
            } else {
                let file = File::open(&clicks)
                    .with_context(|| format!("Failed to open clicks file: {clicks}"))?;
                Box::new(ScriptedClicks::new(BufReader::new(file)))
            };

            let drawn = user_pattern(
                &mut canvas,
                source.as_mut(),
                num_vertices,
                sequence,
                num_points,
                &mut rng,
                DEFAULT_COLOUR,
            )?;
            info!(drawn, "Pattern drawn");
            canvas.save(&output)?;
        }
    }

    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
