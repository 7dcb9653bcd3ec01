//! Dilepton analysis CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dl_analysis::{
    generate_events, run_parallel, run_sequential, Analysis, DileptonAnalysis, ToyConfig,
};
use dl_core::Event;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dl")]
#[command(about = "Dilepton two-photon analysis over simulated collision events")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate toy events as JSON lines
    Generate {
        /// Output event file (one JSON event per line)
        #[arg(short, long)]
        output: PathBuf,

        /// Number of events
        #[arg(long, default_value = "1000")]
        events: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Fraction of events with a hard opposite-charge muon pair
        #[arg(long, default_value = "0.6")]
        signal_fraction: f64,

        /// Mean soft-particle multiplicity
        #[arg(long, default_value = "8.0")]
        soft_multiplicity: f64,

        /// Gaussian event-weight spread around 1 (0 = unweighted)
        #[arg(long, default_value = "0.0")]
        weight_spread: f64,
    },

    /// Run the dilepton analysis over an event file
    Run {
        /// Input event file (JSON lines)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for histogram artifacts (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generator cross-section in pb used for absolute normalization
        #[arg(long, default_value = "1.0")]
        cross_section_pb: f64,

        /// Threads (0 = auto). Use 1 for a strictly sequential run.
        #[arg(long, default_value = "1")]
        threads: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Generate {
            output,
            events,
            seed,
            signal_fraction,
            soft_multiplicity,
            weight_spread,
        } => {
            let config = ToyConfig {
                n_events: events,
                seed,
                signal_fraction,
                soft_multiplicity,
                weight_spread,
            };
            let events = generate_events(&config)?;
            write_events(&output, &events)?;
            tracing::info!(n = events.len(), path = %output.display(), "wrote toy events");
            Ok(())
        }

        Commands::Run { input, output, cross_section_pb, threads } => {
            let events = read_events(&input)?;
            let artifact = if threads == 1 {
                let mut analysis = DileptonAnalysis::new();
                run_sequential(&mut analysis, &events, cross_section_pb)?;
                analysis.book().to_artifact()
            } else {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .context("building thread pool")?;
                let (analysis, _summary) = pool.install(|| {
                    run_parallel(DileptonAnalysis::new, &events, cross_section_pb, 0)
                })?;
                analysis.book().to_artifact()
            };

            let json = serde_json::to_string_pretty(&artifact)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), "wrote histogram artifacts");
                }
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

fn write_events(path: &Path, events: &[Event]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_events(path: &Path) -> Result<Vec<Event>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: Event = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed event", path.display(), lineno + 1))?;
        events.push(event);
    }
    Ok(events)
}
