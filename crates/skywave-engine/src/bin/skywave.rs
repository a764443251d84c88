use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use skywave_core::{Band, ConditionsSnapshot, LogSink, Settings};
use skywave_engine::{
    build_chart_projection, build_export_document, write_export, ExportMetadata, Orchestrator,
    TelemetryService,
};
use skywave_oracle::OracleClient;
use skywave_store::LocalStore;

#[derive(Parser)]
#[command(
    name = "skywave",
    version,
    about = "HF propagation decision-support core",
    long_about = "Fetches solar/ionospheric telemetry, runs point-to-point propagation \
                  analyses through the hosted analysis service, and maintains durable \
                  local history, presets and feedback."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch current solar and ionospheric conditions")]
    Conditions,

    #[command(about = "Analyze propagation between two locations")]
    Analyze {
        #[arg(long, help = "Origin location (QTH), city or grid square")]
        from: String,

        #[arg(long, help = "Destination (DX), city or grid square")]
        to: String,

        #[arg(long, default_value = "160m")]
        band: String,
    },

    #[command(about = "Print the synthetic 24-hour trend series")]
    Trend {
        #[arg(long, help = "Seed for a reproducible series")]
        seed: Option<u64>,
    },

    #[command(about = "Export the most recent analysis and conditions as JSON")]
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        #[arg(long, default_value = "160m")]
        band: String,
    },

    #[command(about = "List or save path presets")]
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },

    #[command(about = "Record whether a past analysis was correct")]
    Feedback {
        #[arg(long, help = "Analysis id from the history")]
        analysis: Uuid,

        #[arg(long)]
        correct: bool,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    List,
    Save {
        #[arg(long)]
        name: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long, default_value = "160m")]
        band: String,
    },
}

fn parse_band(raw: &str) -> Result<Band> {
    raw.parse::<Band>().map_err(|e| anyhow!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::default();
    let store = Arc::new(LocalStore::open(&settings.store).context("failed to open local store")?);
    let oracle = Arc::new(OracleClient::new(settings.oracle.clone())?);
    let sink = Arc::new(LogSink);
    let telemetry = Arc::new(TelemetryService::new(
        oracle.clone(),
        store.clone(),
        sink.clone(),
    ));

    match cli.command {
        Commands::Conditions => {
            let snapshots = telemetry
                .refresh()
                .await?
                .ok_or_else(|| anyhow!("refresh already in flight"))?;

            let solar = snapshots.solar;
            let source = if solar.fallback { "cached/default" } else { "live" };
            println!("{} ({})", "Solar conditions".bold(), source);
            println!("  SFI: {}", solar.sfi.to_string().yellow());
            println!("  Kp: {}", solar.kp);
            println!("  Geomagnetic: {}", solar.geomagnetic_status);
            println!("  Solar wind: {} km/s", solar.solar_wind);
            println!("  Dst index: {} nT", solar.dst_index);

            let ionosphere = snapshots.ionosphere;
            println!("{}", "Ionosphere".bold());
            println!("  TEC: {} TECU", ionosphere.tec.to_string().cyan());
            println!("  foF2: {} MHz", ionosphere.fo_f2);
            println!("  MUF 160m: {} MHz", ionosphere.muf_160m);
            println!("  Absorption: {} dB", ionosphere.d_layer_absorption);
        }

        Commands::Analyze { from, to, band } => {
            let band = parse_band(&band)?;
            let _ = telemetry.refresh().await?;

            let orchestrator = Orchestrator::new(oracle, store, sink);
            let outcome = orchestrator.run(&from, &to, band).await?;
            let analysis = &outcome.analysis;

            println!(
                "{} {} -> {} on {}",
                "Analysis".bold(),
                outcome.from_location,
                outcome.to_location,
                band
            );
            println!("  Distance: {} km, azimuth {}\u{00b0}", analysis.distance, analysis.azimuth);
            println!("  Signal quality: {}", analysis.signal_quality.green());
            println!("  Mode: {}", analysis.propagation_mode);
            println!("  Power: {}", analysis.power_recommendation);
            println!("  Antenna: {}", analysis.antenna_recommendation);
            for window in &analysis.best_times {
                println!("  Window: {}", window.cyan());
            }
            if let Some(confidence) = analysis.confidence {
                println!("  Confidence: {}%", confidence);
            }

            let projection = build_chart_projection(analysis);
            println!("  Hourly points: {}", projection.hourly.len());

            match outcome.forecast {
                Some(forecast) => {
                    println!("{} ({} periods)", "Extended forecast".bold(), forecast.periods.len());
                    for alert in &forecast.alerts {
                        println!("  {} {}", "!".red().bold(), alert);
                    }
                    println!("  Trends: {}", forecast.trends);
                }
                None => println!("{}", "Extended forecast unavailable".dimmed()),
            }
        }

        Commands::Trend { seed } => {
            let samples = match seed {
                Some(seed) => {
                    skywave_engine::generate_historical_series(seed, chrono::Utc::now())
                }
                None => skywave_engine::generate_historical_series_now(),
            };
            println!(
                "{:<6} {:>7} {:>6} {:>5} {:>5} {:>5}  {}",
                "time", "signal", "muf", "abs", "kp", "snr", "quality"
            );
            for sample in samples {
                println!(
                    "{:<6} {:>7} {:>6} {:>5} {:>5} {:>5}  {}",
                    sample.time,
                    sample.signal,
                    sample.muf,
                    sample.absorption,
                    sample.kp,
                    sample.snr,
                    sample.quality
                );
            }
        }

        Commands::Export { dir, band } => {
            let band = parse_band(&band)?;
            let _ = telemetry.refresh().await?;

            let last_analysis = store.analyses.all()?.pop();
            let (from_location, to_location) = last_analysis
                .as_ref()
                .map(|record| (record.from_location.clone(), record.to_location.clone()))
                .unwrap_or_default();

            let document = build_export_document(
                ExportMetadata {
                    band,
                    from_location,
                    to_location,
                    auto_refresh: settings.refresh.auto_refresh,
                },
                last_analysis.map(|record| record.result),
                store.snapshots.current_solar(),
                store.snapshots.current_ionosphere(),
                None,
                &telemetry.historical(),
                &store.feedback.all()?,
            )?;

            let path = write_export(&document, &dir)?;
            println!("{} {}", "Exported".green().bold(), path.display());
        }

        Commands::Presets { action } => match action {
            PresetAction::List => {
                let presets = store.presets.load_presets()?;
                if presets.is_empty() {
                    println!("{}", "No saved presets".dimmed());
                }
                for preset in presets {
                    println!(
                        "{}  {} -> {} on {}",
                        preset.name.bold(),
                        preset.from_location,
                        preset.to_location,
                        preset.band
                    );
                }
            }
            PresetAction::Save {
                name,
                from,
                to,
                band,
            } => {
                let band = parse_band(&band)?;
                let preset = store.presets.save_preset(name, from, to, band)?;
                println!("{} {}", "Saved".green().bold(), preset.name);
            }
        },

        Commands::Feedback { analysis, correct } => {
            let record = store
                .analyses
                .all()?
                .into_iter()
                .find(|record| record.id == analysis)
                .ok_or_else(|| anyhow!("no analysis with id {} in history", analysis))?;

            store.feedback.record_feedback(
                record.id,
                correct,
                record.result,
                ConditionsSnapshot {
                    solar: store.snapshots.current_solar(),
                    ionosphere: store.snapshots.current_ionosphere(),
                },
            )?;
            println!("{}", "Feedback recorded".green().bold());
        }
    }

    Ok(())
}
