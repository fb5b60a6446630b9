use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use voicepack::config::Config;
use voicepack::pipeline::{
    build_dataset_with_cancel, find_interstitials, print_summary, BuildConfig,
};
use voicepack::rank::RankConfig;
use voicepack::region::budget::MIN_CLIP_SECONDS;

#[derive(Parser)]
#[command(name = "voicepack")]
#[command(version, about = "Curate voice-training clip packs from episode audio and transcripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a curated clip pack from an episode manifest
    Build {
        /// JSON manifest path
        #[arg(long)]
        manifest: PathBuf,

        /// Output directory for clips and metadata
        #[arg(long)]
        output_dir: PathBuf,

        /// Output sample rate
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Merge transcript segments if gap <= this (seconds)
        #[arg(long)]
        max_gap: Option<f64>,

        /// Minimum chars for a speech region
        #[arg(long)]
        min_chars: Option<usize>,

        /// Minimum speech region duration (seconds)
        #[arg(long)]
        min_duration: Option<f64>,

        /// Padding around each speech region (seconds)
        #[arg(long)]
        padding: Option<f64>,

        /// Optional cap for total extracted seconds (0 = unlimited)
        #[arg(long, default_value_t = 0.0)]
        max_total_seconds: f64,

        /// Drop clips shorter than this (seconds)
        #[arg(long, default_value_t = MIN_CLIP_SECONDS)]
        min_clip_seconds: f64,

        /// Optional output WAV path for a single merged pack
        #[arg(long)]
        concat_wav: Option<PathBuf>,

        /// Disable progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Find likely spoken interstitials in a transcript
    Interstitials {
        /// Transcription JSON path
        #[arg(long)]
        input_json: PathBuf,

        /// Output markdown report path
        #[arg(long)]
        output_md: PathBuf,

        /// Minimum region duration in seconds
        #[arg(long, default_value_t = 15.0)]
        min_duration: f64,

        /// Maximum region duration in seconds
        #[arg(long, default_value_t = 180.0)]
        max_duration: f64,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            manifest,
            output_dir,
            sample_rate,
            max_gap,
            min_chars,
            min_duration,
            padding,
            max_total_seconds,
            min_clip_seconds,
            concat_wav,
            no_progress,
        } => {
            let defaults = Config::load().context("Failed to load configuration")?;
            defaults
                .validate()
                .context("Configuration validation failed")?;

            let config = BuildConfig {
                sample_rate: sample_rate.unwrap_or(defaults.sample_rate),
                max_gap: max_gap.unwrap_or(defaults.max_gap),
                min_chars: min_chars.unwrap_or(defaults.min_chars),
                min_duration: min_duration.unwrap_or(defaults.min_duration),
                padding: padding.unwrap_or(defaults.padding),
                max_total_seconds,
                min_clip_seconds,
                concat_wav,
                show_progress: !no_progress,
            };

            info!("Manifest: {}", manifest.display());
            info!("Output:   {}", output_dir.display());

            let cancelled = Arc::new(AtomicBool::new(false));
            let cancel_flag = cancelled.clone();
            ctrlc::set_handler(move || {
                cancel_flag.store(true, Ordering::Relaxed);
            })
            .context("Failed to install Ctrl+C handler")?;

            let result = build_dataset_with_cancel(&manifest, &output_dir, config, cancelled)
                .await
                .context("Dataset build failed")?;

            print_summary(&result);
        }

        Commands::Interstitials {
            input_json,
            output_md,
            min_duration,
            max_duration,
        } => {
            info!("Transcript: {}", input_json.display());

            let config = RankConfig {
                min_duration,
                max_duration,
            };
            let result = find_interstitials(&input_json, &output_md, config)
                .context("Interstitial search failed")?;

            println!(
                "Wrote {} candidates to {}",
                result.candidates.len(),
                result.report_path.display()
            );
        }
    }

    Ok(())
}
