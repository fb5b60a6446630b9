use crate::audio::{check_ffmpeg, check_ffprobe, concat_clips, extract_clip, probe_duration};
use crate::config::Config;
use crate::error::{Result, VoicepackError};
use crate::manifest::{load_manifest, write_clip_manifest, write_concat_list};
use crate::rank::{rank_candidates, Candidate, RankConfig};
use crate::region::budget::MIN_CLIP_SECONDS;
use crate::region::{merge_regions, pad_and_merge, BudgetAllocator, Clip, MergeConfig};
use crate::report::write_candidates;
use crate::transcript::load_segments;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Configuration for the dataset build pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output sample rate for extracted clips.
    pub sample_rate: u32,
    /// Merge transcript segments if the gap is at most this many seconds.
    pub max_gap: f64,
    /// Minimum characters for a speech region.
    pub min_chars: usize,
    /// Minimum speech region duration in seconds.
    pub min_duration: f64,
    /// Padding around each speech region in seconds.
    pub padding: f64,
    /// Cap on total extracted seconds (0 = unlimited).
    pub max_total_seconds: f64,
    /// Clips shorter than this are dropped rather than extracted.
    pub min_clip_seconds: f64,
    /// Optional output path for a single merged WAV pack.
    pub concat_wav: Option<PathBuf>,
    /// Show progress bars.
    pub show_progress: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl BuildConfig {
    /// Seed the pipeline from tool-wide defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            sample_rate: config.sample_rate,
            max_gap: config.max_gap,
            min_chars: config.min_chars,
            min_duration: config.min_duration,
            padding: config.padding,
            max_total_seconds: 0.0,
            min_clip_seconds: MIN_CLIP_SECONDS,
            concat_wav: None,
            show_progress: true,
        }
    }

    fn merge_config(&self) -> MergeConfig {
        MergeConfig {
            max_gap: self.max_gap,
            min_chars: self.min_chars,
            min_duration: Some(self.min_duration),
        }
    }
}

/// Statistics from a dataset build.
#[derive(Debug, Clone)]
pub struct BuildStats {
    /// Total time taken for the entire pipeline.
    pub total_time: Duration,
    /// Number of episodes processed.
    pub episodes: usize,
    /// Number of clips extracted.
    pub clips: usize,
    /// Total duration of extracted clips in seconds.
    pub total_seconds: f64,
}

/// Result of the dataset build pipeline.
#[derive(Debug)]
pub struct BuildResult {
    /// Extracted clips in chronological order.
    pub clips: Vec<Clip>,
    /// Path to the written clip manifest.
    pub manifest_path: PathBuf,
    /// Path to the merged pack, if one was requested.
    pub concat_wav: Option<PathBuf>,
    /// Pipeline statistics.
    pub stats: BuildStats,
}

fn check_cancelled(cancelled: &AtomicBool, stage: &str) -> Result<()> {
    if cancelled.load(Ordering::Relaxed) {
        return Err(VoicepackError::Cancelled(format!(
            "Build cancelled during {stage}"
        )));
    }
    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Build a curated clip pack from an episode manifest.
///
/// For each episode this:
/// 1. Loads transcript segments and probes the audio duration
/// 2. Merges segments into speech regions and pads them into windows
/// 3. Allocates windows against the global duration budget
/// 4. Extracts each accepted clip with FFmpeg
///
/// Then writes the clip manifest and concat list, and optionally merges
/// everything into a single WAV pack.
pub async fn build_dataset(
    manifest_path: &Path,
    output_dir: &Path,
    config: BuildConfig,
) -> Result<BuildResult> {
    let cancelled = Arc::new(AtomicBool::new(false));
    build_dataset_with_cancel(manifest_path, output_dir, config, cancelled).await
}

/// Build a clip pack with cancellation support.
pub async fn build_dataset_with_cancel(
    manifest_path: &Path,
    output_dir: &Path,
    config: BuildConfig,
    cancelled: Arc<AtomicBool>,
) -> Result<BuildResult> {
    let start_time = Instant::now();

    check_ffmpeg()?;
    check_ffprobe()?;

    let manifest = load_manifest(manifest_path)?;
    std::fs::create_dir_all(output_dir)?;

    info!(
        "Building dataset from {} episodes into {}",
        manifest.episodes.len(),
        output_dir.display()
    );

    let merge_config = config.merge_config();
    let mut allocator =
        BudgetAllocator::new(config.max_total_seconds).with_min_clip(config.min_clip_seconds);
    let mut clips: Vec<Clip> = Vec::new();
    let mut clip_paths: Vec<PathBuf> = Vec::new();

    for episode in &manifest.episodes {
        check_cancelled(&cancelled, "episode processing")?;

        if !episode.audio.exists() {
            return Err(VoicepackError::FileNotFound(
                episode.audio.display().to_string(),
            ));
        }
        if !episode.transcript.exists() {
            return Err(VoicepackError::FileNotFound(
                episode.transcript.display().to_string(),
            ));
        }

        let segments = load_segments(&episode.transcript)?;
        let audio_duration = probe_duration(&episode.audio)?;

        let regions = merge_regions(&segments, &merge_config);
        let windows = pad_and_merge(&regions, config.padding, audio_duration);
        let episode_clips = allocator.allocate(&episode.id, &windows);

        debug!(
            "Episode {}: {} segments -> {} regions -> {} windows -> {} clips",
            episode.id,
            segments.len(),
            regions.len(),
            windows.len(),
            episode_clips.len()
        );

        let pb = config.show_progress.then(|| {
            let pb = ProgressBar::new(episode_clips.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.green} {pos}/{len} {msg}")
                    .unwrap(),
            );
            pb.set_message(format!("Extracting clips from {}", episode.id));
            pb
        });

        for clip in episode_clips {
            check_cancelled(&cancelled, "clip extraction")?;

            let clip_path = output_dir.join("clips").join(format!("{}.wav", clip.clip_id));
            extract_clip(
                &episode.audio,
                &clip_path,
                clip.start,
                clip.end,
                config.sample_rate,
            )
            .await?;

            clips.push(clip);
            clip_paths.push(clip_path);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message(format!("✓ {}", episode.id));
        }
    }

    let concat_path = output_dir.join("concat.txt");
    write_concat_list(&concat_path, &clip_paths)?;

    let out_manifest = output_dir.join("manifest.json");
    write_clip_manifest(&out_manifest, &clips, &clip_paths)?;

    let concat_wav = if let Some(pack_path) = &config.concat_wav {
        check_cancelled(&cancelled, "pack concatenation")?;
        let pb = config.show_progress.then(|| spinner("Merging pack...".to_string()));
        concat_clips(&concat_path, pack_path).await?;
        if let Some(pb) = pb {
            pb.finish_with_message(format!("✓ Merged pack: {}", pack_path.display()));
        }
        Some(pack_path.clone())
    } else {
        None
    };

    let stats = BuildStats {
        total_time: start_time.elapsed(),
        episodes: manifest.episodes.len(),
        clips: clips.len(),
        total_seconds: allocator.total_seconds(),
    };

    info!(
        "Generated {} clips ({:.1}s of speech) in {:.2}s",
        stats.clips,
        stats.total_seconds,
        stats.total_time.as_secs_f64()
    );

    Ok(BuildResult {
        clips,
        manifest_path: out_manifest,
        concat_wav,
        stats,
    })
}

/// Result of the interstitial finder pipeline.
#[derive(Debug)]
pub struct InterstitialResult {
    /// Ranked candidates, best first.
    pub candidates: Vec<Candidate>,
    /// Path to the written markdown report.
    pub report_path: PathBuf,
}

/// Find likely spoken interstitials in a transcript and write a ranked
/// markdown report for human review.
pub fn find_interstitials(
    input_json: &Path,
    output_md: &Path,
    config: RankConfig,
) -> Result<InterstitialResult> {
    let segments = load_segments(input_json)?;
    let regions = merge_regions(&segments, &MergeConfig::interstitial());
    let candidates = rank_candidates(&regions, &config);

    write_candidates(output_md, &candidates)?;

    Ok(InterstitialResult {
        candidates,
        report_path: output_md.to_path_buf(),
    })
}

/// Print a summary of the dataset build.
pub fn print_summary(result: &BuildResult) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                      Dataset Build Complete                    ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Episodes:   {}", result.stats.episodes);
    println!("  Clips:      {}", result.stats.clips);
    println!(
        "  Speech:     {:.1}s ({:.2} min)",
        result.stats.total_seconds,
        result.stats.total_seconds / 60.0
    );
    println!("  Manifest:   {}", result.manifest_path.display());
    if let Some(pack) = &result.concat_wav {
        println!("  Pack:       {}", pack.display());
    }
    println!();
    println!(
        "  Total time: {:.2}s",
        result.stats.total_time.as_secs_f64()
    );
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
