use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, VoicepackError};

/// Check if FFmpeg is installed and accessible.
pub fn check_ffmpeg() -> Result<()> {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map_err(|e| {
            VoicepackError::AudioExtraction(format!(
                "FFmpeg not found. Please install FFmpeg and ensure it's in your PATH. Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(VoicepackError::AudioExtraction(
            "FFmpeg check failed".to_string(),
        ));
    }

    debug!("FFmpeg is available");
    Ok(())
}

/// Check if FFprobe is installed and accessible.
pub fn check_ffprobe() -> Result<()> {
    let output = Command::new("ffprobe")
        .arg("-version")
        .output()
        .map_err(|e| {
            VoicepackError::AudioExtraction(format!(
                "FFprobe not found. Please install FFmpeg (includes FFprobe). Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(VoicepackError::AudioExtraction(
            "FFprobe check failed".to_string(),
        ));
    }

    debug!("FFprobe is available");
    Ok(())
}

/// Get the total duration of an audio file in seconds using FFprobe.
pub fn probe_duration(input: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(input)
        .output()
        .map_err(|e| VoicepackError::AudioExtraction(format!("Failed to run FFprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VoicepackError::AudioExtraction(format!(
            "FFprobe failed: {stderr}"
        )));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    duration_str.trim().parse().map_err(|e| {
        VoicepackError::AudioExtraction(format!(
            "Failed to parse duration '{}': {e}",
            duration_str.trim()
        ))
    })
}

/// Extract one clip to mono 16-bit PCM WAV at the given sample rate.
pub async fn extract_clip(
    input: &Path,
    output: &Path,
    start: f64,
    end: f64,
    sample_rate: u32,
) -> Result<()> {
    if !input.exists() {
        return Err(VoicepackError::FileNotFound(input.display().to_string()));
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    debug!(
        "Extracting clip {:.3}-{:.3}s from {}",
        start,
        end,
        input.display()
    );

    let status = Command::new("ffmpeg")
        .args(["-y", "-hide_banner", "-loglevel", "error", "-ss"])
        .arg(format!("{start:.3}"))
        .arg("-to")
        .arg(format!("{end:.3}"))
        .arg("-i")
        .arg(input)
        .args(["-ac", "1", "-ar"])
        .arg(sample_rate.to_string())
        .args(["-c:a", "pcm_s16le"])
        .arg(output)
        .status()
        .map_err(|e| VoicepackError::AudioExtraction(format!("Failed to run FFmpeg: {e}")))?;

    if !status.success() {
        return Err(VoicepackError::AudioExtraction(format!(
            "FFmpeg clip extraction failed for {}",
            output.display()
        )));
    }

    Ok(())
}

/// Losslessly concatenate extracted clips into one WAV using the concat
/// demuxer and a prepared file list.
pub async fn concat_clips(concat_list: &Path, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let status = Command::new("ffmpeg")
        .args([
            "-y",
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
        ])
        .arg(concat_list)
        .args(["-c", "copy"])
        .arg(output)
        .status()
        .map_err(|e| VoicepackError::AudioExtraction(format!("Failed to run FFmpeg: {e}")))?;

    if !status.success() {
        return Err(VoicepackError::AudioExtraction(
            "FFmpeg concat failed".to_string(),
        ));
    }

    Ok(())
}
