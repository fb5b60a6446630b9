use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, VoicepackError};
use crate::region::Clip;

/// One episode entry in the input manifest. Paths may be relative to the
/// manifest file or absolute.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: String,
    pub audio: PathBuf,
    pub transcript: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpisodeManifest {
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Load the episode manifest and resolve each episode's paths against the
/// manifest's parent directory.
pub fn load_manifest(path: &Path) -> Result<EpisodeManifest> {
    if !path.exists() {
        return Err(VoicepackError::FileNotFound(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path)?;
    let mut manifest: EpisodeManifest = serde_json::from_str(&contents).map_err(|e| {
        VoicepackError::Manifest(format!("Failed to parse {}: {e}", path.display()))
    })?;

    if manifest.episodes.is_empty() {
        return Err(VoicepackError::Manifest(format!(
            "Manifest has no episodes: {}",
            path.display()
        )));
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for ep in &mut manifest.episodes {
        ep.audio = resolve(base, &ep.audio);
        ep.transcript = resolve(base, &ep.transcript);
    }

    Ok(manifest)
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Debug, Serialize)]
struct ClipRecord {
    episode_id: String,
    clip_id: String,
    start: f64,
    end: f64,
    duration: f64,
    path: String,
}

#[derive(Debug, Serialize)]
struct ClipManifest {
    clips: Vec<ClipRecord>,
    total_duration_seconds: f64,
    total_duration_minutes: f64,
}

/// Write the output clip manifest as pretty JSON.
pub fn write_clip_manifest(path: &Path, clips: &[Clip], clip_paths: &[PathBuf]) -> Result<()> {
    let total: f64 = clips.iter().map(Clip::duration).sum();

    let manifest = ClipManifest {
        clips: clips
            .iter()
            .zip(clip_paths.iter())
            .map(|(clip, clip_path)| ClipRecord {
                episode_id: clip.episode_id.clone(),
                clip_id: clip.clip_id.clone(),
                start: round3(clip.start),
                end: round3(clip.end),
                duration: round3(clip.duration()),
                path: clip_path.display().to_string(),
            })
            .collect(),
        total_duration_seconds: round3(total),
        total_duration_minutes: (total / 60.0 * 100.0).round() / 100.0,
    };

    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(path, json)?;
    info!("Wrote clip manifest: {}", path.display());
    Ok(())
}

/// Single-quote a path for an ffmpeg concat list entry.
fn quote_for_concat(path: &Path) -> String {
    let s = path.display().to_string();
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Write the ffmpeg concat-demuxer file list (one `file '<path>'` per clip).
pub fn write_concat_list(path: &Path, clip_paths: &[PathBuf]) -> Result<()> {
    let mut lines: Vec<String> = clip_paths
        .iter()
        .map(|p| format!("file {}", quote_for_concat(p)))
        .collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    std::fs::write(path, lines.join("\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_against_base() {
        let resolved = resolve(Path::new("/data/show"), Path::new("audio/ep1.mp3"));
        assert_eq!(resolved, PathBuf::from("/data/show/audio/ep1.mp3"));
    }

    #[test]
    fn test_resolve_absolute_passes_through() {
        let resolved = resolve(Path::new("/data/show"), Path::new("/mnt/audio/ep1.mp3"));
        assert_eq!(resolved, PathBuf::from("/mnt/audio/ep1.mp3"));
    }

    #[test]
    fn test_parse_manifest() {
        let json = r#"{
            "episodes": [
                {"id": "ep1", "audio": "audio/ep1.mp3", "transcript": "transcripts/ep1.json"}
            ]
        }"#;
        let manifest: EpisodeManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.episodes.len(), 1);
        assert_eq!(manifest.episodes[0].id, "ep1");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(10.0), 10.0);
    }

    #[test]
    fn test_write_clip_manifest_totals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        let clips = vec![
            Clip {
                episode_id: "ep1".to_string(),
                clip_id: "ep1-0001".to_string(),
                start: 0.0,
                end: 30.1234,
            },
            Clip {
                episode_id: "ep1".to_string(),
                clip_id: "ep1-0002".to_string(),
                start: 40.0,
                end: 45.5,
            },
        ];
        let clip_paths = vec![
            PathBuf::from("/tmp/clips/ep1-0001.wav"),
            PathBuf::from("/tmp/clips/ep1-0002.wav"),
        ];

        write_clip_manifest(&path, &clips, &clip_paths).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        // Per-clip durations round to 3 decimals; totals are the sum of the
        // unrounded durations, rounded only at the edge.
        assert_eq!(json["clips"][0]["duration"], 30.123);
        assert_eq!(json["clips"][1]["duration"], 5.5);
        assert_eq!(json["clips"][0]["clip_id"], "ep1-0001");
        assert_eq!(json["clips"][1]["path"], "/tmp/clips/ep1-0002.wav");
        assert_eq!(json["total_duration_seconds"], 35.623);
        assert_eq!(json["total_duration_minutes"], 0.59);
    }

    #[test]
    fn test_quote_for_concat_escapes_quotes() {
        let quoted = quote_for_concat(Path::new("/tmp/it's here.wav"));
        assert_eq!(quoted, "'/tmp/it'\\''s here.wav'");
    }

    #[test]
    fn test_load_manifest_missing_file() {
        let result = load_manifest(Path::new("/nonexistent/manifest.json"));
        assert!(matches!(result, Err(VoicepackError::FileNotFound(_))));
    }
}
