use serde::Deserialize;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, VoicepackError};

/// One timestamped unit of transcribed speech, as produced by a
/// speech-to-text model. Extra fields (confidence, tokens, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Load the `segments` array from a transcription JSON file.
///
/// Segments are assumed ordered by start time; the merge stage does not
/// re-sort them.
pub fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    if !path.exists() {
        return Err(VoicepackError::FileNotFound(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path)?;
    let transcript: Transcript = serde_json::from_str(&contents).map_err(|e| {
        VoicepackError::Transcript(format!("Failed to parse {}: {e}", path.display()))
    })?;

    debug!(
        "Loaded {} segments from {}",
        transcript.segments.len(),
        path.display()
    );

    Ok(transcript.segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcript_segments() {
        let json = r#"{
            "language": "en",
            "segments": [
                {"start": 0.0, "end": 2.5, "text": "hello there", "confidence": 0.93},
                {"start": 3.0, "end": 5.0, "text": "second line"}
            ]
        }"#;

        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[0].text, "hello there");
        assert_eq!(transcript.segments[1].start, 3.0);
    }

    #[test]
    fn test_parse_missing_segments() {
        let transcript: Transcript = serde_json::from_str("{}").unwrap();
        assert!(transcript.segments.is_empty());
    }

    #[test]
    fn test_parse_segment_defaults() {
        let json = r#"{"segments": [{"start": 1.0}]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.segments[0].end, 0.0);
        assert!(transcript.segments[0].text.is_empty());
    }

    #[test]
    fn test_load_segments_missing_file() {
        let result = load_segments(Path::new("/nonexistent/transcript.json"));
        assert!(matches!(result, Err(VoicepackError::FileNotFound(_))));
    }
}
