use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::rank::Candidate;

/// Format seconds as `HH:MM:SS`, or `MM:SS` when under an hour.
pub fn format_ts(seconds: f64) -> String {
    let total = seconds.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Render the ranked candidate list as a markdown report.
pub fn render_candidates(candidates: &[Candidate]) -> String {
    let mut lines = vec!["# Candidate Interstitials".to_string(), String::new()];

    if candidates.is_empty() {
        lines.push("No candidate interstitial regions found with current thresholds.".to_string());
    } else {
        for (i, c) in candidates.iter().enumerate() {
            lines.push(format!(
                "{}. `{} -> {}` ({:.1}s, {} words, score {:.2})",
                i + 1,
                format_ts(c.start),
                format_ts(c.end),
                c.duration,
                c.word_count,
                c.score
            ));
            lines.push(format!("   - Preview: {}", c.preview));
            lines.push(String::new());
        }
    }

    let mut out = lines.join("\n");
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

/// Write the markdown report, creating parent directories as needed.
pub fn write_candidates(path: &Path, candidates: &[Candidate]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_candidates(candidates))?;
    info!("Wrote {} candidates to {}", candidates.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(start: f64, end: f64, words: usize, score: f64, preview: &str) -> Candidate {
        Candidate {
            start,
            end,
            duration: end - start,
            word_count: words,
            score,
            preview: preview.to_string(),
        }
    }

    #[test]
    fn test_format_ts_under_an_hour() {
        assert_eq!(format_ts(0.0), "00:00");
        assert_eq!(format_ts(75.0), "01:15");
        assert_eq!(format_ts(59.6), "01:00");
    }

    #[test]
    fn test_format_ts_with_hours() {
        assert_eq!(format_ts(3661.0), "01:01:01");
        assert_eq!(format_ts(7200.0), "02:00:00");
    }

    #[test]
    fn test_render_empty_candidates() {
        let md = render_candidates(&[]);
        assert!(md.starts_with("# Candidate Interstitials"));
        assert!(md.contains("No candidate interstitial regions found"));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn test_render_candidate_lines() {
        let candidates = vec![candidate(90.0, 120.0, 85, 2.84, "so here is the thing")];
        let md = render_candidates(&candidates);

        assert!(md.contains("1. `01:30 -> 02:00` (30.0s, 85 words, score 2.84)"));
        assert!(md.contains("   - Preview: so here is the thing"));
    }

    #[test]
    fn test_render_numbers_candidates_in_order() {
        let candidates = vec![
            candidate(0.0, 20.0, 50, 3.0, "first"),
            candidate(100.0, 130.0, 40, 2.0, "second"),
        ];
        let md = render_candidates(&candidates);

        assert!(md.contains("1. `00:00 -> 00:20`"));
        assert!(md.contains("2. `01:40 -> 02:10`"));
    }
}
