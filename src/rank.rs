use std::cmp::Ordering;

use tracing::debug;

use crate::region::Region;

/// How many ranked candidates to keep for human review.
pub const TOP_K: usize = 10;

/// Maximum preview excerpt length in characters.
const PREVIEW_CHARS: usize = 220;

/// Per-fragment bonus and its cap. Regions built from many short utterances
/// read as conversational rather than narration, which is what an
/// interstitial usually is.
const FRAGMENT_BONUS: f64 = 0.03;
const FRAGMENT_BONUS_CAP: f64 = 0.5;

/// Duration band a region must fall in to be considered.
#[derive(Debug, Clone)]
pub struct RankConfig {
    pub min_duration: f64,
    pub max_duration: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            min_duration: 15.0,
            max_duration: 180.0,
        }
    }
}

/// A scored region considered for human review as a standalone remark.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub word_count: usize,
    pub score: f64,
    pub preview: String,
}

fn build_preview(texts: &[String]) -> String {
    let joined = texts.join(" ");
    joined.chars().take(PREVIEW_CHARS).collect::<String>().trim().to_string()
}

fn score_region(region: &Region, duration: f64) -> f64 {
    // Floor of 1s keeps near-zero durations from blowing up the density term.
    let density = region.word_count as f64 / duration.max(1.0);
    let bonus = (region.texts.len() as f64 * FRAGMENT_BONUS).min(FRAGMENT_BONUS_CAP);
    density + bonus
}

/// Score regions by speech density plus a capped fragment bonus, filter by
/// the duration band, and return the top candidates by descending score.
///
/// The sort is stable, so ties keep their original chronological order.
pub fn rank_candidates(regions: &[Region], config: &RankConfig) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = regions
        .iter()
        .filter_map(|region| {
            let duration = region.duration();
            if duration < config.min_duration || duration > config.max_duration {
                return None;
            }
            Some(Candidate {
                start: region.start,
                end: region.end,
                duration,
                word_count: region.word_count,
                score: score_region(region, duration),
                preview: build_preview(&region.texts),
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(TOP_K);

    debug!(
        "Ranked {} regions into {} candidates",
        regions.len(),
        candidates.len()
    );

    candidates
}
