use tracing::debug;

use crate::transcript::Segment;

use super::Region;

/// Thresholds for collapsing segments into speech regions.
///
/// The two built-in profiles reflect the two consumers: dataset building
/// wants long padded stretches, interstitial finding wants short
/// self-contained bursts.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Fold a segment into the open region if the silence gap is at most
    /// this many seconds.
    pub max_gap: f64,
    /// Minimum accumulated characters for a region to be emitted.
    pub min_chars: usize,
    /// Minimum region duration in seconds, if required by the consumer.
    pub min_duration: Option<f64>,
}

impl MergeConfig {
    /// Profile for the dataset-building pipeline.
    pub fn dataset() -> Self {
        Self {
            max_gap: 3.0,
            min_chars: 80,
            min_duration: Some(12.0),
        }
    }

    /// Profile for interstitial candidate scoring. No duration filter at
    /// merge time; the ranker applies its own duration band.
    pub fn interstitial() -> Self {
        Self {
            max_gap: 2.5,
            min_chars: 25,
            min_duration: None,
        }
    }

    fn accepts(&self, region: &Region) -> bool {
        if region.char_count < self.min_chars {
            return false;
        }
        match self.min_duration {
            Some(min) => region.duration() >= min,
            None => true,
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::dataset()
    }
}

fn seed_region(start: f64, end: f64, text: &str) -> Region {
    Region {
        start,
        end,
        char_count: text.chars().count(),
        word_count: text.split_whitespace().count(),
        texts: vec![text.to_string()],
    }
}

/// Collapse ordered segments into contiguous speech regions.
///
/// A single fold over the input carrying at most one open region: a segment
/// within `max_gap` of the open region extends it, anything further closes
/// the region and seeds a new one. Closed regions are emitted only if they
/// clear the acceptance thresholds; sub-threshold regions are dropped
/// silently. Segments with empty text or `end <= start` are skipped.
pub fn merge_regions(segments: &[Segment], config: &MergeConfig) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    let mut open: Option<Region> = None;

    for seg in segments {
        let text = seg.text.trim();
        if text.is_empty() || seg.end <= seg.start {
            continue;
        }

        open = match open.take() {
            None => Some(seed_region(seg.start, seg.end, text)),
            Some(mut cur) => {
                let gap = seg.start - cur.end;
                if gap <= config.max_gap {
                    cur.end = seg.end;
                    cur.char_count += text.chars().count();
                    cur.word_count += text.split_whitespace().count();
                    cur.texts.push(text.to_string());
                    Some(cur)
                } else {
                    if config.accepts(&cur) {
                        regions.push(cur);
                    }
                    Some(seed_region(seg.start, seg.end, text))
                }
            }
        };
    }

    if let Some(r) = open.take().filter(|r| config.accepts(r)) {
        regions.push(r);
    }

    debug!(
        "Merged {} segments into {} regions (max_gap={}s, min_chars={})",
        segments.len(),
        regions.len(),
        config.max_gap,
        config.min_chars
    );

    regions
}
