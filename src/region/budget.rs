use tracing::debug;

use super::Window;

/// Clips shorter than this are dropped rather than extracted. Exists mainly
/// to discard the truncated tail right before budget exhaustion.
pub const MIN_CLIP_SECONDS: f64 = 2.0;

/// A budget-accepted window designated for audio extraction.
#[derive(Debug, Clone)]
pub struct Clip {
    pub episode_id: String,
    pub clip_id: String,
    pub start: f64,
    pub end: f64,
}

impl Clip {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Stable clip identifier from an episode id and a 1-based window ordinal.
fn clip_id(episode_id: &str, ordinal: usize) -> String {
    format!("{episode_id}-{ordinal:04}")
}

/// Consumes windows in chronological order under an optional global
/// duration cap.
///
/// The running total spans every `allocate` call, so a budget exhausted in
/// one episode yields nothing for later episodes. Allocation is a hard
/// chronological cutoff, not a best-fit selection: once the cap is reached
/// no later window is considered.
#[derive(Debug)]
pub struct BudgetAllocator {
    budget: Option<f64>,
    min_clip: f64,
    total: f64,
}

impl BudgetAllocator {
    /// `max_total_seconds <= 0` means unlimited.
    pub fn new(max_total_seconds: f64) -> Self {
        Self {
            budget: (max_total_seconds > 0.0).then_some(max_total_seconds),
            min_clip: MIN_CLIP_SECONDS,
            total: 0.0,
        }
    }

    pub fn with_min_clip(mut self, min_clip: f64) -> Self {
        self.min_clip = min_clip;
        self
    }

    /// Turn one episode's windows into clips, consuming budget as it goes.
    ///
    /// A window that overruns the remaining budget is truncated, never
    /// extended; if the truncated duration falls below the minimum viable
    /// clip length the window is skipped without consuming budget. Skipped
    /// windows still consume their ordinal, keeping clip ids stable.
    pub fn allocate(&mut self, episode_id: &str, windows: &[Window]) -> Vec<Clip> {
        let mut clips = Vec::new();

        for (i, win) in windows.iter().enumerate() {
            if let Some(budget) = self.budget {
                if self.total >= budget {
                    debug!("Budget exhausted at {:.1}s, stopping", self.total);
                    break;
                }
            }

            let start = win.start;
            let mut end = win.end;
            if let Some(budget) = self.budget {
                let remaining = budget - self.total;
                if win.duration() > remaining {
                    end = start + remaining.max(0.0);
                }
            }

            if end - start < self.min_clip {
                continue;
            }

            clips.push(Clip {
                episode_id: episode_id.to_string(),
                clip_id: clip_id(episode_id, i + 1),
                start,
                end,
            });
            self.total += end - start;
        }

        clips
    }

    /// Total duration of all clips emitted so far, in seconds.
    pub fn total_seconds(&self) -> f64 {
        self.total
    }
}
