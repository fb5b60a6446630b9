pub mod budget;
pub mod merge;
pub mod window;

pub use budget::{BudgetAllocator, Clip};
pub use merge::{merge_regions, MergeConfig};
pub use window::pad_and_merge;

/// A merged run of transcript segments with small gaps between them,
/// treated as one continuous speech stretch.
#[derive(Debug, Clone)]
pub struct Region {
    pub start: f64,
    pub end: f64,
    pub char_count: usize,
    pub word_count: usize,
    pub texts: Vec<String>,
}

impl Region {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A region expanded by a symmetric time pad and merged with overlapping
/// neighbors, ready for budget allocation.
#[derive(Debug, Clone)]
pub struct Window {
    pub start: f64,
    pub end: f64,
    pub char_count: usize,
}

impl Window {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}
