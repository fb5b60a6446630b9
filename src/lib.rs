pub mod audio;
pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod rank;
pub mod region;
pub mod report;
pub mod transcript;

pub use config::Config;
pub use error::{Result, VoicepackError};
pub use pipeline::{
    build_dataset, find_interstitials, print_summary, BuildConfig, BuildResult, BuildStats,
};
