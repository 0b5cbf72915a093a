//! Host-facing surface: configuration, the main-thread controller and labels.

mod config;
mod controller;
mod host;
mod label;
mod overlay;
mod validation;

pub use config::SparklineConfig;
pub use controller::ScrubController;
pub use host::ScrubHost;
pub use label::{LabelKind, MinMaxLabel};
