//! Configuration loading and management for the leave tracker.
//!
//! This module loads the data directory layout and the validation policy
//! from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use leave_tracker::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./tracker.yaml").unwrap();
//! println!("Annual cap: {} days", config.policy().annual_max_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_DATA_DIR, TrackerConfig};
