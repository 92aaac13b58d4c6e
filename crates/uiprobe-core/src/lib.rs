//! # uiprobe-core
//!
//! Core types for uiprobe, a small headless-browser probe tool for manually
//! verifying that a local web application renders and behaves.
//!
//! A probe is one scripted browser session: navigate to the target URL, wait,
//! optionally click one element, and leave a screenshot (and console output)
//! behind for a human to look at. This crate holds everything the probes
//! share: the unified error type, report/console types, file configuration
//! and the artifact store.

mod artifact;
mod config;
mod error;
mod types;

pub use artifact::{Artifact, ArtifactStore};
pub use config::{BrowserDefaults, TimeoutConfig, UiprobeConfig};
pub use error::{ProbeError, Result};
pub use types::{ConsoleEvent, ConsoleSeverity, ProbeKind, ProbeStatus};
