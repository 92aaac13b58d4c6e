//! Core type definitions for uiprobe probes

use serde::{Deserialize, Serialize};

/// The three probe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Navigate, settle, screenshot, report the title
    Basic,
    /// Same as basic, but stream console messages and page errors to stdout
    Console,
    /// Wait for the sentinel text, locate and click a target element
    Interactive,
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Console => write!(f, "console"),
            Self::Interactive => write!(f, "interactive"),
        }
    }
}

impl std::str::FromStr for ProbeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "console" => Ok(Self::Console),
            "interactive" => Ok(Self::Interactive),
            _ => Err(format!("Invalid probe kind: {}", s)),
        }
    }
}

/// Terminal status of a probe run
///
/// A probe never raises past its own boundary; every run ends in exactly one
/// of these states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// The scripted sequence ran to the end
    #[default]
    Completed,
    /// Navigation worked but the sentinel or target element never appeared
    TargetMissing,
    /// Navigation, interaction or capture failed; see the failure message
    Failed,
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::TargetMissing => write!(f, "target_missing"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for ProbeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "target_missing" | "targetmissing" => Ok(Self::TargetMissing),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid probe status: {}", s)),
        }
    }
}

/// Severity of a console message, as reported over CDP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleSeverity {
    /// console.log
    #[default]
    Log,
    /// console.debug
    Debug,
    /// console.info
    Info,
    /// console.warn
    Warning,
    /// console.error
    Error,
}

impl std::fmt::Display for ConsoleSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Log => write!(f, "log"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ConsoleSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "verbose" => Ok(Self::Log),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "assert" => Ok(Self::Error),
            _ => Err(format!("Invalid console severity: {}", s)),
        }
    }
}

/// A single console message observed during a page session
///
/// Events are printed the moment they arrive and are not retained in the
/// probe report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEvent {
    /// Message severity
    pub severity: ConsoleSeverity,
    /// Message text (arguments joined with spaces)
    pub text: String,
}

impl ConsoleEvent {
    pub fn new(severity: ConsoleSeverity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Render the event as the single stdout line the operator sees
    pub fn to_line(&self) -> String {
        format!("CONSOLE [{}]: {}", self.severity, self.text)
    }
}
