//! # System Constants
//!
//! Lifecycle method names, dispatch stages, and system-wide defaults.

use serde::{Deserialize, Serialize};

/// Names of the three lifecycle methods every handler must declare
pub mod lifecycle {
    pub const PREPARE: &str = "prepare";
    pub const PROCESS: &str = "process";
    pub const FINALIZE: &str = "finalize";
}

/// System-wide constants
pub mod system {
    /// Suffix appended to a command type name to form its container service id
    pub const DEFAULT_HANDLER_SUFFIX: &str = "Handler";

    /// Environment variable prefix for configuration overrides (`PATHWAY__LOGGING__LEVEL`)
    pub const ENV_PREFIX: &str = "PATHWAY";

    /// Environment variables consulted, in order, to detect the runtime environment
    pub const ENVIRONMENT_VARIABLES: &[&str] = &["PATHWAY_ENV", "APP_ENV"];

    pub const DEFAULT_ENVIRONMENT: &str = "development";

    /// Default configuration directory, relative to the working directory
    pub const DEFAULT_CONFIG_DIRECTORY: &str = "config";

    /// Base configuration file stem inside the configuration directory
    pub const CONFIG_FILE_STEM: &str = "pathway";
}

/// Kind of message being dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Command,
    Event,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Command => "command",
            MessageKind::Event => "event",
        }
    }
}

/// Stages a single dispatch moves through. Any failure ends the dispatch
/// in the stage where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStage {
    Resolve,
    Prepare,
    Process,
    Finalize,
    Done,
}

impl DispatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStage::Resolve => "resolve",
            DispatchStage::Prepare => lifecycle::PREPARE,
            DispatchStage::Process => lifecycle::PROCESS,
            DispatchStage::Finalize => lifecycle::FINALIZE,
            DispatchStage::Done => "done",
        }
    }
}

impl std::fmt::Display for DispatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
