//! Scripted input: host events scheduled on engine ticks.
//!
//! Scripts are TOML files made of `[[event]]` tables:
//!
//! ```toml
//! [[event]]
//! tick = 0
//! kind = "key"
//! code = 1000
//! pressed = true
//!
//! [[event]]
//! tick = 3
//! kind = "wheel"
//! lines = -2.0
//! ```

use schemars::JsonSchema;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::input::HostEvent;

/// Errors that can occur while loading an input script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read input script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input script {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One host event and the tick before which it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, JsonSchema)]
pub struct ScriptedEvent {
    pub tick: u64,
    #[serde(flatten)]
    pub event: HostEvent,
}

/// A script file: a list of `[[event]]` tables.
#[derive(Debug, Deserialize, JsonSchema)]
struct ScriptFile {
    #[serde(default, rename = "event")]
    events: Vec<ScriptedEvent>,
}

/// Events ordered by tick, consumed front to back as ticks advance.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<ScriptedEvent>,
    next: usize,
}

impl InputScript {
    /// Builds a script, stably sorting events by tick so same-tick events keep
    /// their file order.
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by_key(|e| e.tick);
        Self { events, next: 0 }
    }

    pub fn parse(source: &str, path: &Path) -> Result<Self, ScriptError> {
        let file: ScriptFile = toml::from_str(source).map_err(|source| ScriptError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file.events))
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::parse(&source, path)?;
        log::info!(
            "Loaded {} scripted event(s) from {}",
            script.len(),
            path.display()
        );
        Ok(script)
    }

    /// Returns the events scheduled at or before `tick` that have not been
    /// handed out yet.
    pub fn take_due(&mut self, tick: u64) -> &[ScriptedEvent] {
        let start = self.next;
        while self.next < self.events.len() && self.events[self.next].tick <= tick {
            self.next += 1;
        }
        &self.events[start..self.next]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// JSON schema describing script files.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ScriptFile)
    }

    /// Events not yet handed out.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }
}
