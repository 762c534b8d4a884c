//! Start-up argument vector handed to the engine at creation.

use std::path::PathBuf;

/// Program name placed in `argv[0]`.
pub const PROGRAM_NAME: &str = "rustydoom";

/// Engine start-up options, rendered into a classic single-dash argv by
/// [`EngineArgs::to_argv`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineArgs {
    /// Main game data file; an empty path is treated as absent.
    pub iwad: Option<PathBuf>,
    /// Additional data files loaded after the IWAD.
    pub files: Vec<PathBuf>,
    /// Episode/map (or map only) to start on.
    pub warp: Vec<u8>,
    pub skill: Option<u8>,
    pub deathmatch: bool,
    pub respawn: bool,
    pub fast: bool,
    pub nomonsters: bool,
    pub record: Option<String>,
    pub playdemo: Option<String>,
    pub timedemo: Option<String>,
}

impl EngineArgs {
    /// Arguments carrying only a resource path, if any.
    pub fn with_iwad(iwad: Option<PathBuf>) -> Self {
        Self {
            iwad,
            ..Self::default()
        }
    }

    /// The resource path, ignoring an empty one.
    pub fn resource_path(&self) -> Option<&PathBuf> {
        self.iwad.as_ref().filter(|p| !p.as_os_str().is_empty())
    }

    /// Renders the options as the argv the engine's own parser expects.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = vec![PROGRAM_NAME.to_string()];

        if let Some(iwad) = self.resource_path() {
            argv.push("-iwad".into());
            argv.push(iwad.display().to_string());
        }
        if !self.files.is_empty() {
            argv.push("-file".into());
            argv.extend(self.files.iter().map(|f| f.display().to_string()));
        }
        if !self.warp.is_empty() {
            argv.push("-warp".into());
            argv.extend(self.warp.iter().map(u8::to_string));
        }
        if let Some(skill) = self.skill {
            argv.push("-skill".into());
            argv.push(skill.to_string());
        }

        for (enabled, flag) in [
            (self.deathmatch, "-deathmatch"),
            (self.respawn, "-respawn"),
            (self.fast, "-fast"),
            (self.nomonsters, "-nomonsters"),
        ] {
            if enabled {
                argv.push(flag.into());
            }
        }

        for (value, flag) in [
            (&self.record, "-record"),
            (&self.playdemo, "-playdemo"),
            (&self.timedemo, "-timedemo"),
        ] {
            if let Some(value) = value {
                argv.push(flag.into());
                argv.push(value.clone());
            }
        }

        argv
    }
}
