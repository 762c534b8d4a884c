//! Command-line interface.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::engine::EngineArgs;

#[derive(Parser, Debug)]
#[command(name = "rustydoom")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("RUSTYDOOM_BUILD_INFO"), ")"),
    about = "Headless host for a tick-driven game engine"
)]
pub struct Cli {
    /// Main game data file (IWAD)
    #[arg(long, value_name = "PATH")]
    pub iwad: Option<PathBuf>,

    /// IWAD given as a bare positional argument
    #[arg(value_name = "IWAD")]
    pub positional_iwad: Option<PathBuf>,

    /// Additional data files
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub file: Vec<PathBuf>,

    /// Episode and map (or map only) to start on
    #[arg(long, num_args = 1..=2)]
    pub warp: Vec<u8>,

    /// Skill level (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub skill: Option<u8>,

    #[arg(long, action = ArgAction::SetTrue)]
    pub deathmatch: bool,

    #[arg(long, action = ArgAction::SetTrue)]
    pub respawn: bool,

    #[arg(long, action = ArgAction::SetTrue)]
    pub fast: bool,

    #[arg(long, action = ArgAction::SetTrue)]
    pub nomonsters: bool,

    /// Record a demo under this name
    #[arg(long, value_name = "NAME")]
    pub record: Option<String>,

    /// Play back a recorded demo
    #[arg(long, value_name = "NAME")]
    pub playdemo: Option<String>,

    /// Play back a demo as fast as possible
    #[arg(long, value_name = "NAME")]
    pub timedemo: Option<String>,

    /// Number of ticks to run (0 runs until interrupted)
    #[arg(long, default_value_t = 0)]
    pub ticks: u64,

    /// TOML file of scripted input events
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Write the final frame as a PPM image
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Snapshot width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Snapshot height in pixels
    #[arg(long, default_value_t = 400)]
    pub height: u32,

    /// Configuration file (defaults to ~/.config/rustydoom/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a default configuration file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub init_config: bool,
}

impl Cli {
    /// Engine start-up arguments, falling back to `default_iwad` when no
    /// IWAD was given either by flag or positionally.
    pub fn engine_args(&self, default_iwad: Option<PathBuf>) -> EngineArgs {
        EngineArgs {
            iwad: self
                .iwad
                .clone()
                .or_else(|| self.positional_iwad.clone())
                .or(default_iwad),
            files: self.file.clone(),
            warp: self.warp.clone(),
            skill: self.skill,
            deathmatch: self.deathmatch,
            respawn: self.respawn,
            fast: self.fast,
            nomonsters: self.nomonsters,
            record: self.record.clone(),
            playdemo: self.playdemo.clone(),
            timedemo: self.timedemo.clone(),
        }
    }
}

/// Accepts classic single-dash long flags such as `-iwad` or `-file` by
/// rewriting them to `--iwad`/`--file`. Short flags, `-` and `--` are left
/// alone, as are negative numbers.
pub fn normalize_doom_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter()
        .map(|arg| {
            let arg: String = arg.into();
            let bytes = arg.as_bytes();
            if bytes.len() > 2
                && bytes[0] == b'-'
                && bytes[1] != b'-'
                && bytes[1].is_ascii_alphabetic()
            {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_doom_args(args.iter().copied())).unwrap()
    }

    #[test]
    fn single_dash_long_flags_are_rewritten() {
        assert_eq!(
            normalize_doom_args(["rustydoom", "-iwad", "doom1.wad", "-h", "--", "-", "-5"]),
            vec!["rustydoom", "--iwad", "doom1.wad", "-h", "--", "-", "-5"]
        );
    }

    #[test]
    fn classic_command_line_parses() {
        let cli = parse(&[
            "rustydoom", "-iwad", "doom1.wad", "-warp", "1", "3", "-skill", "4", "-fast",
        ]);
        let args = cli.engine_args(None);
        assert_eq!(args.iwad, Some(PathBuf::from("doom1.wad")));
        assert_eq!(args.warp, vec![1, 3]);
        assert_eq!(args.skill, Some(4));
        assert!(args.fast);
        assert!(!args.nomonsters);
    }

    #[test]
    fn positional_iwad_and_config_fallback() {
        let cli = parse(&["rustydoom", "freedoom2.wad"]);
        assert_eq!(
            cli.engine_args(Some("config.wad".into())).iwad,
            Some(PathBuf::from("freedoom2.wad"))
        );

        let cli = parse(&["rustydoom"]);
        assert_eq!(
            cli.engine_args(Some("config.wad".into())).iwad,
            Some(PathBuf::from("config.wad"))
        );
        assert_eq!(cli.ticks, 0);
        assert_eq!((cli.width, cli.height), (640, 400));
    }

    #[test]
    fn skill_out_of_range_is_rejected() {
        let result = Cli::try_parse_from(["rustydoom", "--skill", "9"]);
        assert!(result.is_err());
    }
}
