//! Prints JSON schemas for the files rustydoom reads.

use anyhow::Result;
use clap::{Parser, ValueEnum};

use rustydoom::Config;
use rustydoom::session::InputScript;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    /// `config.toml` settings
    Config,
    /// `--script` input files
    Script,
}

#[derive(Parser, Debug)]
#[command(name = "dump_schema", about = "Print JSON schemas for rustydoom files")]
struct Args {
    /// Which file format to describe
    #[arg(value_enum, default_value_t = SchemaKind::Config)]
    kind: SchemaKind,
}

fn main() -> Result<()> {
    let schema = match Args::parse().kind {
        SchemaKind::Config => Config::json_schema(),
        SchemaKind::Script => InputScript::json_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
