use crate::backends::BackendKind;
use crate::config::{AttachmentScope, EntitymapConfig};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "entitymap")]
#[command(
    about = "Extract entities, classes, routes and relationships from a TypeScript project",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Project directory to scan
    pub path: PathBuf,

    /// Configuration file (defaults to .entitymap.toml in the project)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use this backend instead of detecting one (typeorm, sequelize, mongoose, prisma)
    #[arg(long, value_parser = BackendKind::from_str)]
    pub backend: Option<BackendKind>,

    /// How members are attached to classes
    #[arg(long, value_enum)]
    pub scope: Option<AttachmentScope>,

    /// Scan files one at a time
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Command-line flags win over file settings.
    pub fn apply_overrides(&self, mut config: EntitymapConfig) -> EntitymapConfig {
        if let Some(scope) = self.scope {
            config.extraction.scope = scope;
        }
        if self.no_parallel {
            config.scan.parallel = false;
        }
        config
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
