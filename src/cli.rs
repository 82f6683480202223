use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::events::{Category, Source};

#[derive(Parser, Debug)]
#[command(name = "agent-chorus", version, about = "Sound-pack reactions for agentic CLI workflows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle a single host event
    Handle(HandleArgs),
    /// Handle newline-delimited host events from stdin until EOF
    Listen(ListenArgs),
    /// Mute sounds and notifications
    Pause,
    /// Unmute sounds and notifications
    Resume,
    /// Flip the pause flag
    Toggle,
    Status(StatusArgs),
    /// Play one sound of a category from the session's pack
    Preview(PreviewArgs),
    Packs(PacksArgs),
    Config(ConfigArgs),
    SystemInfo(SystemInfoArgs),
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[arg(long, value_enum, help = "Source CLI")]
    pub source: Source,

    #[arg(long, help = "Session id (defaults to the host's hint or a generated id)")]
    pub session: Option<String>,

    #[arg(long, value_name = "DIR", help = "Working directory hint for the project name")]
    pub directory: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct HandleArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    #[arg(value_name = "JSON", help = "Event payload JSON (read from stdin when omitted)")]
    pub payload: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[arg(value_enum, help = "Category to preview")]
    pub category: Category,

    #[arg(long, help = "Session id used for pack rotation")]
    pub session: Option<String>,
}

#[derive(Args, Debug)]
pub struct PacksArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Show current config as JSON")]
    pub show: bool,

    #[arg(long, help = "Create default config file")]
    pub init: bool,

    #[arg(long, help = "Validate configuration")]
    pub validate: bool,
}

#[derive(Args, Debug)]
pub struct SystemInfoArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}
