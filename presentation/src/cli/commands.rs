//! CLI command definitions

use clap::{Parser, ValueEnum};
use deskchat_domain::Channel;
use std::path::PathBuf;

/// Channel flavor of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelArg {
    /// Web widget: multi-line messages, sent/delivered ticks
    Web,
    /// Simulated WhatsApp: single-line messages, read receipts
    #[value(alias = "wa")]
    Whatsapp,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Web => Channel::Web,
            ChannelArg::Whatsapp => Channel::WhatsApp,
        }
    }
}

/// CLI arguments for deskchat
#[derive(Parser, Debug)]
#[command(name = "deskchat")]
#[command(author, version, about = "Terminal front end for the student-services chat assistant")]
#[command(long_about = r#"
deskchat opens a chat session with the student-services assistant.

Anonymous visitors can ask general questions right away. Students can log in
with a password (/login) or a one-time code sent to their phone (/otp) to ask
about fees, schedules and their profile.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./deskchat.toml     Project-level config
3. ~/.config/deskchat/config.toml   Global config
DESKCHAT_* environment variables override all files.

Example:
  deskchat
  deskchat --channel whatsapp
  deskchat --backend https://chat.example.org -v
"#)]
pub struct Cli {
    /// Channel to simulate (overrides [widget] channel)
    #[arg(long, value_enum)]
    pub channel: Option<ChannelArg>,

    /// Backend base URL (overrides [backend] base_url)
    #[arg(long, value_name = "URL")]
    pub backend: Option<String>,

    /// Append a JSONL transcript to this file (overrides [logging] transcript)
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hide the typing indicator
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
