//! CLI argument parsing with clap.

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::context::register_flags;

/// Apply rtl-sdr settings given as command-line flags
#[derive(Parser, Debug)]
#[command(name = "rtl-config")]
#[command(version, about = "Apply rtl-sdr settings given as command-line flags", long_about = None)]
#[command(after_help = "EXAMPLES:
    rtl-config --centerfreq 433.92M --samplerate 2.048M
    rtl-config --tunergainmode --tunergain 40.2
    rtl-config --directsampling quadrature --agcmode=false")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Preset file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Do not load any preset file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Preset file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the preset file location and its values
    Show,
    /// Create a commented preset file
    Init,
}

/// The full command: [`Args`] plus every radio flag.
pub fn command() -> clap::Command {
    register_flags(Args::command())
}

/// Parse `itr`, keeping the raw matches so supplied radio flags can be told
/// apart from defaults.
pub fn parse_from<I, T>(itr: I) -> Result<(Args, ArgMatches), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(itr)?;
    let args = Args::from_arg_matches(&matches)?;
    Ok((args, matches))
}
