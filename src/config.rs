use argh::FromArgs;
use std::path::PathBuf;

/// File read when no path is given on the command line.
pub const DEFAULT_COMMANDS_FILE: &str = "commands.txt";

#[derive(FromArgs, Debug, PartialEq)]
/// Execute ADD, REM and PRINT commands against an in-memory transport container.
pub struct Config {
    #[argh(positional, default = "PathBuf::from(DEFAULT_COMMANDS_FILE)")]
    /// commands file, one command per line.
    pub path: PathBuf,

    #[argh(switch)]
    /// report unknown commands, types and operators and unbuildable transports as errors.
    pub strict: bool,

    #[argh(switch, short = 'i')]
    /// read commands from an interactive prompt instead of a file.
    pub interactive: bool,

    #[argh(switch, short = 'v')]
    /// enable debug logging.
    pub verbose: bool,
}

impl Config {
    /// Parse the process arguments, exiting with usage on error or `--help`.
    pub fn from_env() -> Self {
        argh::from_env()
    }
}
