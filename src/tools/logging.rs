use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// The log level filter matching this verbosity.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Install a terminal logger on stdout at the requested verbosity. The codec itself only
/// emits through the `log` facade, so callers that already have a logger skip this.
/// Fails if a logger has already been installed in this process.
pub fn init_logger(verbose: Verbosity) -> Result<(), SetLoggerError> {
    TermLogger::init(
        verbose.level_filter(),
        Config::default(),
        TerminalMode::Stdout,
        ColorChoice::Auto,
    )
}
