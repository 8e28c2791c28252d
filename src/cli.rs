use anyhow::Context;
use clap::{Arg, ArgAction, Command};

use crate::internal::config::{get_version_info, LoggingConfig};
use crate::internal::logger::Logger;
use crate::internal::severity::Severity;

/// Severities accepted as the record level on the command line.
const EMIT_LEVELS: [&str; 6] = ["debug", "info", "warn", "error", "fatal", "panic"];

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub severity: Severity,
    pub message: String,
    pub name: String,
    pub children: Vec<String>,
    pub caller: Option<String>,
    pub level: Option<Severity>,
    pub no_color: bool,
    pub config: Option<String>,
}

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str = Box::leak(get_version_info().into_boxed_str());

    Command::new("minori")
        .version(version)
        .about("Write one message through a minori logger")
        .arg(
            Arg::new("severity")
                .required(true)
                .value_parser(EMIT_LEVELS)
                .help("Record severity (debug|info|warn|error|fatal|panic)"),
        )
        .arg(
            Arg::new("message")
                .required(true)
                .num_args(1..)
                .help("Message words; a literal \\n starts a new record line"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .default_value("minori")
                .help("Root logger name"),
        )
        .arg(
            Arg::new("child")
                .long("child")
                .action(ArgAction::Append)
                .help("Child segment appended to the logger name, repeatable"),
        )
        .arg(
            Arg::new("caller")
                .long("caller")
                .help("Caller tag; enables the caller column"),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_parser(parse_severity)
                .help("Process-wide threshold (off|fatal|panic|error|warn|info|debug or 0-6)"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable ANSI colors"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to config file (default: ./minori.{toml,yaml,json})"),
        )
}

fn parse_severity(value: &str) -> Result<Severity, String> {
    value.parse::<Severity>().map_err(|e| e.to_string())
}

pub fn parse_options(matches: &clap::ArgMatches) -> anyhow::Result<CliOptions> {
    let severity = matches
        .get_one::<String>("severity")
        .context("severity is required")?
        .parse::<Severity>()?;

    let words: Vec<&str> = matches
        .get_many::<String>("message")
        .context("message is required")?
        .map(String::as_str)
        .collect();
    let message = words.join(" ").replace("\\n", "\n");

    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| "minori".to_string());

    let children = matches
        .get_many::<String>("child")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok(CliOptions {
        severity,
        message,
        name,
        children,
        caller: matches.get_one::<String>("caller").cloned(),
        level: matches.get_one::<Severity>("level").copied(),
        no_color: matches.get_flag("no-color"),
        config: matches.get_one::<String>("config").cloned(),
    })
}

/// Resolve the logging config: file/environment first, then CLI overrides.
pub fn resolve_config(options: &CliOptions) -> anyhow::Result<LoggingConfig> {
    let mut config = match &options.config {
        Some(path) => LoggingConfig::load_from(path)
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => LoggingConfig::load().context("Failed to load logging configuration")?,
    };

    if let Some(level) = options.level {
        config.level = level;
    }
    if options.no_color {
        config.color = false;
    }
    if options.caller.is_some() {
        config.include_caller_tag = true;
    }
    Ok(config)
}

/// Build the logger named by the options.
pub fn build_logger(config: &LoggingConfig, options: &CliOptions) -> Logger {
    options
        .children
        .iter()
        .fold(config.root(options.name.as_str()), |logger, segment| {
            logger.child(segment)
        })
}

/// Emit the message. Does not return for `fatal` and `panic`.
pub fn dispatch(logger: &Logger, options: &CliOptions) {
    let caller = options.caller.as_deref();
    let message = options.message.as_str();

    match (options.severity, caller) {
        (Severity::Fatal, Some(tag)) => crate::log_fatal!(logger.caller(tag), "{}", message),
        (Severity::Fatal, None) => crate::log_fatal!(logger, "{}", message),
        (Severity::Panic, Some(tag)) => logger.caller(tag).panic(message),
        (Severity::Panic, None) => logger.panic(message),
        (severity, caller) => {
            logger.emit_tagged(severity, caller, message);
        }
    }
}
