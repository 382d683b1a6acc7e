mod app;
mod auth;
mod calendar;
mod dropdown;
mod help;
mod hero;
mod locale;
mod pages;
mod search;
mod theme;
use crate::app::App;
use crate::auth::LogAuth;
use crate::hero::{Carousel, DEFAULT_INTERVAL};
use crate::locale::{find_currency, find_language, Currency, Language, LocaleMenus};
use crate::search::{find_region, LogSearch, SearchForm, DEFAULT_REGION};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Startup settings taken from the command line
#[derive(Clone, Debug, Eq, PartialEq)]
struct Config {
    /// Date to treat as today
    date: Option<Date>,
    language: &'static Language,
    currency: &'static Currency,
    region: &'static str,
    slide_interval: Duration,
    log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            date: None,
            language: &locale::LANGUAGES[0],
            currency: &locale::CURRENCIES[0],
            region: DEFAULT_REGION,
            slide_interval: DEFAULT_INTERVAL,
            log_file: None,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
enum ConfigError {
    #[error("unknown region {0:?}")]
    UnknownRegion(String),
    #[error("invalid slide interval {0:?}: expected a positive number of seconds")]
    InvalidInterval(String),
}

fn parse_interval(s: &str) -> Result<Duration, ConfigError> {
    s.parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .filter(|d| !d.is_zero())
        .ok_or_else(|| ConfigError::InvalidInterval(s.to_owned()))
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Config),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut config = Config::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("language") => {
                    config.language = parser.value()?.parse_with(find_language)?;
                }
                Arg::Long("currency") => {
                    config.currency = parser.value()?.parse_with(find_currency)?;
                }
                Arg::Long("region") => {
                    config.region = parser.value()?.parse_with(|s| {
                        find_region(s).ok_or_else(|| ConfigError::UnknownRegion(s.to_owned()))
                    })?;
                }
                Arg::Long("slide-interval") => {
                    config.slide_interval = parser.value()?.parse_with(parse_interval)?;
                }
                Arg::Long("log-file") => config.log_file = Some(parser.value()?.into()),
                Arg::Value(value) if config.date.is_none() => {
                    config.date = Some(value.parse_with(|s| Date::parse(s, &YMD_FMT))?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(config))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(config) => {
                if let Some(path) = &config.log_file {
                    init_logging(path)?;
                }
                let today = match config.date {
                    Some(date) => date,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                log::info!(
                    "Starting on {today} with language {}, currency {}, region {}",
                    config.language.code,
                    config.currency.code,
                    config.region
                );
                let app = App::new(
                    SearchForm::new(today, Some(config.region)),
                    LocaleMenus::new(config.language, config.currency),
                    Carousel::new(config.slide_interval),
                    LogSearch,
                    LogAuth::default(),
                );
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: guzomate [options] [YYYY-MM-DD]");
                println!();
                println!("Browse and search hotels across Ethiopia");
                println!();
                println!("If a date is given, it is used in place of today's date.");
                println!();
                println!("Options:");
                println!("  --language CODE        Interface language (en, am, ar, fr, es, zh) [default: en]");
                println!("  --currency CODE        Display currency: USD, ETB, GBP, EUR, AED [default: USD]");
                println!("  --region NAME          Initial search region [default: {DEFAULT_REGION}]");
                println!("  --slide-interval SECS  Seconds between carousel slides [default: 3]");
                println!("  --log-file PATH        Write log messages to PATH");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

/// Sends log messages to `path`, filtered by `RUST_LOG` (default: `info`)
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("failed to initialize logging")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("guzomate").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_defaults() {
        let Ok(Command::Run(config)) = parse(&[]) else {
            panic!("expected a Run command");
        };
        assert_eq!(config, Config::default());
        assert_eq!(config.language.code, "en");
        assert_eq!(config.currency.code, "USD");
        assert_eq!(config.slide_interval, Duration::from_secs(3));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&[
            "--language",
            "am",
            "--currency=etb",
            "--region",
            "bahir dar",
            "--slide-interval",
            "1.5",
            "--log-file",
            "guzomate.log",
            "2026-12-24",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(Config {
                date: Some(date!(2026 - 12 - 24)),
                language: &locale::LANGUAGES[1],
                currency: &locale::CURRENCIES[1],
                region: "Bahir Dar",
                slide_interval: Duration::from_millis(1500),
                log_file: Some(PathBuf::from("guzomate.log")),
            })
        );
    }

    #[test]
    fn test_bad_values() {
        let e = parse(&["--language", "xx"]).unwrap_err();
        assert!(e.to_string().contains("unknown language code"), "{e}");
        let e = parse(&["--region", "Atlantis"]).unwrap_err();
        assert!(e.to_string().contains("unknown region"), "{e}");
        for bad in ["0", "-2", "soon"] {
            let e = parse(&["--slide-interval", bad]).unwrap_err();
            assert!(e.to_string().contains("invalid slide interval"), "{e}");
        }
        assert!(parse(&["2026-02-30"]).is_err());
        assert!(parse(&["2026-10-16", "2026-10-17"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version", "--bogus"]).unwrap(), Command::Version);
    }
}
