mod app;
mod calendar;
mod datekey;
mod display;
mod locale;
mod menu;
mod picker;
mod season;
mod store;
mod theme;
use crate::app::App;
use crate::display::DisplayController;
use crate::locale::Locale;
use crate::store::{CalendarData, DataLoad};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};

const DEFAULT_DATA_FILE: &str = "data.json";

const DATA_ENV_VAR: &str = "SYNAXIS_DATA";

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        data: Option<PathBuf>,
        locale: Locale,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut data = None;
        let mut locale = Locale::default();
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('d') | Arg::Long("data") => {
                    data = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("locale") => {
                    locale = parser.value()?.parse()?;
                }
                Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match datekey::from_key(&value) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            data,
            locale,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                data,
                locale,
                log_file,
            } => {
                // The local offset can only be read before any other thread
                // exists.
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _logger = init_logging(log_file)?;
                let path = data_path(data);
                log::info!(
                    "Starting {} {} with locale {locale}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                );
                let display =
                    DisplayController::new(date.unwrap_or(today), CalendarData::empty(), locale);
                let app = App::new(today, display, path.clone()).loading(DataLoad::spawn(path));
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: synaxis [options] [YYYY-MM-DD]");
                println!();
                println!("Terminal liturgical calendar showing fasts, feasts, and saints of the day");
                println!();
                println!("Options:");
                println!("  -d, --data <FILE>     Read annotations from <FILE> [default: ${DATA_ENV_VAR} or {DEFAULT_DATA_FILE}]");
                println!("  -l, --locale <LANG>   Display language: ar or en [default: ar]");
                println!("      --log-file <FILE> Write log messages to <FILE>");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
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

fn data_path(data: Option<PathBuf>) -> PathBuf {
    data.or_else(|| std::env::var_os(DATA_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

// Log messages would corrupt the screen, so they always go to a file.
fn init_logging(log_file: Option<PathBuf>) -> anyhow::Result<LoggerHandle> {
    let spec = match log_file {
        Some(path) => FileSpec::try_from(path).context("invalid log file path")?,
        None => FileSpec::default()
            .directory(std::env::temp_dir())
            .basename(env!("CARGO_PKG_NAME"))
            .suppress_timestamp(),
    };
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(spec)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(std::io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
