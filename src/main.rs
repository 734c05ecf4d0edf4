use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use klokka::{
    app::{App, AppOptions, Control},
    app_dirs::AppDirs,
    clock::ClockTime,
    config::{FileSettingsStore, SettingsStore},
    history::HistoryDb,
    phrase::phrase_for,
    runtime::{CrosstermEventSource, GameEvent, Runner, TICK_RATE},
    session::GameSession,
    time_source::RandomTimeSource,
    ui::screen::current_screen,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// learn to read the clock in norwegian, one word at a time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal trainer for telling the time in Norwegian. A random clock time is shown and the phrase is built word by word from a word bank, with a streak counter and a persistent record."
)]
pub struct Cli {
    /// print the norwegian phrase for one time (H:MM) and exit
    #[clap(long, value_name = "H:MM", value_parser = parse_time)]
    say: Option<ClockTime>,

    /// print every valid time with its phrase and exit
    #[clap(long)]
    table: bool,

    /// show the expected phrase while playing
    #[clap(long)]
    show_answer: bool,

    /// start with the clock-face hint visible
    #[clap(long)]
    hints: bool,

    /// do not record attempts in the practice history
    #[clap(long)]
    no_history: bool,

    /// settings file to use instead of the platform default
    #[clap(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// reset the stored record to 0 before starting
    #[clap(long)]
    reset_record: bool,

    /// delete the recorded practice history before starting
    #[clap(long)]
    reset_history: bool,
}

fn parse_time(s: &str) -> Result<ClockTime, String> {
    s.parse::<ClockTime>().map_err(|e| e.to_string())
}

impl Cli {
    fn settings_store(&self) -> FileSettingsStore {
        match &self.settings {
            Some(path) => FileSettingsStore::with_path(path),
            None => FileSettingsStore::new(),
        }
    }

    fn app_options(&self) -> AppOptions {
        AppOptions {
            show_hints: self.hints,
            show_answer: self.show_answer,
        }
    }
}

/// Log to a file in the state dir; the alternate screen owns stdout
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_env("KLOKKA_LOG").unwrap_or_else(|_| EnvFilter::new("klokka=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}

fn print_table() -> klokka::Result<()> {
    for time in ClockTime::all() {
        println!("{}  {}", time, phrase_for(time)?);
    }
    Ok(())
}

/// Open the practice history, clearing it first on `--reset-history`.
/// Play goes on without history when it is disabled or cannot be opened.
fn open_history(cli: &Cli, path: &Path) -> Result<Option<HistoryDb>, Box<dyn Error>> {
    if cli.no_history && !cli.reset_history {
        return Ok(None);
    }
    let db = match HistoryDb::open(path) {
        Ok(db) => db,
        Err(e) if !cli.reset_history => {
            warn!(path = %path.display(), error = %e, "history disabled");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    if cli.reset_history {
        db.clear_all()?;
        info!(path = %path.display(), "history reset");
    }
    Ok((!cli.no_history).then_some(db))
}

fn build_app(cli: &Cli) -> Result<App, Box<dyn Error>> {
    let store = cli.settings_store();
    if cli.reset_record {
        let mut settings = store.load();
        settings.best_streak = 0;
        store.save(&settings)?;
        info!(path = %store.path().display(), "record reset");
    }
    let session = GameSession::with_store(Box::new(RandomTimeSource), Box::new(store));

    let history = match AppDirs::history_db_path() {
        Some(path) => open_history(cli, &path)?,
        None => None,
    };

    Ok(App::new(session, history, cli.app_options())?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(time) = cli.say {
        println!("{}", phrase_for(time)?);
        return Ok(());
    }
    if cli.table {
        print_table()?;
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();
    let mut app = build_app(&cli)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), TICK_RATE);
    terminal.draw(|f| current_screen(app.view).render(app, f))?;

    loop {
        let redraw = match runner.step() {
            GameEvent::Tick(now) => app.on_tick(now),
            GameEvent::Resize => true,
            GameEvent::Key(key) => match app.on_key(key)? {
                Control::Quit => break,
                Control::Continue => true,
            },
        };
        if redraw {
            terminal.draw(|f| current_screen(app.view).render(app, f))?;
        }
    }

    info!(streak = app.session.score().streak, "quit");
    Ok(())
}
