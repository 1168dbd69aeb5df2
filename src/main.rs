use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use recall::{
    app::App,
    app_dirs::AppDirs,
    channel::duplex,
    config::{Config, ConfigStore, FileConfigStore},
    coordinator::{self, Coordinator},
    logging,
    pattern::{PatternConfig, RandomPatterns},
    runtime::{Runner, TerminalEvents},
    QuizError,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// terminal pattern memory trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Memorise a short random pattern, type it back, and get a per-round breakdown with an overall score."
)]
pub struct Cli {
    /// number of rounds per session
    #[clap(short = 'r', long)]
    rounds: Option<usize>,

    /// number of characters in each pattern
    #[clap(short = 'l', long)]
    length: Option<usize>,

    /// characters patterns are drawn from
    #[clap(short = 'p', long)]
    pool: Option<String>,

    /// hide the pattern after this many seconds
    #[clap(short = 'd', long)]
    display_secs: Option<f64>,

    /// prefill the name on the entry form
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// config file to load instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// where to write logs (filter with RECALL_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Layer command line overrides over a loaded config
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(rounds) = self.rounds {
            cfg.num_rounds = rounds;
        }
        if let Some(length) = self.length {
            cfg.pattern_length = length;
        }
        if let Some(pool) = &self.pool {
            cfg.pattern_pool = pool.clone();
        }
        if self.display_secs.is_some() {
            cfg.display_secs = self.display_secs;
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(e) = logging::init(&path) {
            eprintln!("logging disabled: {e}");
        }
    }

    let store = cli.config_store();
    let config = cli.apply_to(store.load());
    if let Err(e) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e).exit();
    }
    if cli.save_config {
        store.save(&config)?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    tracing::info!(?config, "starting");

    let (front, back) = duplex();
    let patterns = RandomPatterns::new(PatternConfig::try_from(&config)?);
    let coordinator = coordinator::spawn(Coordinator::new(config.num_rounds, patterns), back)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(front, config.display_secs, cli.name.clone());
    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    // release our endpoint so a coordinator still blocked in recv can finish
    drop(app);
    let joined = coordinator
        .join()
        .map_err(|_| "coordinator thread panicked")?;

    match joined {
        Err(e) if e != QuizError::Disconnected => Err(e.into()),
        _ => outcome,
    }
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(TerminalEvents::spawn()?);

    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit {
        runner.drive(app)?;
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
