pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use typerush::{
    config::{ConfigStore, FileConfigStore},
    corpus::Corpus,
    runtime::{AppEvent, CrosstermEventSource, Runner},
    session::{Session, Status},
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// terminal typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing speed test: type a random passage against a countdown and get live wpm, accuracy, and progress readouts, with a results summary at the end."
)]
pub struct Cli {
    /// number of seconds on the countdown (overrides the config file)
    #[clap(short = 's', long)]
    number_of_secs: Option<u64>,

    /// custom passage to type instead of a random built-in one
    #[clap(short = 'p', long)]
    passage: Option<String>,
}

/// Owns the one live session plus the raw contents of the input field, and
/// routes UI events into session operations.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub input: String,
    corpus: Corpus,
    custom_passage: Option<String>,
}

impl App {
    pub fn new(cli: &Cli, duration_secs: u64) -> Self {
        let corpus = Corpus::built_in();
        let text = match &cli.passage {
            Some(passage) => passage.clone(),
            None => corpus.pick(&mut rand::thread_rng()).to_string(),
        };

        Self {
            session: Session::new(text, duration_secs),
            input: String::new(),
            corpus,
            custom_passage: cli.passage.clone(),
        }
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    /// One character from the keyboard. The session's own guard makes this a
    /// no-op outside Running, so stray keys in Idle/Finished change nothing.
    pub fn type_char(&mut self, c: char) {
        if self.session.status() != Status::Running {
            return;
        }
        self.input.push(c);
        self.session.on_input(&self.input);
    }

    pub fn backspace(&mut self) {
        if self.session.status() != Status::Running {
            return;
        }
        self.input.pop();
        self.session.on_input(&self.input);
    }

    /// Back to a fresh Idle state with a newly chosen passage. Valid from any
    /// state and the only way out of Finished.
    pub fn reset(&mut self) {
        self.input.clear();
        let text = match &self.custom_passage {
            Some(passage) => passage.clone(),
            None => self.corpus.pick(&mut rand::thread_rng()).to_string(),
        };
        self.session.reset(text);
    }

    /// Dismiss the results screen and start over.
    pub fn close_results(&mut self) {
        self.reset();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load();
    let duration_secs = cli.number_of_secs.unwrap_or(config.duration_secs);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli, duration_secs);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(TICK_INTERVAL));

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let Some(event) = runner.step() else {
            break;
        };

        match event {
            AppEvent::Tick => {
                app.session.tick();
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.reset();
                }
                KeyCode::Enter => {
                    if app.session.status() == Status::Idle {
                        app.start();
                    }
                }
                KeyCode::Backspace => {
                    app.backspace();
                }
                KeyCode::Char(c) => match app.session.status() {
                    Status::Running => app.type_char(c),
                    Status::Finished => {
                        if c == 'r' {
                            app.close_results();
                        }
                    }
                    Status::Idle => {}
                },
                _ => {}
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cli(passage: &str) -> Cli {
        Cli {
            number_of_secs: None,
            passage: Some(passage.to_string()),
        }
    }

    #[test]
    fn cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn app_uses_custom_passage() {
        let app = App::new(&test_cli("hello there"), 60);
        assert_eq!(app.session.reference_text(), "hello there");
    }

    #[test]
    fn typing_before_start_is_ignored() {
        let mut app = App::new(&test_cli("cat"), 60);

        app.type_char('c');

        assert!(app.input.is_empty());
        assert_eq!(app.session.typed_len(), 0);
    }

    #[test]
    fn typing_flows_into_the_session() {
        let mut app = App::new(&test_cli("cat"), 60);
        app.start();

        app.type_char('c');
        app.type_char('b');

        assert_eq!(app.input, "cb");
        assert_eq!(app.session.typed_len(), 2);
        assert_eq!(app.session.error_count(), 1);

        app.backspace();
        assert_eq!(app.input, "c");
        assert_eq!(app.session.error_count(), 0);
    }

    #[test]
    fn reset_clears_input_and_returns_to_idle() {
        let mut app = App::new(&test_cli("cat"), 60);
        app.start();
        app.type_char('c');

        app.reset();

        assert!(app.input.is_empty());
        assert_eq!(app.session.status(), Status::Idle);
        assert_eq!(app.session.remaining_secs(), 60);
    }

    #[test]
    fn close_results_leaves_finished() {
        let mut app = App::new(&test_cli("hi"), 60);
        app.start();
        app.type_char('h');
        app.type_char('i');
        assert_eq!(app.session.status(), Status::Finished);

        // finished sessions ignore further typing until reset
        app.type_char('x');
        assert_eq!(app.session.typed_len(), 2);

        app.close_results();
        assert_eq!(app.session.status(), Status::Idle);
        assert_eq!(app.session.typed_len(), 0);
    }
}
