//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Non-blocking submission via background worker

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::HttpPredictor;
use crate::application::{AssessmentService, FormSession};
use crate::config::Settings;
use crate::ports::{PredictionError, Predictor};

use super::ui::{
    form::{render_form, FormState},
    render_disclaimer,
    result::render_result,
};
use super::worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

/// Main application state
pub struct App<P: Predictor + 'static> {
    screen: Screen,

    should_quit: bool,

    service: Arc<AssessmentService<P>>,

    form_state: FormState,

    /// In-flight flag and last outcome
    session: FormSession,

    /// Pending worker (if a request is outstanding)
    pending_worker: Option<AssessmentWorkerHandle>,

    /// Frame counter for the spinner
    tick: usize,
}

impl App<HttpPredictor> {
    /// Create an application talking to the configured HTTP endpoint.
    ///
    /// # Errors
    /// Returns error if the endpoint is missing or invalid.
    pub fn new(settings: &Settings) -> Result<Self> {
        let endpoint = settings.endpoint()?;
        let predictor = HttpPredictor::new(endpoint, settings.timeout)?;
        tracing::info!(
            endpoint = predictor.endpoint(),
            timeout_secs = settings.timeout.as_secs(),
            "Prediction endpoint configured"
        );

        Ok(Self::with_service(Arc::new(AssessmentService::new(
            Arc::new(predictor),
        ))))
    }
}

impl<P: Predictor + 'static> App<P> {
    /// Create application with an injected service.
    pub fn with_service(service: Arc<AssessmentService<P>>) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            service,
            form_state: FormState::default(),
            session: FormSession::new(),
            pending_worker: None,
            tick: 0,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let result = self.run_in_raw_mode();
        self.finish(result, || {
            let restored = disable_raw_mode();
            let left = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            restored.and(left)
        })
    }

    /// Wipe the form, then restore the terminal. The session result wins
    /// over a teardown error.
    fn finish(
        &mut self,
        result: Result<()>,
        restore: impl FnOnce() -> io::Result<()>,
    ) -> Result<()> {
        // Vitals do not outlive the session.
        self.form_state.reset();
        let restored = restore();
        result?;
        restored?;
        Ok(())
    }

    fn run_in_raw_mode(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        self.main_loop(&mut terminal)
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick = self.tick.wrapping_add(1);

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(f.area());

                match (self.screen, self.session.last_assessment()) {
                    (Screen::Result, Some(assessment)) => render_result(f, chunks[0], assessment),
                    _ => render_form(
                        f,
                        chunks[0],
                        &self.form_state,
                        self.session.is_in_flight(),
                        self.tick / 4,
                    ),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        let Some(worker) = self.pending_worker.as_ref() else {
            return;
        };

        let mut update = worker.try_recv();
        while let Some(AssessmentProgress::Submitting) = update {
            tracing::debug!("Prediction request in flight");
            update = worker.try_recv();
        }

        // A worker that exited without reporting is treated as a failed request.
        if update.is_none() && worker.is_finished() {
            update = worker.try_recv().or_else(|| {
                Some(AssessmentProgress::Failed(
                    PredictionError::Transport("worker exited".to_string()).to_string(),
                ))
            });
        }

        match update {
            Some(AssessmentProgress::Complete(assessment)) => {
                self.pending_worker = None;
                self.session.complete(Ok(assessment));
                self.screen = Screen::Result;
            }
            Some(AssessmentProgress::Failed(message)) => {
                self.pending_worker = None;
                self.form_state.error_message = Some(message.clone());
                self.session.complete(Err(message));
            }
            Some(AssessmentProgress::Submitting) | None => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_option(false);
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                self.form_state.cycle_option(true);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => {
                self.session.dismiss();
                self.screen = Screen::Form;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.session.dismiss();
                self.form_state.reset();
                self.screen = Screen::Form;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let raw = match self.form_state.to_raw_input() {
            Ok(raw) => raw,
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
                return;
            }
        };

        if let Err(e) = self.session.begin_submission() {
            tracing::debug!("Submission ignored: {}", e);
            return;
        }

        self.form_state.error_message = None;
        self.pending_worker = Some(AssessmentWorker::spawn(self.service.clone(), raw));
    }
}
