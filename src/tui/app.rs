//! Main TUI application state.
//!
//! Handles:
//! - Input event handling
//! - Session state and recompute on every change
//! - Terminal setup and teardown

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
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

use crate::adapters::CsvDataset;
use crate::application::{recompute, DashboardSession, DashboardView, ReferenceContext};
use crate::config::Config;
use crate::domain::histogram::{MAX_BINS, MIN_BINS};
use crate::domain::SLIDERS;

use super::ui::{
    dashboard::{render_dashboard, DashboardState},
    render_disclaimer,
    sliders::{Control, SliderPanelState},
};

/// Large step multiplier for PgUp/PgDn.
const COARSE_STEPS: i32 = 10;

/// Main application state
pub struct App {
    /// Read-only model, bands and reference scores
    context: Arc<ReferenceContext>,

    /// This session's inputs
    session: DashboardSession,

    /// Focused control
    sliders: SliderPanelState,

    /// Output of the last successful recompute
    view: Option<DashboardView>,

    /// Error from the last recompute, if any
    error: Option<String>,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Load the reference dataset and fit the model as configured.
    ///
    /// # Errors
    /// Returns error if the dataset is missing or malformed, or the fit fails.
    pub fn new(config: &Config) -> Result<Self> {
        let source = CsvDataset::new(&config.data_path);
        let context = ReferenceContext::load(&source, config.score_link).map_err(|e| {
            anyhow!(
                "Failed to prepare reference data from {:?}: {}. Set VITALSCORE_DATA_PATH to a CSV with the expected columns.",
                config.data_path,
                e
            )
        })?;

        Ok(Self::with_context(Arc::new(context)))
    }

    /// Create an application over an already-built context.
    #[must_use]
    pub fn with_context(context: Arc<ReferenceContext>) -> Self {
        let mut app = Self {
            context,
            session: DashboardSession::default(),
            sliders: SliderPanelState::default(),
            view: None,
            error: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let state = DashboardState {
                    session: &self.session,
                    sliders: &self.sliders,
                    view: self.view.as_ref(),
                    error: self.error.as_deref(),
                    link: self.context.service().link(),
                    reference_rows: self.context.scores().len(),
                };
                render_dashboard(f, chunks[0], &state);
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

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => self.sliders.prev_control(),
            KeyCode::Down | KeyCode::Tab => self.sliders.next_control(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageDown => self.adjust(-COARSE_STEPS),
            KeyCode::PageUp => self.adjust(COARSE_STEPS),
            KeyCode::Home => self.jump(false),
            KeyCode::End => self.jump(true),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.reset();
                self.refresh();
            }
            _ => {}
        }
    }

    /// Move the focused control by `steps`.
    fn adjust(&mut self, steps: i32) {
        match self.sliders.selected() {
            Control::Slider(i) => self.session.step_feature(SLIDERS[i].feature, steps),
            Control::Bins => {
                let bins = self.session.bins() as i64 + i64::from(steps);
                self.session.set_bins(bins.max(0) as usize);
            }
        }
        self.refresh();
    }

    /// Jump the focused control to its min or max.
    fn jump(&mut self, to_max: bool) {
        match self.sliders.selected() {
            Control::Slider(i) => {
                let spec = &SLIDERS[i];
                let value = if to_max { spec.max } else { spec.min };
                self.session.set_feature(spec.feature, value);
            }
            Control::Bins => {
                self.session
                    .set_bins(if to_max { MAX_BINS } else { MIN_BINS });
            }
        }
        self.refresh();
    }

    /// Recompute the view from the current session state.
    fn refresh(&mut self) {
        match recompute(&*self.context, &self.session) {
            Ok(view) => {
                self.view = Some(view);
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to recompute dashboard: {}", e);
                self.view = None;
                self.error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LinearModel;
    use crate::application::PredictionService;
    use crate::domain::{
        LifestyleInput, ReferenceDataset, ReferenceRecord, ScoreBand, ScoreLink, FEATURE_COUNT,
    };

    fn test_app() -> App {
        let rows = [
            ([2.0, 30.0, 1.0, 8.0, 10.0, 5.0, 1.0], 30.0, "Poor"),
            ([5.0, 30.0, 1.0, 5.0, 10.0, 5.0, 1.0], 50.0, "Average"),
            ([8.0, 30.0, 1.0, 6.0, 10.0, 5.0, 1.0], 70.0, "Good"),
        ];
        let dataset = ReferenceDataset::new(
            rows.iter()
                .map(|(values, score, status)| ReferenceRecord {
                    input: LifestyleInput::from_vec(values).expect("Should build input"),
                    score: *score,
                    status: status.to_string(),
                })
                .collect(),
        );
        let context = ReferenceContext::from_dataset(&dataset, ScoreLink::Identity)
            .expect("Should build context");
        App::with_context(Arc::new(context))
    }

    #[test]
    fn test_initial_view_is_computed() {
        let app = test_app();
        assert!(app.view.is_some());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_failed_recompute_shows_error() {
        let model =
            LinearModel::from_parameters(f64::NAN, vec![0.0; FEATURE_COUNT], ScoreLink::Identity);
        let service = PredictionService::new(
            Arc::new(model),
            vec![ScoreBand::new("Average", 0.0, 100.0)],
        );
        let mut app = App::with_context(Arc::new(ReferenceContext::new(
            service,
            vec![30.0, 50.0, 70.0],
        )));

        assert!(app.view.is_none());
        assert!(app.error.is_some());

        // Still failing after an input change, and the app keeps running.
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert!(app.view.is_none());
        assert!(app.error.is_some());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_arrow_keys_adjust_and_recompute() {
        let mut app = test_app();
        let before = app.view.as_ref().expect("Should have view").prediction.score;

        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.session.input.sleep_hours, 6.0);
        let after = app.view.as_ref().expect("Should have view").prediction.score;
        assert!(after > before);

        app.handle_key(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(app.session.input.sleep_hours, 10.0);
    }

    #[test]
    fn test_bins_control() {
        let mut app = test_app();
        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.sliders.selected(), Control::Bins);

        app.handle_key(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(app.session.bins(), 30);
        assert_eq!(app.view.as_ref().expect("Should have view").histogram.bins(), 30);

        app.handle_key(KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(app.session.bins(), MIN_BINS);
        app.handle_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(app.session.bins(), MIN_BINS);
    }

    #[test]
    fn test_reset_and_quit() {
        let mut app = test_app();
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(app.session.input.mindfulness_minutes, 20.0);

        app.handle_key(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.session, DashboardSession::default());

        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
