//! Dashboard view: sliders, prediction summary and histogram on one screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{DashboardSession, DashboardView};
use crate::domain::ScoreLink;
use crate::tui::styles::Theme;

use super::histogram::render_histogram;
use super::sliders::{render_sliders, SliderPanelState};
use super::summary::render_summary;

/// Borrowed state for one dashboard frame.
pub struct DashboardState<'a> {
    pub session: &'a DashboardSession,
    pub sliders: &'a SliderPanelState,
    pub view: Option<&'a DashboardView>,
    pub error: Option<&'a str>,
    pub link: ScoreLink,
    pub reference_rows: usize,
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_header(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let model = match state.link {
        ScoreLink::Identity => "linear model (OLS)",
        ScoreLink::Logistic => "logistic model (0-100)",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Vitalscore", Theme::title()),
        Span::styled(" │ ", Theme::text_muted()),
        Span::styled("Lifestyle Health Score", Theme::text_secondary()),
        Span::styled(" │ ", Theme::text_muted()),
        Span::styled(
            format!("{model}, {} reference rows", state.reference_rows),
            Theme::text_muted(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Sliders
            Constraint::Percentage(55), // Results
        ])
        .split(area);

    render_sliders(f, columns[0], state.sliders, state.session);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Summary
            Constraint::Min(0),    // Histogram
        ])
        .split(columns[1]);

    render_summary(f, right[0], state.view, state.error);

    match state.view {
        Some(view) => render_histogram(f, right[1], &view.histogram),
        None => {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No histogram available",
                Theme::text_muted(),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            );
            f.render_widget(empty, right[1]);
        }
    }
}

fn render_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", Theme::key_hint()),
        Span::styled("Select ", Theme::key_desc()),
        Span::styled("[←→] ", Theme::key_hint()),
        Span::styled("Adjust ", Theme::key_desc()),
        Span::styled("[PgUp/PgDn] ", Theme::key_hint()),
        Span::styled("×10 ", Theme::key_desc()),
        Span::styled("[Home/End] ", Theme::key_hint()),
        Span::styled("Min/Max ", Theme::key_desc()),
        Span::styled("[R] ", Theme::key_hint()),
        Span::styled("Reset ", Theme::key_desc()),
        Span::styled("[Q] ", Theme::key_hint()),
        Span::styled("Quit", Theme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
