//! Slider panel: the seven lifestyle inputs plus the bin-count control.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::DashboardSession;
use crate::domain::histogram::{MAX_BINS, MIN_BINS};
use crate::domain::{SliderSpec, SLIDERS};
use crate::tui::styles::Theme;

const LABEL_WIDTH: usize = 19;
const VALUE_WIDTH: usize = 7;
const MIN_TRACK_WIDTH: usize = 5;

/// Which control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Index into `SLIDERS`
    Slider(usize),
    /// Histogram bin count
    Bins,
}

/// Slider panel state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliderPanelState {
    selected: usize,
}

impl SliderPanelState {
    const CONTROLS: usize = SLIDERS.len() + 1;

    /// Move to the next control
    pub fn next_control(&mut self) {
        self.selected = (self.selected + 1) % Self::CONTROLS;
    }

    /// Move to the previous control
    pub fn prev_control(&mut self) {
        if self.selected == 0 {
            self.selected = Self::CONTROLS - 1;
        } else {
            self.selected -= 1;
        }
    }

    #[must_use]
    pub fn selected(&self) -> Control {
        if self.selected < SLIDERS.len() {
            Control::Slider(self.selected)
        } else {
            Control::Bins
        }
    }
}

/// Render the slider panel
pub fn render_sliders(
    f: &mut Frame,
    area: Rect,
    state: &SliderPanelState,
    session: &DashboardSession,
) {
    let block = Block::default()
        .title(Span::styled(" Lifestyle ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let track_width = (inner.width as usize)
        .saturating_sub(2 + LABEL_WIDTH + VALUE_WIDTH + 1)
        .max(MIN_TRACK_WIDTH);

    let mut lines: Vec<Line> = SLIDERS
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let value = session.input.get(spec.feature);
            control_line(
                spec.label,
                spec.ratio(value),
                spec.format(value),
                state.selected() == Control::Slider(i),
                track_width,
            )
        })
        .collect();

    let bins = session.bins();
    lines.push(Line::from(""));
    lines.push(control_line(
        "Histogram bins",
        (bins - MIN_BINS) as f64 / (MAX_BINS - MIN_BINS) as f64,
        bins.to_string(),
        state.selected() == Control::Bins,
        track_width,
    ));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(lines.len() as u16 + 1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    f.render_widget(Paragraph::new(lines), chunks[0]);

    let prompt = match state.selected() {
        Control::Slider(i) => prompt_lines(&SLIDERS[i]),
        Control::Bins => vec![
            Line::from(Span::styled(
                "How many bins should the histogram use?",
                Theme::text_secondary(),
            )),
            Line::from(Span::styled(
                format!("range {MIN_BINS}-{MAX_BINS}"),
                Theme::text_muted(),
            )),
        ],
    };
    f.render_widget(Paragraph::new(prompt).wrap(Wrap { trim: true }), chunks[1]);
}

fn prompt_lines(spec: &SliderSpec) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(spec.prompt, Theme::text_secondary())),
        Line::from(Span::styled(
            format!(
                "range {}-{}, default {}",
                spec.format(spec.min),
                spec.format(spec.max),
                spec.format(spec.default)
            ),
            Theme::text_muted(),
        )),
    ]
}

fn control_line(
    label: &str,
    ratio: f64,
    value: String,
    focused: bool,
    width: usize,
) -> Line<'static> {
    let (filled, empty) = track(ratio, width);
    let (cursor, label_style) = if focused {
        ("▸ ", Theme::focused())
    } else {
        ("  ", Theme::text_secondary())
    };

    Line::from(vec![
        Span::styled(cursor, Theme::focused()),
        Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
        Span::styled(filled, Theme::track_filled(focused)),
        Span::styled(empty, Theme::track_empty()),
        Span::styled(format!(" {value:>VALUE_WIDTH$}"), Theme::text()),
    ])
}

/// Split a track of `width` cells into filled and empty parts.
fn track(ratio: f64, width: usize) -> (String, String) {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    ("█".repeat(filled), "░".repeat(width - filled))
}
