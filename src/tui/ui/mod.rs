//! UI module: View components for the TUI.

pub mod dashboard;
pub mod histogram;
pub mod sliders;
pub mod summary;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Scores are indicative estimates from a reference population and do not replace professional medical advice.",
            Theme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Scores between or across overlapping bands are reported as Unknown.",
            Theme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
