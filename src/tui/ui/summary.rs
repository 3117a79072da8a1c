//! Summary panel: echoed inputs, predicted score and category.

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::DashboardView;
use crate::tui::styles::Theme;

/// Render the prediction summary
pub fn render_summary(f: &mut Frame, area: Rect, view: Option<&DashboardView>, error: Option<&str>) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let lines = match (view, error) {
        (_, Some(message)) => vec![
            Line::from(Span::styled("! Cannot compute score", Theme::danger())),
            Line::from(Span::styled(message.to_string(), Theme::text())),
        ],
        (Some(view), None) => {
            let category_style = Theme::category(&view.prediction.category);
            let mut text = view.summary.lines();
            let inputs = text.next().unwrap_or_default().to_string();
            let score = text.next().unwrap_or_default().to_string();
            let category = text.next().unwrap_or_default().to_string();

            vec![
                Line::from(Span::styled(inputs, Theme::text_secondary())),
                Line::from(""),
                Line::from(Span::styled(score, Theme::title())),
                Line::from(Span::styled(
                    category,
                    category_style.add_modifier(Modifier::BOLD),
                )),
            ]
        }
        (None, None) => vec![Line::from(Span::styled(
            "Adjust a slider to compute a score",
            Theme::text_muted(),
        ))],
    };

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}
