//! Histogram panel: reference score distribution with the user's score marked.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::domain::Histogram;
use crate::tui::styles::Theme;

/// Render the histogram panel
pub fn render_histogram(f: &mut Frame, area: Rect, histogram: &Histogram) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Reference Scores ({} bins) ", histogram.bins()),
            Theme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Bars
            Constraint::Length(1), // Axis
            Constraint::Length(1), // Marker caption
        ])
        .split(inner);

    let (bar_width, bar_gap) = bar_geometry(chunks[0].width, histogram.bins());
    let bars: Vec<Bar> = histogram
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let style = if histogram.marker_bin == Some(i) {
                Theme::marker()
            } else {
                Theme::bar()
            };
            Bar::default()
                .value(u64::from(count))
                .text_value(String::new())
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap);
    f.render_widget(chart, chunks[0]);

    let axis = axis_line(histogram, chunks[1].width as usize);
    f.render_widget(Paragraph::new(axis), chunks[1]);

    f.render_widget(Paragraph::new(marker_caption(histogram)), chunks[2]);
}

/// Widest bars that fit every bin, with a 1-cell gap when there is room.
fn bar_geometry(width: u16, bins: usize) -> (u16, u16) {
    let bins = bins.max(1) as u16;
    let per_bin = (width / bins).max(1);
    if per_bin >= 3 {
        (per_bin - 1, 1)
    } else {
        (per_bin, 0)
    }
}

fn axis_line(histogram: &Histogram, width: usize) -> Line<'static> {
    let lo = format!("{:.1}", histogram.min);
    let hi = format!("{:.1}", histogram.max);
    let pad = width.saturating_sub(lo.len() + hi.len());
    Line::from(vec![
        Span::styled(lo, Theme::text_muted()),
        Span::raw(" ".repeat(pad)),
        Span::styled(hi, Theme::text_muted()),
    ])
}

fn marker_caption(histogram: &Histogram) -> Line<'static> {
    match histogram.marker_bin {
        Some(bin) => {
            let (lo, hi) = histogram.bin_edges(bin);
            Line::from(vec![
                Span::styled("▲ Your score ", Theme::marker()),
                Span::styled(format!("{:.2}", histogram.marker), Theme::text()),
                Span::styled(
                    format!("  (bin {}: {:.1}-{:.1}, {} people)", bin + 1, lo, hi, histogram.counts[bin]),
                    Theme::text_muted(),
                ),
            ])
        }
        None => Line::from(vec![
            Span::styled("▲ Your score ", Theme::marker()),
            Span::styled(format!("{:.2}", histogram.marker), Theme::text()),
            Span::styled(
                "  is outside the reference range",
                Theme::text_muted(),
            ),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_geometry() {
        assert_eq!(bar_geometry(80, 20), (3, 1));
        assert_eq!(bar_geometry(40, 20), (2, 0));
        assert_eq!(bar_geometry(40, 100), (1, 0));
    }

    #[test]
    fn test_marker_caption_outside_range() {
        let hist = Histogram::build(&[10.0, 20.0], 4, 150.0);
        let caption: String = marker_caption(&hist)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(caption.contains("150.00"));
        assert!(caption.contains("outside"));
    }
}
