use captions::{
    Anchor, KaraokeOverlay, NewsBarOverlay, Presentation, Rgb, StandardOverlay, WordPhase,
    format_clock, frame_to_seconds, transcript_rows,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::App;

const TRANSCRIPT_PANEL_WIDTH: u16 = 44;
/// Rows of context kept above the scrolled-to transcript row.
const SCROLL_CONTEXT: usize = 2;

pub fn render(frame: &mut Frame, app: &App) {
    let [header_area, body_area, timeline_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [preview_area, transcript_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(TRANSCRIPT_PANEL_WIDTH),
    ])
    .areas(body_area);

    render_header(frame, app, header_area);
    render_preview(frame, app, preview_area);
    render_transcript(frame, app, transcript_area);
    render_timeline(frame, app, timeline_area);
    render_hints(frame, hint_area);
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.paused {
        "⏸ PAUSED"
    } else {
        "▶ PLAYING"
    };
    let style = app.session.controller().style();
    let font = if style.has_known_font_family() {
        style.font_family().to_string()
    } else {
        format!("{} (custom)", style.font_family())
    };
    let text = format!(
        " {} | {} | {} | {} | {} fps | {} ",
        app.fixture_name,
        status,
        app.mode,
        font,
        app.fps(),
        format_clock(app.update.frame.time_seconds),
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" preview ", Style::default().fg(Color::DarkGray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.update.frame.presentation {
        Some(Presentation::Standard(overlay)) => render_standard(frame, overlay, inner),
        Some(Presentation::NewsBar(overlay)) => render_news_bar(frame, overlay, inner),
        Some(Presentation::Karaoke(overlay)) => render_karaoke(frame, overlay, inner),
        None => {}
    }
}

/// Area for a bottom-anchored overlay of `lines` rows.
fn anchored_area(anchor: Anchor, max_width_percent: f64, lines: u16, area: Rect) -> Rect {
    let width = ((area.width as f64 * max_width_percent / 100.0) as u16).max(1);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    match anchor {
        Anchor::TopBar => Rect::new(area.x, area.y, area.width, lines.min(area.height)),
        Anchor::BottomCenter { offset_percent } => {
            let offset = ((area.height as f64 * offset_percent / 100.0) as u16).max(1);
            let bottom = area.bottom().saturating_sub(offset);
            let y = bottom.saturating_sub(lines).max(area.y);
            Rect::new(x, y, width, lines.min(area.height))
        }
    }
}

fn render_standard(frame: &mut Frame, overlay: &StandardOverlay, area: Rect) {
    let lines = overlay.text.lines().count().max(1) as u16;
    let target = anchored_area(overlay.anchor, overlay.style.max_width_percent, lines, area);

    let mut style = Style::default()
        .fg(color(overlay.style.color))
        .bg(color(overlay.style.background));
    if overlay.opacity < 0.5 {
        style = style.add_modifier(Modifier::DIM);
    }

    let text: Vec<Line> = overlay.text.lines().map(Line::raw).collect();
    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        target,
    );
}

fn render_news_bar(frame: &mut Frame, overlay: &NewsBarOverlay, area: Rect) {
    let target = anchored_area(overlay.anchor, 100.0, 1, area);
    let text = overlay.text.replace('\n', " ");
    // A terminal row cannot slide; reveal the text as the bar comes in.
    let visible = (text.chars().count() as f64 * overlay.progress).ceil() as usize;

    frame.render_widget(
        Paragraph::new(truncate(&text, visible).to_string()).style(
            Style::default()
                .fg(color(overlay.style.color))
                .bg(color(overlay.style.background))
                .add_modifier(Modifier::BOLD),
        ),
        target,
    );
}

fn render_karaoke(frame: &mut Frame, overlay: &KaraokeOverlay, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for word in &overlay.words {
        let mut style = Style::default()
            .fg(color(word.color))
            .bg(color(overlay.style.background));
        style = match word.phase {
            WordPhase::Active if word.scale > 1.05 => {
                style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            }
            WordPhase::Active => style.add_modifier(Modifier::BOLD),
            WordPhase::Pending => style.add_modifier(Modifier::DIM),
            WordPhase::Spoken => style,
        };
        if !spans.is_empty() {
            spans.push(Span::styled(" ", Style::default().bg(color(overlay.style.background))));
        }
        spans.push(Span::styled(word.text.replace('\n', " "), style));
    }

    let target = anchored_area(overlay.anchor, overlay.style.max_width_percent, 2, area);
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        target,
    );
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" transcript ", Style::default().fg(Color::DarkGray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = transcript_rows(
        app.session.controller().segments(),
        app.update.frame.active_index,
    );
    let text_width = inner.width.saturating_sub(12) as usize;

    let lines: Vec<Line> = rows
        .iter()
        .skip(app.scroll.saturating_sub(SCROLL_CONTEXT))
        .map(|row| {
            let text = row.text.replace('\n', " ");
            let text_style = if row.is_active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", row.start_label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate(&text, text_width).to_string(), text_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let ratio = if app.end_frame == 0 {
        0.0
    } else {
        (app.frame() as f64 / app.end_frame as f64).min(1.0)
    };
    let label = format!(
        "{} / {}",
        format_clock(app.update.frame.time_seconds),
        format_clock(frame_to_seconds(app.end_frame, app.fps())),
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(
            " [Space] pause/resume  [←/→] prev/next caption  [m] mode  [f] font  [Home/End] jump  [q] quit ",
        )
        .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
