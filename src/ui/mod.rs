mod canvas;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Outcome, State};
use canvas::BrailleCanvas;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Invaders ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    render_status(frame, app, chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let mut canvas = BrailleCanvas::new(fw, fh);
        if let Some(wave) = &app.wave {
            wave.draw(&mut canvas);
        }
        frame.render_widget(Paragraph::new(canvas.into_lines()), chunks[1]);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("S Start ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);

    if let Some(message) = app.message() {
        render_banner(frame, chunks[1], message, app.state);
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (lives, aliens) = match &app.wave {
        Some(wave) => (wave.lives(), wave.grid().alive_count()),
        None => (0, 0),
    };
    let status = Line::from(vec![
        Span::styled(" \u{1f47e} ", Style::default()),
        Span::styled(
            format!("Lives: {}", "\u{2666} ".repeat(lives as usize)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Aliens: {} ", aliens),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

fn render_banner(frame: &mut Frame, area: Rect, message: &str, state: State) {
    let color = match state {
        State::Complete(Outcome::Won) => Color::Rgb(255, 220, 80),
        State::Complete(Outcome::Lost) => Color::Red,
        _ => Color::Rgb(80, 200, 255),
    };
    let overlay_w = (message.chars().count() as u16 + 6).min(area.width);
    let overlay_h = 3u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(text, overlay_area);
}
