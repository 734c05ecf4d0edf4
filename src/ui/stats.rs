use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use tracing::warn;

use crate::app::App;
use crate::history::{HistoryDb, MinuteSummary, TokenSummary};

fn miss_color(miss_rate: f64) -> Color {
    if miss_rate == 0.0 {
        Color::Green
    } else if miss_rate < 20.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Pure presenter for one word row
pub fn present_word_row(data: &TokenSummary) -> Row<'static> {
    Row::new(vec![
        Cell::from(data.token.to_string())
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(data.attempts.to_string()),
        Cell::from(format!("{:.1}", data.miss_rate))
            .style(Style::default().fg(miss_color(data.miss_rate))),
    ])
}

/// Pure presenter for one minute row
pub fn present_minute_row(data: &MinuteSummary) -> Row<'static> {
    let avg_color = if data.avg_mistakes == 0.0 {
        Color::Green
    } else if data.avg_mistakes < 1.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Row::new(vec![
        Cell::from(format!(":{:02}", data.minute))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(data.rounds.to_string()),
        Cell::from(format!("{:.2}", data.avg_mistakes))
            .style(Style::default().fg(avg_color)),
    ])
}

/// Most mistakes per round first, ties by minute
pub fn sort_hardest_first(minutes: &mut [MinuteSummary]) {
    minutes.sort_by(|a, b| {
        b.avg_mistakes
            .partial_cmp(&a.avg_mistakes)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.minute.cmp(&b.minute))
    });
}

fn header(cells: [&'static str; 3]) -> Row<'static> {
    Row::new(cells.map(Cell::from)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_tables(history: &HistoryDb, f: &mut Frame, area: Rect) -> crate::error::Result<bool> {
    let words = history.token_summary()?;
    let mut minutes = history.minute_summary()?;
    if words.is_empty() && minutes.is_empty() {
        return Ok(false);
    }
    sort_hardest_first(&mut minutes);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let visible = area.height.saturating_sub(3) as usize;

    let word_table = Table::new(
        words.iter().take(visible).map(present_word_row).collect::<Vec<_>>(),
        [Constraint::Length(8), Constraint::Length(8), Constraint::Min(8)],
    )
    .header(header(["Ord", "Forsøk", "Bom (%)"]))
    .block(Block::default().borders(Borders::ALL).title("Ord"))
    .column_spacing(2);
    f.render_widget(word_table, halves[0]);

    let minute_table = Table::new(
        minutes.iter().take(visible).map(present_minute_row).collect::<Vec<_>>(),
        [Constraint::Length(8), Constraint::Length(8), Constraint::Min(8)],
    )
    .header(header(["Minutt", "Runder", "Feil"]))
    .block(Block::default().borders(Borders::ALL).title("Minutter"))
    .column_spacing(2);
    f.render_widget(minute_table, halves[1]);

    Ok(true)
}

/// Render the practice statistics screen
pub fn render_stats(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(0),    // tables
            Constraint::Length(2), // instructions
        ])
        .split(f.area());

    let played = app
        .history
        .as_ref()
        .and_then(|h| h.rounds_played().ok())
        .unwrap_or(0);
    let title = Paragraph::new(format!("Statistikk ({} runder)", played))
        .block(Block::default().borders(Borders::ALL).title("Lær Klokka"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let message = match &app.history {
        None => Some("Historikk er slått av."),
        Some(history) => match render_tables(history, f, chunks[1]) {
            Ok(true) => None,
            Ok(false) => Some("Ingen statistikk ennå. Spill noen runder først."),
            Err(e) => {
                warn!(error = %e, "could not read history");
                Some("Kunne ikke lese historikken.")
            }
        },
    };
    if let Some(message) = message {
        let no_data = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(no_data, chunks[1]);
    }

    let instructions = Paragraph::new("(b/backspace) tilbake  (esc) avslutt")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(instructions, chunks[2]);
}
