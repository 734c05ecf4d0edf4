pub mod screen;
pub mod stats;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, session::RoundState};

const HORIZONTAL_MARGIN: u16 = 2;
/// Width of one word button, borders included
const CELL_WIDTH: usize = 10;

/// Foreground palette; the terminal keeps its own background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub header: Color,
    pub sub_header: Color,
    pub word: Color,
    pub selected: Color,
    pub success: Color,
    pub error: Color,
    pub record: Color,
}

impl Theme {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                text: Color::Gray,
                header: Color::White,
                sub_header: Color::DarkGray,
                word: Color::LightBlue,
                selected: Color::LightCyan,
                success: Color::LightGreen,
                error: Color::LightRed,
                record: Color::Yellow,
            }
        } else {
            Self {
                text: Color::Black,
                header: Color::Blue,
                sub_header: Color::Gray,
                word: Color::Blue,
                selected: Color::Magenta,
                success: Color::Green,
                error: Color::Red,
                record: Color::Rgb(255, 184, 0),
            }
        }
    }
}

/// Center `word` in a cell of `width` display columns
pub fn pad_word(word: &str, width: usize) -> String {
    let w = word.width();
    if w >= width {
        return word.to_string();
    }
    let left = (width - w) / 2;
    let right = width - w - left;
    format!("{}{}{}", " ".repeat(left), word, " ".repeat(right))
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let theme = Theme::for_mode(session.is_dark_mode());
        let snap = session.snapshot();

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let italic = Style::default().add_modifier(Modifier::ITALIC);

        let bank_rows = self.bank.rows();
        let bank_height = bank_rows.len() as u16
            + bank_rows.iter().filter(|r| r.opens_group).count() as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // prompt
                Constraint::Length(3), // scoreboard
                Constraint::Length(3), // time
                Constraint::Length(3), // sentence
                Constraint::Length(1), // feedback
                Constraint::Length(bank_height.max(3)),
                Constraint::Length(1), // answer
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("Lær Klokka", bold.fg(theme.header)))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);
        Paragraph::new(Span::styled(
            "Hva er klokka på norsk?",
            Style::default().fg(theme.sub_header),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        // scoreboard
        let mut score_spans = vec![
            Span::styled("Streak ", Style::default().fg(theme.sub_header)),
            Span::styled(snap.streak.to_string(), bold.fg(theme.header)),
        ];
        if snap.streak > 2 {
            score_spans.push(Span::raw(" 🔥"));
        }
        score_spans.push(Span::raw("   │   "));
        score_spans.push(Span::styled(
            "🏆 Rekord ",
            Style::default().fg(theme.sub_header),
        ));
        let record_style = if snap.is_new_record {
            bold.fg(theme.record)
        } else {
            bold.fg(theme.header)
        };
        score_spans.push(Span::styled(snap.best_streak.to_string(), record_style));
        if snap.is_new_record {
            score_spans.push(Span::styled(" Ny!", bold.fg(theme.record)));
        }
        let score_border = if snap.is_new_record {
            Style::default().fg(theme.record)
        } else {
            Style::default().fg(theme.sub_header)
        };
        Paragraph::new(Line::from(score_spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(score_border),
            )
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        // time
        let mut time_spans = Vec::new();
        if let Some(time) = session.time() {
            time_spans.push(Span::styled(time.to_string(), bold.fg(theme.header)));
            if self.show_hints {
                if let Some(zone) = time.hint_zone() {
                    time_spans.push(Span::styled(
                        format!("   {}", zone),
                        italic.fg(theme.sub_header),
                    ));
                }
            }
        }
        Paragraph::new(Line::from(time_spans))
            .block(Block::default().borders(Borders::ALL).title("Klokka"))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        // sentence so far
        let sentence = if snap.user_sequence.is_empty() {
            Span::styled("Hva er klokka?", italic.fg(theme.sub_header))
        } else {
            Span::styled(self.sentence(), bold.fg(theme.text))
        };
        let sentence_border = match snap.state {
            RoundState::Error => Style::default().fg(theme.error),
            RoundState::Won => Style::default().fg(theme.success),
            RoundState::Playing => Style::default().fg(theme.sub_header),
        };
        Paragraph::new(sentence)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(sentence_border),
            )
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let feedback = match snap.state {
            RoundState::Error => Span::styled("Prøv igjen!", bold.fg(theme.error)),
            RoundState::Won => Span::styled("Riktig!", bold.fg(theme.success)),
            RoundState::Playing => Span::raw(""),
        };
        Paragraph::new(feedback)
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        if snap.state == RoundState::Won {
            let next = Span::styled("Neste oppgave  (enter)", bold.fg(theme.success));
            Paragraph::new(next)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.success)),
                )
                .alignment(Alignment::Center)
                .render(chunks[6], buf);
        } else {
            render_word_bank(self, theme, chunks[6], buf);
        }

        if self.show_answer {
            if let Some(answer) = session.answer() {
                Paragraph::new(Span::styled(
                    format!("Fasit: {}", answer),
                    italic.fg(theme.sub_header),
                ))
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
            }
        }

        Paragraph::new(Span::styled(
            "←↑↓→ velg / (enter) svar / (n)este / (?) hint / (a) fasit / (d) mørk / (s) statistikk / (esc)",
            italic.fg(theme.sub_header),
        ))
        .alignment(Alignment::Center)
        .render(chunks[9], buf);
    }
}

fn render_word_bank(app: &App, theme: Theme, area: Rect, buf: &mut Buffer) {
    let (cur_row, cur_col) = app.bank.cursor();
    let flashing = app.session.state() == RoundState::Error;

    let mut lines = Vec::new();
    for (r, row) in app.bank.rows().iter().enumerate() {
        if row.opens_group {
            lines.push(Line::from(Span::styled(
                row.group.to_string().to_uppercase(),
                Style::default()
                    .fg(theme.sub_header)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        let spans = row
            .tokens
            .iter()
            .enumerate()
            .map(|(c, token)| {
                let selected = r == cur_row && c == cur_col;
                let style = if selected {
                    Style::default()
                        .fg(theme.selected)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if flashing {
                    Style::default().fg(theme.word).add_modifier(Modifier::DIM)
                } else {
                    Style::default().fg(theme.word)
                };
                Span::styled(pad_word(&token.to_string(), CELL_WIDTH), style)
            })
            .collect::<Vec<Span>>();
        lines.push(Line::from(spans));
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::clock::ClockTime;
    use crate::session::GameSession;
    use crate::time_source::ScriptedTimeSource;
    use crate::vocabulary::Token;
    use std::time::Instant;

    fn create_test_app(hour: u8, minute: u8, options: AppOptions) -> App {
        let session = GameSession::new(
            0,
            Box::new(ScriptedTimeSource::new(vec![
                ClockTime::new(hour, minute).unwrap()
            ])),
        );
        App::new(session, None, options).unwrap()
    }

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_pad_word() {
        assert_eq!(pad_word("ti", 6), "  ti  ");
        assert_eq!(pad_word("åtte", 6), " åtte ");
        assert_eq!(pad_word("på", 5), " på  ");
        assert_eq!(pad_word("elleve", 3), "elleve");
    }

    #[test]
    fn test_themes_differ() {
        assert_ne!(Theme::for_mode(true), Theme::for_mode(false));
    }

    #[test]
    fn test_renders_time_and_word_bank() {
        let app = create_test_app(8, 20, AppOptions::default());
        let rendered = render(&app);
        assert!(rendered.contains("Lær Klokka"));
        assert!(rendered.contains("08:20"));
        assert!(rendered.contains("Hva er klokka?"));
        assert!(rendered.contains("ORD"));
        assert!(rendered.contains("elleve"));
        assert!(!rendered.contains("Fasit"));
        assert!(!rendered.contains("PÅ HALV"));
    }

    #[test]
    fn test_renders_hint_and_answer() {
        let app = create_test_app(
            8,
            20,
            AppOptions {
                show_hints: true,
                show_answer: true,
            },
        );
        let rendered = render(&app);
        assert!(rendered.contains("PÅ HALV"));
        assert!(rendered.contains("Fasit: ti på halv ni"));
    }

    #[test]
    fn test_renders_error_feedback() {
        let mut app = create_test_app(8, 30, AppOptions::default());
        app.submit_at(Token::Tjue, Instant::now());
        assert!(render(&app).contains("Prøv igjen!"));
    }

    #[test]
    fn test_renders_win_and_record() {
        let mut app = create_test_app(8, 30, AppOptions::default());
        let now = Instant::now();
        app.submit_at(Token::Halv, now);
        app.submit_at(Token::Ni, now);
        let rendered = render(&app);
        assert!(rendered.contains("Riktig!"));
        assert!(rendered.contains("halv ni"));
        assert!(rendered.contains("Neste oppgave"));
        assert!(rendered.contains("Ny!"));
        assert!(!rendered.contains("TALL / TIMER"));
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let app = create_test_app(12, 45, AppOptions::default());
        for (w, h) in [(1, 1), (10, 5), (20, 10), (200, 60)] {
            let area = Rect::new(0, 0, w, h);
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
        }
    }
}
