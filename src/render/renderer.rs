use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, EndReason, Snapshot};
use crate::leaderboard::Leaderboard;

/// Dialog drawn over the play area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay<'a> {
    None,
    Welcome,
    GameOver { score: u32, reason: EndReason },
    NewHighScore { score: u32, name: &'a str },
    /// Leaderboard, optionally highlighting a freshly submitted rank
    Leaderboard { highlight: Option<usize> },
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        overlay: &Overlay<'_>,
        leaderboard: &Leaderboard,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(snapshot), game_area);

        let dialog = match overlay {
            Overlay::None => None,
            Overlay::Welcome => Some(self.render_welcome()),
            Overlay::GameOver { score, reason } => Some(self.render_game_over(*score, *reason)),
            Overlay::NewHighScore { score, name } => Some(self.render_name_prompt(*score, name)),
            Overlay::Leaderboard { highlight } => {
                Some(self.render_leaderboard(leaderboard, *highlight))
            }
        };

        if let Some((dialog, height)) = dialog {
            let area = centered_rect(40, height, game_area);
            frame.render_widget(Clear, area);
            frame.render_widget(dialog, area);
        }

        frame.render_widget(self.render_controls(overlay), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut lines = Vec::with_capacity(snapshot.rows.max(0) as usize);

        for y in 0..snapshot.rows {
            let mut spans = Vec::with_capacity(snapshot.columns.max(0) as usize);

            for x in 0..snapshot.columns {
                let cell = Cell::new(x, y);
                // Checkerboard background
                let background = if (x + y) % 2 == 0 {
                    Color::Black
                } else {
                    Color::DarkGray
                };

                let segment = snapshot.segments.iter().find(|s| s.cell == cell);
                let span = match segment {
                    Some(segment) if segment.is_head => Span::styled(
                        "██",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(_) => Span::styled("██", Style::default().fg(Color::Green)),
                    None if snapshot.food == Some(cell) => Span::styled(
                        "()",
                        Style::default()
                            .fg(Color::Yellow)
                            .bg(background)
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled("  ", Style::default().bg(background)),
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} ms", snapshot.tick_interval.as_millis()),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_welcome(&self) -> (Paragraph<'static>, u16) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Steer with the arrow keys or WASD."),
            Line::from("Eat the food, avoid walls and your tail."),
            Line::from(""),
            press_to_start(),
        ];

        (dialog(text, Color::Green), 9)
    }

    fn render_game_over(&self, score: u32, reason: EndReason) -> (Paragraph<'static>, u16) {
        let cause = match reason {
            EndReason::Wall => "You hit the wall",
            EndReason::SelfCollision => "You bit your own tail",
            EndReason::BoardFull => "The board is full!",
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            press_to_start(),
        ];

        (dialog(text, Color::Red), 9)
    }

    fn render_name_prompt(&self, score: u32, name: &str) -> (Paragraph<'static>, u16) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("You scored {score} points.")),
            Line::from(""),
            Line::from(vec![
                Span::styled("Name: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{name}_"),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to submit, Esc to skip",
                Style::default().fg(Color::Gray),
            )),
        ];

        (dialog(text, Color::Yellow), 9)
    }

    fn render_leaderboard(
        &self,
        leaderboard: &Leaderboard,
        highlight: Option<usize>,
    ) -> (Paragraph<'static>, u16) {
        let mut text = vec![
            Line::from(Span::styled(
                "LEADERBOARD",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if leaderboard.is_empty() {
            text.push(Line::from(Span::styled(
                "No scores yet",
                Style::default().fg(Color::Gray),
            )));
        }

        for (rank, entry) in leaderboard.entries().iter().enumerate() {
            let style = if highlight == Some(rank) {
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            text.push(Line::from(Span::styled(
                format!("{:>2}. {:<16} {:>5}", rank + 1, entry.name, entry.score),
                style,
            )));
        }

        text.push(Line::from(""));
        text.push(press_to_start());

        let height = text.len() as u16 + 2;
        (dialog(text, Color::Yellow), height)
    }

    fn render_controls(&self, overlay: &Overlay<'_>) -> Paragraph<'static> {
        let text = match overlay {
            Overlay::NewHighScore { .. } => Line::from(vec![
                Span::raw("Type your name | "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to submit"),
            ]),
            _ => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space/R", Style::default().fg(Color::Green)),
                Span::raw(" new game | "),
                Span::styled("L", Style::default().fg(Color::Yellow)),
                Span::raw(" leaderboard | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![text]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn press_to_start() -> Line<'static> {
    Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::Gray)),
        Span::styled(
            "Space",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to start a new game", Style::default().fg(Color::Gray)),
    ])
}

fn dialog(text: Vec<Line<'static>>, border: Color) -> Paragraph<'static> {
    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    )
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
