//! Layout and drawing: name prompt, board, active piece, sidebar, pause overlay.

use crate::app::{GameOverNotice, NameEntry, Screen};
use crate::theme::Theme;
use blockdrop::{HighScores, Snapshot};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Each board cell is two terminal columns wide so squares look square.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 26;

/// Duration of the row-clear flash in ms.
const LINE_CLEAR_FLASH_MS: u32 = 250;

/// Board size in terminal cells including the border.
fn playfield_outer_size(cols: usize, rows: usize) -> (u16, u16) {
    (
        cols as u16 * CELL_WIDTH + 2,
        rows as u16 * CELL_HEIGHT + 2,
    )
}

/// Flash over the whole board: start white and fade back to the real colours.
pub fn line_clear_flash(theme: &Theme) -> Effect {
    fx::fade_from(
        Color::White,
        theme.bg,
        (LINE_CLEAR_FLASH_MS, Interpolation::Linear),
    )
}

/// Draw the current screen.
pub fn draw(
    frame: &mut Frame,
    screen: Screen,
    snapshot: Snapshot<'_>,
    theme: &Theme,
    scores: &HighScores,
    name_entry: &NameEntry,
    last_game: Option<&GameOverNotice>,
    line_clear_effect: &mut Option<Effect>,
    line_clear_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = frame.area();
    match screen {
        Screen::NameEntry => draw_name_entry(frame, theme, scores, name_entry, area),
        Screen::Playing => {
            let board_rect = draw_game(frame, snapshot, theme, scores, last_game, area);
            if snapshot.paused {
                draw_pause_overlay(frame, theme, area);
            } else if let Some(effect) = line_clear_effect {
                let delta = line_clear_process_time
                    .map(|t| now.saturating_duration_since(t))
                    .unwrap_or(std::time::Duration::ZERO);
                let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
                *line_clear_process_time = Some(now);
                frame.render_effect(effect, board_rect, TfxDuration::from_millis(delta_ms));
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_name_entry(
    frame: &mut Frame,
    theme: &Theme,
    scores: &HighScores,
    entry: &NameEntry,
    area: Rect,
) {
    let fg = Style::default().fg(theme.main_fg);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Enter your name ",
            Style::default().fg(Color::Black).bg(theme.title),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.title)),
            Span::styled(entry.input.as_str(), fg.add_modifier(Modifier::BOLD)),
            Span::styled("_", Style::default().fg(theme.inactive_fg)),
        ]),
        Line::from(""),
    ];
    if let Some(err) = &entry.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " Enter — Start    Esc — Quit ",
        Style::default().fg(theme.inactive_fg),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("High scores", Style::default().fg(theme.title))));
    lines.extend(high_score_lines(theme, scores));

    let height = lines.len() as u16 + 2;
    let popup = centered(area, 36, height);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
                .title(Span::styled(" Blockdrop ", theme.title)),
        )
        .render(popup, frame.buffer_mut());
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = centered(area, 28, 5);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " P — Resume    Esc — Quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
    );
    p.render(popup, frame.buffer_mut());
}

/// Draw board + sidebar centred in `area`; returns the inner board rect.
fn draw_game(
    frame: &mut Frame,
    snapshot: Snapshot<'_>,
    theme: &Theme,
    scores: &HighScores,
    last_game: Option<&GameOverNotice>,
    area: Rect,
) -> Rect {
    let (pw, ph) = playfield_outer_size(snapshot.board.cols(), snapshot.board.rows());
    let total_w = pw + SIDEBAR_WIDTH;

    let horiz_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert_chunks[1]);

    let board_rect = draw_playfield(frame, snapshot, theme, inner[0]);
    draw_sidebar(frame, snapshot, theme, scores, last_game, inner[1]);
    board_rect
}

fn draw_playfield(frame: &mut Frame, snapshot: Snapshot<'_>, theme: &Theme, area: Rect) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Blockdrop ", theme.title));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    let mut paint = |x: i32, y: i32, style: Style, symbol: &str| {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        let rx = inner.x + x * CELL_WIDTH;
        let ry = inner.y + y * CELL_HEIGHT;
        if rx + CELL_WIDTH <= inner.x + inner.width && ry < inner.y + inner.height {
            buf.set_string(rx, ry, symbol, style);
        }
    };

    for (y, row) in snapshot.board.iter_rows().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let (symbol, style) = if cell == blockdrop::EMPTY {
                (" ·", Style::default().fg(theme.div_line).bg(theme.bg))
            } else {
                let c = theme.cell_color(cell);
                ("██", Style::default().fg(c).bg(theme.bg))
            };
            paint(x as i32, y as i32, style, symbol);
        }
    }

    if let Some(piece) = snapshot.piece {
        for (x, y, value) in piece.shape.occupied() {
            let c = theme.cell_color(value);
            paint(
                piece.x + x as i32,
                piece.y + y as i32,
                Style::default().fg(c).bg(theme.bg),
                "██",
            );
        }
    }

    Rect {
        x: inner.x,
        y: inner.y,
        width: (snapshot.board.cols() as u16 * CELL_WIDTH).min(inner.width),
        height: (snapshot.board.rows() as u16 * CELL_HEIGHT).min(inner.height),
    }
}

fn high_score_lines<'a>(theme: &Theme, scores: &'a HighScores) -> Vec<Line<'a>> {
    if scores.entries().is_empty() {
        return vec![Line::from(Span::styled(
            "(none yet)",
            Style::default().fg(theme.inactive_fg),
        ))];
    }
    scores
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(theme.inactive_fg)),
                Span::styled(format!("{:<12}", e.name), Style::default().fg(theme.main_fg)),
                Span::styled(format!("{:>6}", e.score), Style::default().fg(theme.title)),
            ])
        })
        .collect()
}

fn draw_sidebar(
    frame: &mut Frame,
    snapshot: Snapshot<'_>,
    theme: &Theme,
    scores: &HighScores,
    last_game: Option<&GameOverNotice>,
    area: Rect,
) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),  // Stats (border + player, score, lines, best, status)
            Constraint::Length(12), // High scores (border + 10 rows)
            Constraint::Fill(1),    // Controls
        ])
        .split(area);

    // --- Stats ---
    let status = if snapshot.paused {
        Span::styled("Paused", Style::default().fg(Color::Yellow))
    } else {
        match last_game {
            Some(n) if n.ranked => Span::styled(
                format!("Last: {} (saved)", n.result.score),
                Style::default().fg(theme.title),
            ),
            Some(n) => Span::styled(format!("Last: {}", n.result.score), fg_style),
            None => Span::styled("Playing", fg_style),
        }
    };
    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Player: ", title_style),
            Span::styled(snapshot.player, fg_style),
        ]),
        Line::from(vec![
            Span::styled("Score:  ", title_style),
            Span::styled(snapshot.score.to_string(), fg_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Lines:  ", title_style),
            Span::styled(snapshot.lines.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Best:   ", title_style),
            Span::styled(scores.best().max(snapshot.score).to_string(), fg_style),
        ]),
        Line::from(status),
    ];
    Paragraph::new(stats_lines)
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .render(chunks[0], frame.buffer_mut());

    // --- High scores ---
    Paragraph::new(high_score_lines(theme, scores))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" High scores ", title_style)),
        )
        .render(chunks[1], frame.buffer_mut());

    // --- Controls ---
    let help = Style::default().fg(theme.inactive_fg);
    let controls = vec![
        Line::from(Span::styled("←/→ h/l  Move", help)),
        Line::from(Span::styled("↓ j      Drop", help)),
        Line::from(Span::styled("↑ W k    Rotate CW", help)),
        Line::from(Span::styled("Q u      Rotate CCW", help)),
        Line::from(Span::styled("P        Pause", help)),
        Line::from(Span::styled("Esc      Quit", help)),
    ];
    Paragraph::new(controls)
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .render(chunks[2], frame.buffer_mut());
}
