//! TUI rendering for the bingo caller using ratatui.

mod board;
mod input;
mod theme;

pub use board::{BoardLayout, MIN_COLUMNS};
pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};

use bingo_engine::{App, BallNumber, InputMode, StatusKind};

const SIDE_PANEL_WIDTH: u16 = 38;
const CURRENT_CARD_HEIGHT: u16 = 7;
const CONTROLS_HEIGHT: u16 = 9;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Board + side panel
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(chunks[0]);

    draw_board(frame, app, columns[0], &palette, &glyphs);
    draw_side_panel(frame, app, columns[1], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[1], &palette, &glyphs);

    match app.input_mode() {
        InputMode::ConfirmReset => draw_confirm_prompt(
            frame,
            &palette,
            " Restart draw ",
            &[
                "Are you sure you want to restart the draw?".to_string(),
                format!(
                    "The next draw will use {} numbers.",
                    app.pending_size().resolve()
                ),
            ],
        ),
        InputMode::ConfirmQuit => draw_confirm_prompt(
            frame,
            &palette,
            " Quit ",
            &[
                "A draw is in progress.".to_string(),
                format!(
                    "{} numbers drawn will be lost. Quit anyway?",
                    app.session().drawn_count()
                ),
            ],
        ),
        InputMode::Normal | InputMode::EditSize => {}
    }
}

fn draw_board(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(Span::styled(
            " Board ",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let size = app.session().size();
    let layout = BoardLayout::compute(size, inner);
    app.clamp_board_scroll(layout.max_scroll());
    let scroll = app.board_scroll();
    let latest = app.session().last_drawn();

    let mut lines: Vec<Line> = Vec::with_capacity(usize::from(layout.visible_rows));
    for row in scroll..scroll.saturating_add(layout.visible_rows).min(layout.rows) {
        let spans: Vec<Span> = layout
            .row_numbers(row, size)
            .filter_map(BallNumber::new)
            .map(|ball| {
                let style = if Some(ball) == latest {
                    styles::ball_latest(palette)
                } else if app.session().is_drawn(ball) {
                    styles::ball_drawn(palette)
                } else {
                    styles::ball_idle(palette)
                };
                let width = usize::from(layout.cell_width - 2);
                Span::styled(format!(" {:>width$} ", ball.to_string()), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let grid_area = Rect {
        width: layout.width().min(inner.width),
        ..inner
    };
    frame.render_widget(Paragraph::new(lines), grid_area);

    if layout.max_scroll() > 0 {
        let indicator = format!(
            " {} {}/{} {} ",
            glyphs.arrow_up,
            scroll + layout.visible_rows,
            layout.rows,
            glyphs.arrow_down
        );
        let width = indicator.chars().count() as u16;
        if area.width > width + 2 {
            let rect = Rect {
                x: area.x + area.width - width - 2,
                y: area.y + area.height.saturating_sub(1),
                width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(indicator, styles::key_hint(palette))),
                rect,
            );
        }
    }
}

fn draw_side_panel(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CURRENT_CARD_HEIGHT),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Min(3),
        ])
        .split(area);

    draw_current_number(frame, app, chunks[0], palette);
    draw_controls(frame, app, chunks[1], palette, glyphs);
    draw_history(frame, app, chunks[2], palette, glyphs);
}

/// Formats the last drawn number, or `--` before the first draw.
#[must_use]
pub fn current_number_label(last: Option<BallNumber>) -> String {
    last.map_or_else(|| "--".to_string(), |ball| ball.to_string())
}

fn draw_current_number(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(palette.green))
        .style(Style::default().bg(palette.call))
        .title(Span::styled(
            " Current number ",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))
        .title_alignment(Alignment::Center);

    let label = current_number_label(app.session().last_drawn());
    let number_style = Style::default()
        .fg(palette.text_primary)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(label, number_style)),
        Line::from(""),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Label of the draw action; changes once every number is out.
#[must_use]
pub fn draw_action_label(exhausted: bool) -> &'static str {
    if exhausted {
        "All numbers have been drawn"
    } else {
        "Draw a number"
    }
}

fn draw_controls(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let session = app.session();
    let exhausted = session.is_exhausted();
    let key = |k: &'static str| Span::styled(format!("{k:>6} "), styles::key_highlight(palette));

    let draw_style = if exhausted {
        Style::default().fg(palette.text_muted)
    } else {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    };

    let (switch, switch_style, switch_text) = if app.announce_enabled() {
        (glyphs.switch_on, Style::default().fg(palette.success), "on")
    } else {
        (glyphs.switch_off, Style::default().fg(palette.text_muted), "off")
    };

    let editing = app.input_mode() == InputMode::EditSize;
    let size_style = if editing {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.text_secondary)
    } else {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
    };
    let mut size_spans = vec![
        key("n"),
        Span::styled("Numbers ", Style::default().fg(palette.text_secondary)),
        Span::styled(format!(" {} ", app.size_input().text()), size_style),
    ];
    if editing {
        size_spans.push(Span::styled(glyphs.cursor, Style::default().fg(palette.accent)));
    }

    let lines = vec![
        Line::from(vec![key("Space"), Span::styled(draw_action_label(exhausted), draw_style)]),
        Line::from(vec![
            key("a"),
            Span::styled("Announcer ", Style::default().fg(palette.text_secondary)),
            Span::styled(format!("{switch} {switch_text}"), switch_style),
            Span::styled(
                format!(" ({})", app.announcer_name()),
                styles::key_hint(palette),
            ),
        ]),
        Line::from(size_spans),
        Line::from(vec![
            key("r"),
            Span::styled("Restart draw", Style::default().fg(palette.error)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Drawn ", styles::key_hint(palette)),
            Span::styled(
                format!("{} / {}", session.drawn_count(), session.size()),
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_history(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, ball) in app.session().drawn().enumerate() {
        if i == 0 {
            spans.push(Span::styled(
                format!("{} {ball}", glyphs.latest),
                Style::default()
                    .fg(palette.green)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", glyphs.bullet),
                Style::default().fg(palette.bg_border),
            ));
            spans.push(Span::styled(
                ball.to_string(),
                Style::default().fg(palette.text_secondary),
            ));
        }
    }
    if spans.is_empty() {
        spans.push(Span::styled("No numbers drawn yet", styles::key_hint(palette)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(Span::styled(" History ", Style::default().fg(palette.text_secondary)))
        .padding(Padding::horizontal(1));
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (mode_label, mode_style) = match app.input_mode() {
        InputMode::Normal => (" DRAW ", styles::mode_normal(palette)),
        InputMode::EditSize => (" SIZE ", styles::mode_edit(palette)),
        InputMode::ConfirmReset | InputMode::ConfirmQuit => {
            (" CONFIRM ", styles::mode_confirm(palette))
        }
    };

    let mut spans = vec![Span::styled(mode_label, mode_style), Span::raw(" ")];

    if let Some(msg) = app.status_message() {
        let (prefix, color) = match app.status_kind() {
            StatusKind::Error => ("Error: ", palette.error),
            StatusKind::Warning => ("Warning: ", palette.warning),
            StatusKind::Success => ("", palette.success),
            StatusKind::Info => ("", palette.text_secondary),
        };
        spans.push(Span::styled(
            format!("{prefix}{msg}"),
            Style::default().fg(color),
        ));
    } else {
        let hints: &[(&str, &str)] = match app.input_mode() {
            InputMode::Normal => &[
                ("Space", "draw"),
                ("a", "announcer"),
                ("n", "numbers"),
                ("r", "restart"),
                ("q", "quit"),
            ],
            InputMode::EditSize => &[("Enter", "keep"), ("Esc", "cancel")],
            InputMode::ConfirmReset | InputMode::ConfirmQuit => &[("y", "yes"), ("n", "no")],
        };
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    format!(" {} ", glyphs.separator),
                    Style::default().fg(palette.bg_border),
                ));
            }
            spans.push(Span::styled(*key, styles::key_highlight(palette)));
            spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_confirm_prompt(frame: &mut Frame, palette: &Palette, title: &str, body: &[String]) {
    let mut lines: Vec<Line> = body
        .iter()
        .map(|text| {
            Line::from(Span::styled(
                format!(" {text}"),
                Style::default().fg(palette.text_primary),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" y", styles::key_highlight(palette)),
        Span::styled(" yes  ", styles::key_hint(palette)),
        Span::styled("n", styles::key_highlight(palette)),
        Span::styled(" no", styles::key_hint(palette)),
    ]));

    let content_width = lines.iter().map(Line::width).max().unwrap_or(10) as u16;
    let content_width = content_width.min(frame.area().width.saturating_sub(6));
    let content_height = lines.len() as u16;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.warning))
        .style(Style::default().bg(palette.bg_panel))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::uniform(1));

    let height = content_height.saturating_add(4);
    let width = content_width.saturating_add(4);
    let area = frame.area();
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width) / 2),
        y: area.y + (area.height.saturating_sub(height) / 2),
        width: width.min(area.width),
        height: height.min(area.height),
    };

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
