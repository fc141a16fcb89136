//! Stateless UI rendering for the three screens.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strictly_hanoi::{
    Clock, CompletionView, KeyValueStore, Peg, PegId, PlayView, Route,
};
use strum::IntoEnumIterator;

use super::app::App;

const RULES: [&str; 4] = [
    "All disks start stacked on the left peg, largest at the bottom.",
    "Move the whole tower to the right peg.",
    "Only the top disk of a peg can move, one disk at a time.",
    "A larger disk may never sit on a smaller one.",
];

/// Splits the frame into title, body and status rows.
fn screen_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Body
            Constraint::Length(3), // Status
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Splits the play body into the header line and the three peg columns.
fn play_chunks(body: Rect) -> (Rect, [Rect; 3]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(body);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    (rows[0], [columns[0], columns[1], columns[2]])
}

/// Where each peg is drawn on the play screen for a frame of `area`.
///
/// Mouse hit-testing uses these rects so clicks land on what is rendered.
pub fn peg_columns(area: Rect) -> [Rect; 3] {
    let [_, body, _] = screen_chunks(area);
    play_chunks(body).1
}

/// Renders the current screen.
pub fn draw<K: KeyValueStore, C: Clock>(frame: &mut Frame, app: &App<K, C>) {
    let chunks = screen_chunks(frame.area());

    let title = Paragraph::new("Strictly Hanoi - Tower of Hanoi")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.route() {
        Route::Entry => draw_entry(frame, chunks[1]),
        Route::Play => draw_play(frame, chunks[1], app),
        Route::Completed => match app.completion() {
            Some(view) => draw_completion(frame, chunks[1], view),
            None => draw_entry(frame, chunks[1]),
        },
    }

    let status_style = if app.restart_pending() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(app.status_message())
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}

fn draw_entry(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Game Rules",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(RULES.iter().map(|rule| Line::from(format!("• {}", rule))));

    let rules = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("How to play"));
    frame.render_widget(rules, area);
}

fn draw_play<K: KeyValueStore, C: Clock>(frame: &mut Frame, area: Rect, app: &App<K, C>) {
    let view = app.play();

    let (header_area, columns) = play_chunks(area);

    let header = Paragraph::new(format!("Moves: {}    Time: {}", view.moves(), view.elapsed()))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(header, header_area);

    for (peg_id, column) in PegId::iter().zip(columns.iter()) {
        draw_peg(frame, *column, view, peg_id, app);
    }
}

fn draw_peg<K: KeyValueStore, C: Clock>(
    frame: &mut Frame,
    area: Rect,
    view: &PlayView,
    peg_id: PegId,
    app: &App<K, C>,
) {
    let peg = view.board().peg(peg_id);
    let lifted = *view.selected() == Some(peg_id);

    let border_style = if app.invalid_peg() == Some(peg_id) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if lifted || app.drag_from() == Some(peg_id) {
        Style::default().fg(Color::Yellow)
    } else if app.cursor() == peg_id {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let height = usize::from(area.height.saturating_sub(2));
    let paragraph = Paragraph::new(peg_lines(peg, view.board().disk_count(), height, lifted))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} {} ", peg_id.index() + 1, peg_id.label())),
        );
    frame.render_widget(paragraph, area);
}

/// Stacks a peg's disks bottom-up, padding the top with the bare pole.
fn peg_lines(peg: &Peg, disk_count: usize, height: usize, lifted: bool) -> Vec<Line<'static>> {
    let rows = height.max(peg.len() + 1);
    let top_index = peg.len().checked_sub(1);

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(rows);
    for _ in 0..rows - peg.len() {
        lines.push(Line::from(Span::styled("│", Style::default().fg(Color::DarkGray))));
    }
    for (index, disk) in peg.disks().iter().enumerate().rev() {
        let width = 2 * disk.rank() + 3;
        let mut style = Style::default().fg(disk_color(disk.rank(), disk_count));
        if lifted && Some(index) == top_index {
            style = style.bg(Color::White).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled("█".repeat(width), style)));
    }
    lines
}

fn disk_color(rank: usize, disk_count: usize) -> Color {
    const PALETTE: [Color; 5] = [
        Color::LightRed,
        Color::LightYellow,
        Color::LightGreen,
        Color::LightBlue,
        Color::LightMagenta,
    ];
    PALETTE[(disk_count.saturating_sub(1).saturating_sub(rank)) % PALETTE.len()]
}

fn draw_completion(frame: &mut Frame, area: Rect, view: &CompletionView) {
    let lines = vec![
        Line::from(Span::styled(
            "You have successfully completed the game",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Time taken: {}", view.duration_label())),
        Line::from(format!("No of moves: {}", view.moves())),
        Line::from(format!("Fewest possible: {}", view.minimum_moves())),
    ];

    let summary = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(summary, area);
}
