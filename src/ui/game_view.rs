use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::game::{GameOutcome, Occupant, Player, Position, Snapshot, COLS, ROWS};

pub fn render(
    frame: &mut Frame,
    snapshot: &Snapshot,
    selected_column: usize,
    message: &Option<String>,
    opponent: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, snapshot, opponent, chunks[0]);
    render_board(frame, snapshot, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Human => Color::Red,
        Player::Computer => Color::Yellow,
    }
}

fn status_line(snapshot: &Snapshot) -> (String, Color) {
    match snapshot.outcome {
        Some(GameOutcome::Winner(Player::Human)) => ("You win!".to_string(), Color::Green),
        Some(GameOutcome::Winner(Player::Computer)) => {
            ("The computer wins.".to_string(), Color::Magenta)
        }
        Some(GameOutcome::Draw) => ("It's a draw!".to_string(), Color::White),
        None if snapshot.is_human_turn && !snapshot.is_drop_in_progress => {
            ("Your move".to_string(), player_color(Player::Human))
        }
        None if snapshot.is_human_turn => ("Dropping...".to_string(), player_color(Player::Human)),
        None => (
            "Computer is moving...".to_string(),
            player_color(Player::Computer),
        ),
    }
}

fn render_header(frame: &mut Frame, snapshot: &Snapshot, opponent: &str, area: Rect) {
    let (status, color) = status_line(snapshot);
    let text = format!(
        "{status}  |  W {} - L {} - D {}  |  vs {opponent}",
        snapshot.wins, snapshot.losses, snapshot.draws
    );

    let header = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, snapshot: &Snapshot, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();

    // Column headers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for header in &snapshot.headers {
        if *header == selected_column {
            col_line.push(Span::styled(
                format!(" {header} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {header} ")));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔═════════════════════╗"));

    for row in 1..=ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 1..=COLS {
            let occupant = Position::new(row, col)
                .and_then(|pos| snapshot.cell(pos))
                .map_or(Occupant::Empty, |cell| cell.occupant);
            let span = match occupant.player() {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(player) => Span::styled(" ● ", Style::default().fg(player_color(player))),
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚═════════════════════╝"));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  1-7 / Enter: Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Engine;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(snapshot: &Snapshot) -> String {
        let backend = TestBackend::new(60, 22);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render(f, snapshot, 4, &Some("hello".to_string()), "Random"))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_fresh_game() {
        let engine = Engine::default();
        let screen = draw(&engine.snapshot());
        assert!(screen.contains("Your move"));
        assert!(screen.contains("W 0 - L 0 - D 0"));
        assert!(screen.contains("hello"));
        assert!(!screen.contains('●'));
    }

    #[test]
    fn test_render_shows_falling_piece() {
        let mut engine = Engine::default();
        engine.on_column_chosen(3).unwrap();
        let screen = draw(&engine.snapshot());
        assert!(screen.contains("Dropping..."));
        assert_eq!(screen.matches('●').count(), 1);
    }
}
