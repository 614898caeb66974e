use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use othello_ai::{game_state::GameState, Player, Position, COLUMNS, ROWS};

/// Draws the board, marking the moves available to the player to move
pub fn display(state: &GameState) -> Result<()> {
    let mut stdout = stdout();

    let header: String = (0..COLUMNS)
        .map(|col| format!(" {}", (b'a' + col as u8) as char))
        .collect();
    stdout.queue(PrintStyledContent(style(format!("  {}\n", header))))?;

    for row in 0..ROWS {
        stdout.queue(PrintStyledContent(style(format!("{:>2}", row + 1))))?;
        for col in 0..COLUMNS {
            let position = Position::new(row, col);
            let (symbol, colour) = match state.cell(position) {
                Player::Black => ("●", Color::Black),
                Player::White => ("●", Color::White),
                Player::None if state.is_legal(position) => ("·", Color::Yellow),
                Player::None => (" ", Color::DarkGreen),
            };
            stdout.queue(PrintStyledContent(
                style(format!(" {}", symbol))
                    .attribute(Attribute::Bold)
                    .on(Color::DarkGreen)
                    .with(colour),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let status = if state.game_over() {
        String::from("Game over")
    } else {
        format!("{} to move", state.current_player())
    };
    stdout.queue(PrintStyledContent(style(format!(
        "{} {} - {} {}, {}\n",
        Player::Black,
        state.disk_count(Player::Black),
        state.disk_count(Player::White),
        Player::White,
        status
    ))))?;
    stdout.flush()?;
    Ok(())
}
