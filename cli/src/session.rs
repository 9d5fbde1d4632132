//! Interactive match loop: a human against the search engine.
//!
//! The loop is generic over anything implementing [`PlayedGame`] and reads
//! moves from any `BufRead`, so tests drive whole matches from scripted
//! input without touching stdin.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use game_core::{GameState, Outcome, Player};
use mcts::{UctConfig, UctSearch, UniformRollout};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// What the match loop needs from a game beyond the rules oracle: a prompt,
/// a parser for typed moves, and a terminal rendering of the board.
pub trait PlayedGame: GameState + fmt::Display {
    /// Prompt printed before reading the human's move.
    const PROMPT: &'static str;

    /// Parse one input line into a move for `mover`. None on malformed input.
    fn parse_move(line: &str, mover: Player) -> Option<Self::Move>;

    /// Board rendering shown between moves.
    fn render(&self) -> String;
}

impl PlayedGame for games_tictactoe::State {
    const PROMPT: &'static str = "Your move (row,col): ";

    fn parse_move(line: &str, mover: Player) -> Option<Self::Move> {
        let mut parts = line.trim().split(',');
        let row = parts.next()?.trim().parse().ok()?;
        let col = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(games_tictactoe::Move { row, col, mover })
    }

    fn render(&self) -> String {
        use games_tictactoe::Cell;

        let size = self.size();
        let mut out = String::from("   ");
        for col in 0..size {
            out.push_str(&format!(" {col}"));
        }
        for row in 0..size {
            out.push_str(&format!("\n{row:>3}"));
            for col in 0..size {
                out.push(' ');
                out.push(match self.cell(row, col) {
                    Cell::Empty => '_',
                    Cell::X => 'X',
                    Cell::O => 'O',
                });
            }
        }
        out
    }
}

impl PlayedGame for games_connect4::State {
    const PROMPT: &'static str = "Your move (column): ";

    fn parse_move(line: &str, mover: Player) -> Option<Self::Move> {
        let column = line.trim().parse().ok()?;
        Some(games_connect4::Move { column, mover })
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in (0..games_connect4::ROWS).rev() {
            for column in 0..games_connect4::COLS {
                if column > 0 {
                    out.push(' ');
                }
                out.push(match self.cell(column, row) {
                    None => '.',
                    Some(Player::X) => 'X',
                    Some(Player::O) => 'O',
                });
            }
            out.push('\n');
        }
        for column in 0..games_connect4::COLS {
            if column > 0 {
                out.push(' ');
            }
            out.push_str(&column.to_string());
        }
        out
    }
}

/// How the match ended, from the human's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    HumanWins,
    EngineWins,
    Tie,
}

impl Verdict {
    fn from_outcome(outcome: Outcome, engine: Player) -> Self {
        match outcome {
            Outcome::Draw => Verdict::Tie,
            Outcome::Win(winner) if winner == engine => Verdict::EngineWins,
            Outcome::Win(_) => Verdict::HumanWins,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Verdict::HumanWins => "You Win!",
            Verdict::EngineWins => "You lose!",
            Verdict::Tie => "Tie!",
        };
        f.write_str(text)
    }
}

/// Run one full match. The engine searches on its turns; the human's moves
/// are read line by line from `input`. The board is rendered after every
/// half-move, and the verdict is announced once the game ends.
pub fn play_match<G, R, W>(
    mut state: G,
    engine: Player,
    config: &UctConfig,
    rng: &mut ChaCha20Rng,
    input: &mut R,
    output: &mut W,
) -> Result<Verdict>
where
    G: PlayedGame,
    G::Move: fmt::Display,
    R: BufRead,
    W: Write,
{
    let policy = UniformRollout;
    writeln!(output, "{}", state.render())?;

    while !state.is_terminal() {
        if state.player_to_move() == engine {
            let mut search = UctSearch::new(state.clone(), &policy, config.clone())?;
            let decision = search.run(rng);
            debug!(
                value = decision.value,
                simulations = decision.simulations,
                "engine decision"
            );
            writeln!(output, "Engine plays {}", decision.action)?;
            state = decision.state;
        } else {
            state = human_move(&state, input, output)?;
        }
        writeln!(output, "{}", state.render())?;
    }

    let outcome = state
        .result()
        .expect("terminal state must have a result");
    let verdict = Verdict::from_outcome(outcome, engine);
    writeln!(output, "{verdict}")?;
    Ok(verdict)
}

/// Prompt until the human supplies a legal move, then apply it.
fn human_move<G, R, W>(state: &G, input: &mut R, output: &mut W) -> Result<G>
where
    G: PlayedGame,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", G::PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("reading move input")?;
        if read == 0 {
            bail!("input ended before the match finished");
        }

        let Some(mv) = G::parse_move(&line, state.player_to_move()) else {
            writeln!(output, "invalid move")?;
            continue;
        };

        match state.apply(&mv) {
            Ok(next) => return Ok(next),
            Err(reason) => writeln!(output, "invalid move: {reason}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::State as Connect4;
    use games_tictactoe::{Cell, State as TicTacToe};
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn test_tictactoe_move_parsing() {
        let mv = TicTacToe::parse_move("1,2", Player::O).unwrap();
        assert_eq!((mv.row, mv.col, mv.mover), (1, 2, Player::O));

        let spaced = TicTacToe::parse_move(" 0 , 1 \n", Player::X).unwrap();
        assert_eq!((spaced.row, spaced.col), (0, 1));

        assert!(TicTacToe::parse_move("nope", Player::X).is_none());
        assert!(TicTacToe::parse_move("1", Player::X).is_none());
        assert!(TicTacToe::parse_move("1,2,3", Player::X).is_none());
        assert!(TicTacToe::parse_move("", Player::X).is_none());
    }

    #[test]
    fn test_connect4_move_parsing() {
        let mv = Connect4::parse_move(" 3 \n", Player::X).unwrap();
        assert_eq!((mv.column, mv.mover), (3, Player::X));

        assert!(Connect4::parse_move("a", Player::X).is_none());
        assert!(Connect4::parse_move("1,2", Player::X).is_none());
    }

    #[test]
    fn test_verdict_strings() {
        assert_eq!(Verdict::HumanWins.to_string(), "You Win!");
        assert_eq!(Verdict::EngineWins.to_string(), "You lose!");
        assert_eq!(Verdict::Tie.to_string(), "Tie!");
    }

    #[test]
    fn test_verdict_takes_the_human_side() {
        let engine = Player::X;
        assert_eq!(
            Verdict::from_outcome(Outcome::Win(Player::X), engine),
            Verdict::EngineWins
        );
        assert_eq!(
            Verdict::from_outcome(Outcome::Win(Player::O), engine),
            Verdict::HumanWins
        );
        assert_eq!(Verdict::from_outcome(Outcome::Draw, engine), Verdict::Tie);
    }

    #[test]
    fn test_tictactoe_render_marks_empty_squares() {
        let state = TicTacToe::from_layout("X . .\n. O .\n. . .", Player::X).unwrap();
        let rendered = state.render();

        assert!(rendered.contains('_'));
        assert!(rendered.contains('X'));
        let header = rendered.lines().next().unwrap();
        assert!(header.contains('0') && header.contains('2'));
    }

    #[test]
    fn test_connect4_render_has_a_column_footer() {
        let rendered = Connect4::new().render();
        assert_eq!(rendered.lines().last().unwrap(), "0 1 2 3 4 5 6");
    }

    #[test]
    fn test_invalid_input_reprompts_until_legal() {
        let state = TicTacToe::from_layout("X . .\n. O .\n. . .", Player::X).unwrap();
        let mut input = Cursor::new("garbage\n0,0\n9,9\n1,0\n");
        let mut output = Vec::new();

        let next = human_move(&state, &mut input, &mut output).unwrap();
        assert_eq!(next.cell(1, 0), Cell::X);

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("invalid move").count(), 3);
        assert_eq!(transcript.matches("Your move").count(), 4);
    }

    #[test]
    fn test_input_ending_mid_match_is_an_error() {
        let state = TicTacToe::new(3);
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let err = human_move(&state, &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("input ended"));
    }

    /// One line per square. Whenever it is the human's turn some listed
    /// square is still empty, so the match always reaches a verdict before
    /// the input runs out: occupied squares just burn a reprompt.
    fn all_squares() -> String {
        let mut lines = String::new();
        for row in 0..3 {
            for col in 0..3 {
                lines.push_str(&format!("{row},{col}\n"));
            }
        }
        lines
    }

    #[test]
    fn test_scripted_tictactoe_match_reaches_a_verdict() {
        let config = UctConfig::for_testing();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut input = Cursor::new(all_squares());
        let mut output = Vec::new();

        let verdict = play_match(
            TicTacToe::new(3),
            Player::X,
            &config,
            &mut rng,
            &mut input,
            &mut output,
        )
        .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Engine plays"));
        assert!(transcript.contains(&verdict.to_string()));
    }

    #[test]
    fn test_scripted_match_with_the_human_opening() {
        let config = UctConfig::for_testing();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut input = Cursor::new(all_squares());
        let mut output = Vec::new();

        // Engine plays O; the human's first line (0,0) opens the game.
        let verdict = play_match(
            TicTacToe::new(3),
            Player::O,
            &config,
            &mut rng,
            &mut input,
            &mut output,
        )
        .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.starts_with("    0 1 2"));
        assert!(transcript.contains("Your move"));
        assert!(transcript.contains(&verdict.to_string()));
    }

    /// Column capacity copies of each column line; the same argument as
    /// `all_squares` keeps the input ahead of the match.
    fn all_columns() -> String {
        let mut lines = String::new();
        for _ in 0..games_connect4::ROWS {
            for column in 0..games_connect4::COLS {
                lines.push_str(&format!("{column}\n"));
            }
        }
        lines
    }

    #[test]
    fn test_scripted_connect4_match_reaches_a_verdict() {
        let config = UctConfig::for_testing();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut input = Cursor::new(all_columns());
        let mut output = Vec::new();

        let verdict = play_match(
            Connect4::new(),
            Player::X,
            &config,
            &mut rng,
            &mut input,
            &mut output,
        )
        .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Engine plays"));
        assert!(transcript.contains(&verdict.to_string()));
    }
}
