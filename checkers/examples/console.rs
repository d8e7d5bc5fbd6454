//! Two players sharing one terminal
//!
//! Enter moves like `c3-d4` or `c3 d4`. Other commands are `history`, `captured` and
//! `quit`. Set `RUST_LOG=debug` to see what the engine does.

use checkers::{Game, PrettyStyle};

use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    env_logger::init();

    let mut game = Game::new_initial();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        writeln!(
            stdout,
            "\n{}",
            game.board().pretty(PrettyStyle::Ascii).with_axes()
        )?;
        if let Some(outcome) = game.outcome() {
            writeln!(stdout, "{}", outcome)?;
            break;
        }
        match game.pending_jump() {
            Some(src) => write!(stdout, "{} continues jumping from {}> ", game.side(), src)?,
            None => write!(stdout, "{} to move> ", game.side())?,
        }
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "" => continue,
            "quit" => break,
            "history" => write!(stdout, "{}", game.board().history_list())?,
            "captured" => write!(stdout, "{}", game.board().captured_list())?,
            s => {
                if let Err(e) = game.try_move_str(s) {
                    writeln!(stdout, "error: {}", e)?;
                }
            }
        }
    }

    Ok(())
}
