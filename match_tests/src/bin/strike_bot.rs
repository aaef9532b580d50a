// Scripted player: one opening strike ("0 1 30") on its first turn, then
// passes forever.

use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut first_turn = true;
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !line.trim().eq_ignore_ascii_case("go") {
            continue;
        }
        let result = if first_turn {
            first_turn = false;
            writeln!(stdout, "0 1 30").and_then(|()| writeln!(stdout, "go"))
        } else {
            writeln!(stdout, "go")
        };
        if result.and_then(|()| stdout.flush()).is_err() {
            break;
        }
    }
}
