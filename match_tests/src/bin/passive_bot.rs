// Scripted player: answers every turn with no orders. A harmless opponent.

use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !line.trim().eq_ignore_ascii_case("go") {
            continue;
        }
        if writeln!(stdout, "go").and_then(|()| stdout.flush()).is_err() {
            break;
        }
    }
}
