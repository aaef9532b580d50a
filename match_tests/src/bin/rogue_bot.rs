// Scripted player: every turn it orders a launch from a planet that does
// not exist. The referee must drop it on its first turn.

use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !line.trim().eq_ignore_ascii_case("go") {
            continue;
        }
        let result = writeln!(stdout, "99 99 1").and_then(|()| writeln!(stdout, "go"));
        if result.and_then(|()| stdout.flush()).is_err() {
            break;
        }
    }
}
