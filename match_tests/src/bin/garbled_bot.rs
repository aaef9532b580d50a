// Scripted player: answers with a line that is not an order at all. The
// referee must treat it as malformed and drop the player.

use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !line.trim().eq_ignore_ascii_case("go") {
            continue;
        }
        let result = writeln!(stdout, "attack the big one").and_then(|()| writeln!(stdout, "go"));
        if result.and_then(|()| stdout.flush()).is_err() {
            break;
        }
    }
}
