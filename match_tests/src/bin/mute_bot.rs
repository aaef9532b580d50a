// Scripted player: reads state forever and never answers. The referee must
// time it out and drop it.

use std::io::{self, BufRead};

fn main() {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if line.is_err() {
            break;
        }
    }
}
