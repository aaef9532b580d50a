// Child-process management for one player program.
//
// The referee speaks to each player over the player's standard streams:
// stdin carries the framed state blocks, stdout carries order lines (fed to
// the session through a reader thread), and stderr is drained by a second
// thread into the diagnostic log so a crashing bot leaves a trace. Both
// auxiliary threads only read; the control thread is the sole writer.
//
// The player command is split on whitespace into program + arguments.
// Commands that need shell features should ship a wrapper script.

use std::io::{self, BufRead, BufReader};
use std::process::{Child, ChildStderr, ChildStdin, Command, Stdio};
use std::thread;

use conquest_engine::types::PlayerId;
use log::debug;

use crate::session::{ProtocolSession, spawn_line_reader};

/// A spawned player program plus its protocol session.
#[derive(Debug)]
pub struct PlayerProcess {
    /// 1-based seat number (spawn order + 1).
    pub id: PlayerId,
    pub session: ProtocolSession<ChildStdin>,
    child: Child,
    running: bool,
}

impl PlayerProcess {
    /// Spawn `command` with all three standard streams piped and wire up
    /// the reader threads.
    pub fn spawn(command: &str, id: PlayerId) -> io::Result<PlayerProcess> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty player command"))?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // The takes cannot fail: every stream was requested piped.
        let stdin = child.stdin.take().expect("stdin piped");
        let stdout = child.stdout.take().expect("stdout piped");
        let stderr = child.stderr.take().expect("stderr piped");

        spawn_stderr_forwarder(id, stderr);
        let session = ProtocolSession::new(stdin, spawn_line_reader(stdout));

        debug!("player {id} spawned: {command}");
        Ok(PlayerProcess {
            id,
            session,
            child,
            running: true,
        })
    }

    /// True until `kill` is called. A process that exited on its own still
    /// counts as running here; its next exchange surfaces the failure and
    /// the referee kills it then.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Terminate and reap the child. Idempotent.
    pub fn kill(&mut self) {
        if self.running {
            self.running = false;
            let _ = self.child.kill();
            let _ = self.child.wait();
            debug!("player {} terminated", self.id);
        }
    }
}

impl Drop for PlayerProcess {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Drain the player's stderr into the diagnostic log, one line at a time.
fn spawn_stderr_forwarder(id: PlayerId, stderr: ChildStderr) {
    thread::spawn(move || {
        for line in BufReader::new(stderr).lines() {
            let Ok(line) = line else { break };
            debug!("player {id} stderr: {line}");
        }
    });
}
