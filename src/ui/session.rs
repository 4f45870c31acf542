//! Game session for the GUI: a worker thread that owns the runner
//!
//! The UI never touches the [`GameRunner`] directly. It sends [`Command`]s
//! over a channel and receives [`SessionEvent`]s carrying read-only
//! [`Snapshot`]s, so exactly one thread ever mutates the game.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::board::{BoardState, Pos, Stone};
use crate::engine::MoveSelector;
use crate::runner::{GameRunner, GameStatus, MoveError};

/// Requests from the UI to the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Human move; the worker answers with the AI move right after
    Play(Pos),
    Restart,
}

/// The AI's most recent move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiMove {
    pub pos: Pos,
    pub score: i32,
    pub elapsed: Duration,
}

/// What the UI draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: GameStatus,
    pub last_ai: Option<AiMove>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The human move was accepted and the AI is searching
    AiThinking(Snapshot),
    Updated(Snapshot),
}

/// UI-side handle to the worker
pub struct GameSession {
    commands: Sender<Command>,
    events: Receiver<SessionEvent>,
    snapshot: Snapshot,
    thinking_since: Option<Instant>,
    disconnected: bool,
}

impl GameSession {
    /// Move the runner onto a new worker thread.
    pub fn spawn<S: MoveSelector + 'static>(runner: GameRunner<S>) -> Self {
        let (command_tx, command_rx) = channel();
        let (event_tx, event_rx) = channel();
        let snapshot = Snapshot {
            status: runner.status(),
            last_ai: None,
            message: None,
        };

        thread::spawn(move || run_worker(runner, command_rx, event_tx));

        Self {
            commands: command_tx,
            events: event_rx,
            snapshot,
            thinking_since: None,
            disconnected: false,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.thinking_since.is_some()
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        self.thinking_since.map(|t| t.elapsed())
    }

    /// Ask for a human move. Ignored until the previous move is settled.
    pub fn play(&mut self, pos: Pos) {
        if self.is_ai_thinking() {
            self.snapshot.message = Some("AI is thinking".to_string());
            return;
        }
        self.thinking_since = Some(Instant::now());
        self.send(Command::Play(pos));
    }

    pub fn restart(&mut self) {
        self.send(Command::Restart);
    }

    /// Drain pending events. Returns true when anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.on_disconnect();
                    break;
                }
            }
        }
        changed
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::AiThinking(snapshot) => {
                self.thinking_since.get_or_insert_with(Instant::now);
                self.snapshot = snapshot;
            }
            SessionEvent::Updated(snapshot) => {
                self.thinking_since = None;
                self.snapshot = snapshot;
            }
        }
    }

    fn send(&mut self, command: Command) {
        if self.commands.send(command).is_err() {
            self.on_disconnect();
        }
    }

    fn on_disconnect(&mut self) {
        if !self.disconnected {
            warn!("game worker stopped");
            self.disconnected = true;
        }
        self.thinking_since = None;
        self.snapshot.message = Some("Game worker stopped".to_string());
    }
}

fn run_worker<S: MoveSelector>(
    mut runner: GameRunner<S>,
    commands: Receiver<Command>,
    events: Sender<SessionEvent>,
) {
    let mut last_ai: Option<AiMove> = None;

    // Ends when the UI drops its sender
    while let Ok(command) = commands.recv() {
        let event = match command {
            Command::Restart => {
                runner.restart(1);
                last_ai = None;
                SessionEvent::Updated(snapshot(&runner, None, None))
            }
            Command::Play(pos) => match runner.play(pos) {
                Err(e) => {
                    debug!(%pos, reason = %e, "human move refused");
                    SessionEvent::Updated(snapshot(
                        &runner,
                        last_ai,
                        Some(move_message(&e, runner.state())),
                    ))
                }
                Ok(()) if runner.is_finished() => {
                    SessionEvent::Updated(snapshot(&runner, last_ai, None))
                }
                Ok(()) => {
                    let thinking = SessionEvent::AiThinking(snapshot(&runner, last_ai, None));
                    if events.send(thinking).is_err() {
                        return;
                    }

                    let start = Instant::now();
                    match runner.aiplay() {
                        Ok(chosen) => {
                            last_ai = Some(AiMove {
                                pos: chosen.pos,
                                score: chosen.score,
                                elapsed: start.elapsed(),
                            });
                            SessionEvent::Updated(snapshot(&runner, last_ai, None))
                        }
                        Err(e) => {
                            warn!(reason = %e, "AI move failed");
                            SessionEvent::Updated(snapshot(
                                &runner,
                                last_ai,
                                Some(move_message(&e, runner.state())),
                            ))
                        }
                    }
                }
            },
        };

        if events.send(event).is_err() {
            return;
        }
    }
}

fn snapshot<S: MoveSelector>(
    runner: &GameRunner<S>,
    last_ai: Option<AiMove>,
    message: Option<String>,
) -> Snapshot {
    Snapshot {
        status: runner.status(),
        last_ai,
        message,
    }
}

fn move_message(error: &MoveError, board: &BoardState) -> String {
    match error {
        MoveError::GameOver => "Game is over".to_string(),
        MoveError::WrongTurn { .. } => "Not your turn".to_string(),
        MoveError::IllegalPosition(pos) => match board.value(*pos) {
            Ok(Stone::Empty) | Err(_) => "Cannot place a stone there".to_string(),
            Ok(_) => "Cell is occupied".to_string(),
        },
        MoveError::NoMoveAvailable => "AI could not find a move".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AIEngine;

    const WAIT: Duration = Duration::from_secs(30);

    fn session() -> GameSession {
        let runner = GameRunner::with_selector(9, 1, AIEngine::with_config(200)).unwrap();
        GameSession::spawn(runner)
    }

    /// Block until the worker sends its next settled snapshot
    fn wait_updated(session: &mut GameSession) {
        loop {
            let event = session.events.recv_timeout(WAIT).unwrap();
            let settled = matches!(event, SessionEvent::Updated(_));
            session.apply(event);
            if settled {
                return;
            }
        }
    }

    #[test]
    fn test_human_move_triggers_ai_reply() {
        let mut session = session();
        assert!(!session.is_ai_thinking());

        session.play(Pos::new(4, 4));
        wait_updated(&mut session);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.status.board[4][4], Stone::Black);
        assert_eq!(snapshot.status.next, Stone::Black);
        let ai = snapshot.last_ai.unwrap();
        assert_eq!(snapshot.status.board[ai.pos.row][ai.pos.col], Stone::White);
        assert!(snapshot.message.is_none());
        assert!(!session.is_ai_thinking());
    }

    #[test]
    fn test_refused_move_sets_message() {
        let mut session = session();
        session.play(Pos::new(4, 4));
        wait_updated(&mut session);

        session.play(Pos::new(4, 4));
        wait_updated(&mut session);
        assert_eq!(session.snapshot().message.as_deref(), Some("Cell is occupied"));
    }

    #[test]
    fn test_restart_clears_board() {
        let mut session = session();
        session.play(Pos::new(4, 4));
        wait_updated(&mut session);

        session.restart();
        wait_updated(&mut session);
        let snapshot = session.snapshot();
        assert!(snapshot.status.board.iter().flatten().all(|&s| s == Stone::Empty));
        assert!(snapshot.last_ai.is_none());
        assert!(!snapshot.status.finished);
    }

    #[test]
    fn test_move_messages() {
        let board = BoardState::new(9).unwrap().next(Pos::new(0, 0));
        assert_eq!(move_message(&MoveError::GameOver, &board), "Game is over");
        assert_eq!(
            move_message(&MoveError::IllegalPosition(Pos::new(0, 0)), &board),
            "Cell is occupied"
        );
        assert_eq!(
            move_message(&MoveError::IllegalPosition(Pos::new(9, 3)), &board),
            "Cannot place a stone there"
        );
    }

    #[test]
    fn test_out_of_bounds_move_is_not_called_occupied() {
        let mut session = session();
        session.play(Pos::new(4, 12));
        wait_updated(&mut session);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.message.as_deref(), Some("Cannot place a stone there"));
        assert!(snapshot.status.board.iter().flatten().all(|&s| s == Stone::Empty));
        assert!(snapshot.last_ai.is_none());
    }
}
