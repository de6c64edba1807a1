//! The active search path: boards reached and the moves that reached them.

use crate::board::{Board, Move};

/// Boards and moves along the branch currently being explored.
///
/// `history[i]` is the board after `path[i]`. Both vectors only grow and
/// shrink together through [`Trail::enter`].
#[derive(Debug, Default)]
pub struct Trail {
    history: Vec<Board>,
    path: Vec<Move>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a step and return a guard that pops it again unless committed
    pub fn enter(&mut self, board: Board, mv: Move) -> Frame<'_> {
        self.history.push(board);
        self.path.push(mv);
        Frame {
            trail: self,
            committed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn path(&self) -> &[Move] {
        &self.path
    }

    pub fn is_consistent(&self) -> bool {
        self.history.len() == self.path.len()
    }

    pub fn into_parts(self) -> (Vec<Board>, Vec<Move>) {
        (self.history, self.path)
    }
}

/// One pushed step of a [`Trail`].
///
/// Dropping the frame pops the step, so a failed branch is unwound on every
/// exit path, `?` included. [`Frame::commit`] keeps it.
pub struct Frame<'a> {
    trail: &'a mut Trail,
    committed: bool,
}

impl Frame<'_> {
    /// The trail, for pushing deeper steps
    pub fn trail(&mut self) -> &mut Trail {
        self.trail
    }

    /// Keep this step on the trail
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.trail.history.pop();
            self.trail.path.pop();
        }
    }
}
