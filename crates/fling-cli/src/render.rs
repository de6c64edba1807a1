//! Text rendering of boards and solutions.
//!
//! ```text
//! +----+----+----+
//! |  0 |    |  2 |
//! +----+----+----+
//! ```
//! Each occupied cell shows its row-major label. With color on, pieces that
//! moved are highlighted and cells they left are marked.

use crossterm::style::Stylize;
use fling_core::{Board, GridSize, Move, Piece, Solution};

pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Draw `board` on its grid
    pub fn board(&self, board: &Board) -> String {
        self.draw(board, None)
    }

    /// Draw `after`, marking what changed since `before`
    pub fn step(&self, before: &Board, after: &Board) -> String {
        self.draw(after, Some(before))
    }

    /// One block per move: the move, then the board it produced
    pub fn solution(&self, solution: &Solution) -> String {
        let size = solution.initial().size();
        let mut out = String::new();
        let mut before = solution.initial();

        for (mv, after) in solution.steps() {
            out.push_str(&format!("{}\n\n", describe_move(size, mv)));
            out.push_str(&self.step(before, after));
            out.push('\n');
            before = after;
        }

        out
    }

    fn draw(&self, board: &Board, before: Option<&Board>) -> String {
        let size = board.size();
        let border = format!("{}+", "+----".repeat(size.cols));
        let mut out = String::new();

        out.push_str(&border);
        out.push('\n');
        for row in 0..size.rows {
            for col in 0..size.cols {
                let cell = Piece::new(row, col);
                out.push_str("| ");
                out.push_str(&self.cell(size, cell, board, before));
                out.push(' ');
            }
            out.push_str("|\n");
            out.push_str(&border);
            out.push('\n');
        }

        out
    }

    fn cell(&self, size: GridSize, cell: Piece, board: &Board, before: Option<&Board>) -> String {
        let occupied = board.contains(cell);
        let text = if occupied {
            format!("{:>2}", size.label(cell))
        } else {
            "  ".to_string()
        };

        let Some(before) = before.filter(|_| self.color) else {
            return text;
        };

        match (before.contains(cell), occupied) {
            (false, true) => text.as_str().green().bold().to_string(),
            (true, false) => "··".dark_grey().to_string(),
            _ => text,
        }
    }
}

/// `" 0 (0, 0) ->  5 (0, 5)"`
pub fn describe_move(size: GridSize, mv: &Move) -> String {
    format!(
        "{:>2} {} -> {:>2} {}",
        size.label(mv.source),
        mv.source,
        size.label(mv.destination),
        mv.destination
    )
}
