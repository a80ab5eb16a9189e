//! Per-cell view of a run for hosts that draw the board.

use gridpath_core::Point;

use crate::engine::SearchEngine;
use crate::error::SearchError;

/// What a host should show for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Open,
    Blocked,
    Frontier,
    Explored,
    Path,
    Start,
    Goal,
}

impl CellState {
    /// Single-character rendering, matching the layout syntax where one
    /// exists.
    pub fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Blocked => '#',
            Self::Frontier => '+',
            Self::Explored => '~',
            Self::Path => '*',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }
}

impl SearchEngine {
    /// Row-major state of every cell.
    ///
    /// Later layers win: frontier, then explored, then path, then the start
    /// and goal markers.
    pub fn overlay(&self) -> Vec<CellState> {
        let mut cells: Vec<CellState> = self
            .graph
            .nodes()
            .map(|n| {
                if n.is_blocked() {
                    CellState::Blocked
                } else {
                    CellState::Open
                }
            })
            .collect();
        for e in self.frontier.iter() {
            cells[e.node.index()] = CellState::Frontier;
        }
        for id in &self.explored {
            cells[id.index()] = CellState::Explored;
        }
        for id in &self.path {
            cells[id.index()] = CellState::Path;
        }
        if let Some(start) = self.start {
            cells[start.index()] = CellState::Start;
        }
        if let Some(goal) = self.goal {
            cells[goal.index()] = CellState::Goal;
        }
        cells
    }

    /// State of the cell at `p`, with the same precedence as
    /// [`overlay`](Self::overlay).
    pub fn cell_state(&self, p: Point) -> Result<CellState, SearchError> {
        let id = self.graph.try_id(p)?;
        let state = if self.goal == Some(id) {
            CellState::Goal
        } else if self.start == Some(id) {
            CellState::Start
        } else if self.path.contains(&id) {
            CellState::Path
        } else if self.is_explored(id) {
            CellState::Explored
        } else if self.frontier_contains(id) {
            CellState::Frontier
        } else if self.graph.node(id).is_blocked() {
            CellState::Blocked
        } else {
            CellState::Open
        };
        Ok(state)
    }

    /// The overlay as text, one line per row, northmost row first.
    pub fn render_text(&self) -> String {
        let w = self.graph.width() as usize;
        let overlay = self.overlay();
        let mut out = String::with_capacity(self.graph.len() + self.graph.height() as usize);
        for (i, row) in overlay.chunks(w).rev().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.glyph()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Algorithm, Layout, SearchStatus};

    #[test]
    fn idle_board_shows_only_obstacles() {
        let l = Layout::parse("S#.\n..G").unwrap();
        let e = SearchEngine::new(l.to_config(Algorithm::Dijkstra).build_graph().unwrap());
        assert_eq!(e.render_text(), ".#.\n...");
    }

    #[test]
    fn finished_run_layers_path_over_explored() {
        let l = Layout::parse("S..\n.#.\n..G").unwrap();
        let mut e = SearchEngine::from_config(&l.to_config(Algorithm::BreadthFirst)).unwrap();
        assert_eq!(e.run_to_completion(), Ok(SearchStatus::Succeeded));
        let overlay = e.overlay();
        assert_eq!(overlay[6], CellState::Start);
        assert_eq!(overlay[2], CellState::Goal);
        assert_eq!(e.cell_state(Point::new(1, 1)), Ok(CellState::Blocked));
        let path_cells = overlay.iter().filter(|&&c| c == CellState::Path).count();
        assert_eq!(path_cells, e.path_points().len() - 2);
    }

    #[test]
    fn cell_state_agrees_with_overlay() {
        let l = Layout::parse("S...#\n.##..\n...#G").unwrap();
        let mut e = SearchEngine::from_config(&l.to_config(Algorithm::AStar)).unwrap();
        loop {
            let overlay = e.overlay();
            for p in e.graph().range() {
                let i = e.graph().range().index_of(p).unwrap();
                assert_eq!(e.cell_state(p), Ok(overlay[i]), "{p}");
            }
            if e.status().is_terminal() {
                break;
            }
            e.step().unwrap();
        }
        assert_eq!(e.status(), SearchStatus::Succeeded);
    }

    #[test]
    fn render_prints_northmost_row_first() {
        let text = "S..\n.#.\n..G";
        let l = Layout::parse(text).unwrap();
        let e = SearchEngine::from_config(&l.to_config(Algorithm::Dijkstra)).unwrap();
        assert_eq!(e.render_text(), text);
    }

    #[test]
    fn cell_state_out_of_bounds() {
        let e = SearchEngine::new(crate::Graph::open(2, 2).unwrap());
        assert_eq!(
            e.cell_state(Point::new(2, 2)),
            Err(SearchError::OutOfBounds(Point::new(2, 2)))
        );
    }
}
