//! Host-supplied run configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use gridpath_core::{Point, Range};

use crate::error::SearchError;
use crate::graph::Graph;
use crate::node::NodeKind;

/// The frontier expansion strategy of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
    BreadthFirst,
    GreedyBestFirst,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 4] = [
        Self::Dijkstra,
        Self::AStar,
        Self::BreadthFirst,
        Self::GreedyBestFirst,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
            Self::BreadthFirst => "Breadth First",
            Self::GreedyBestFirst => "Greedy Best First",
        }
    }

    /// The algorithm after this one in [`ALL`](Self::ALL), wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search algorithm \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Case-insensitive; spaces, dashes and underscores are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match norm.as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            "bfs" | "breadthfirst" | "breadthfirstsearch" => Ok(Self::BreadthFirst),
            "greedy" | "greedybestfirst" | "gbfs" => Ok(Self::GreedyBestFirst),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Everything a host needs to set up a board and a run.
///
/// `blocked` is the obstacle mask in sparse form: the coordinates of every
/// blocked cell. `step_interval` is pacing for the host only; the engine
/// never reads it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub grid_width: i32,
    pub grid_height: i32,
    pub blocked: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    pub step_interval: Duration,
}

impl SearchConfig {
    /// Board width used when none is given.
    pub const DEFAULT_WIDTH: i32 = 48;
    /// Board height used when none is given.
    pub const DEFAULT_HEIGHT: i32 = 24;

    /// An obstacle-free board of the given size, searching corner to corner.
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            algorithm: Algorithm::default(),
            grid_width: width,
            grid_height: height,
            blocked: Vec::new(),
            start: Point::ZERO,
            goal: Point::new(width - 1, height - 1),
            step_interval: Duration::from_millis(100),
        }
    }

    /// Check dimensions and that every coordinate lies on the board.
    pub fn validate(&self) -> Result<(), SearchError> {
        let (w, h) = (self.grid_width, self.grid_height);
        if w <= 0 || h <= 0 || w.checked_mul(h).is_none() {
            return Err(SearchError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        let range = Range::with_size(w, h);
        for &p in [self.start, self.goal].iter().chain(self.blocked.iter()) {
            if !range.contains(p) {
                return Err(SearchError::OutOfBounds(p));
            }
        }
        Ok(())
    }

    /// Build the board described by this configuration.
    pub fn build_graph(&self) -> Result<Graph, SearchError> {
        self.validate()?;
        let range = Range::with_size(self.grid_width, self.grid_height);
        let mut mask = vec![false; range.len()];
        for i in self.blocked.iter().filter_map(|&p| range.index_of(p)) {
            mask[i] = true;
        }
        Graph::build(self.grid_width, self.grid_height, |p| {
            match range.index_of(p) {
                Some(i) if mask[i] => NodeKind::Blocked,
                _ => NodeKind::Open,
            }
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::open(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let mut c = SearchConfig::open(6, 5);
        c.algorithm = Algorithm::AStar;
        c.blocked = vec![Point::new(2, 2)];
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let c: SearchConfig =
            serde_json::from_str(r#"{"algorithm":"BreadthFirst","goal":{"x":3,"y":1}}"#).unwrap();
        assert_eq!(c.algorithm, Algorithm::BreadthFirst);
        assert_eq!(c.grid_width, SearchConfig::DEFAULT_WIDTH);
        assert_eq!(c.goal, Point::new(3, 1));
        assert!(c.blocked.is_empty());
    }
}
