//! Stepwise graph search on 4-connected grids.
//!
//! A [`Graph`] owns one [`Node`] per cell and caches each open cell's open
//! orthogonal neighbours. A [`SearchEngine`] runs one search at a time over
//! it, one frontier pop per [`step`](SearchEngine::step), so a host can
//! animate progress at any pace:
//!
//! | [`Algorithm`] | Frontier priority | Re-relaxes frontier nodes |
//! |---|---|---|
//! | `BreadthFirst` | discovery step | no |
//! | `Dijkstra` | travelled cost `g` | yes |
//! | `GreedyBestFirst` | octile estimate to goal `h` | no |
//! | `AStar` | `g + h` | yes |
//!
//! A run ends successfully as soon as the goal enters the frontier, and
//! fails when the frontier empties.

mod astar;
mod bfs;
mod config;
mod dijkstra;
pub mod distance;
mod engine;
mod error;
mod graph;
mod greedy;
pub mod layout;
mod mapgen;
mod node;
mod overlay;
mod path;
mod queue;

pub use config::{Algorithm, ParseAlgorithmError, SearchConfig};
pub use engine::{SearchEngine, SearchStatus};
pub use error::SearchError;
pub use graph::Graph;
pub use layout::{Layout, LayoutError};
pub use node::{Node, NodeId, NodeKind};
pub use overlay::CellState;
pub use queue::PriorityQueue;
