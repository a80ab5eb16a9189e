//! Stepwise search driver shared by all four algorithms.

use std::fmt;
use std::time::{Duration, Instant};

use gridpath_core::Point;

use crate::config::{Algorithm, SearchConfig};
use crate::error::SearchError;
use crate::graph::Graph;
use crate::node::{Node, NodeId};
use crate::queue::PriorityQueue;

/// Lifecycle of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// No run has been initialized (or the board was edited since).
    #[default]
    Idle,
    Running,
    /// The goal entered the frontier and a path was reconstructed.
    Succeeded,
    /// The frontier ran dry before the goal was reached.
    Failed,
}

impl SearchStatus {
    /// Whether the run has ended.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

/// Frontier element: a node and the priority it was enqueued with.
///
/// A node's priority is only assigned while it is outside the frontier, so
/// the copy held here always equals [`Node::priority`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) node: NodeId,
    pub(crate) priority: f32,
}

fn frontier_key(e: &FrontierEntry) -> f32 {
    e.priority
}

pub(crate) type Frontier = PriorityQueue<FrontierEntry, f32>;

/// Orchestrates one pathfinding run over an owned [`Graph`].
///
/// The host calls [`initialize`](Self::initialize) and then
/// [`step`](Self::step) at whatever cadence it likes; each step pops one
/// frontier node and expands its neighbours. Calling `initialize` again
/// discards the current run.
#[derive(Debug)]
pub struct SearchEngine {
    pub(crate) graph: Graph,
    pub(crate) algorithm: Algorithm,
    pub(crate) start: Option<NodeId>,
    pub(crate) goal: Option<NodeId>,
    pub(crate) frontier: Frontier,
    pub(crate) explored: Vec<NodeId>,
    pub(crate) explored_flags: Vec<bool>,
    pub(crate) path: Vec<NodeId>,
    pub(crate) status: SearchStatus,
    iterations: usize,
    started: Option<Instant>,
    elapsed: Duration,
    // scratch buffer for the neighbours of the node being expanded
    pub(crate) nbuf: Vec<NodeId>,
}

impl SearchEngine {
    /// Wrap `graph` in an idle engine.
    pub fn new(graph: Graph) -> Self {
        let len = graph.len();
        Self {
            graph,
            algorithm: Algorithm::default(),
            start: None,
            goal: None,
            frontier: PriorityQueue::with_capacity(len, frontier_key as fn(&FrontierEntry) -> f32),
            explored: Vec::with_capacity(len),
            explored_flags: vec![false; len],
            path: Vec::new(),
            status: SearchStatus::Idle,
            iterations: 0,
            started: None,
            elapsed: Duration::ZERO,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Build the configured graph and initialize a run on it.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let mut engine = Self::new(config.build_graph()?);
        engine.initialize(config.start, config.goal, config.algorithm)?;
        Ok(engine)
    }

    /// Start a new run from `start` to `goal`, discarding any previous one.
    ///
    /// Search state of every node is reset; the obstacle layout is kept.
    pub fn initialize(
        &mut self,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
    ) -> Result<(), SearchError> {
        let start_id = self.graph.try_id(start)?;
        let goal_id = self.graph.try_id(goal)?;

        self.graph.reset_search_state_only();
        self.clear_run();

        self.algorithm = algorithm;
        self.start = Some(start_id);
        self.goal = Some(goal_id);

        let node = self.graph.node_mut(start_id);
        node.g_cost = 0.0;
        node.priority = 0.0;
        self.frontier.enqueue(FrontierEntry {
            node: start_id,
            priority: 0.0,
        });

        self.status = SearchStatus::Running;
        self.started = Some(Instant::now());
        log::debug!("{algorithm} search from {start} to {goal} initialized");
        Ok(())
    }

    /// Perform one unit of work: pop the best frontier node, expand it, and
    /// check for termination.
    pub fn step(&mut self) -> Result<SearchStatus, SearchError> {
        if self.status != SearchStatus::Running {
            return Err(SearchError::InvalidState(self.status));
        }
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            return Err(SearchError::InvalidState(self.status));
        };

        if self.frontier.is_empty() {
            self.finish(SearchStatus::Failed);
            log::debug!(
                "{} search exhausted after {} iterations, {} cells explored",
                self.algorithm,
                self.iterations,
                self.explored.len()
            );
            return Ok(self.status);
        }

        let current = self.frontier.dequeue()?.node;
        self.iterations += 1;
        self.elapsed = self.started.map_or(Duration::ZERO, |t| t.elapsed());
        if !self.explored_flags[current.0] {
            self.explored_flags[current.0] = true;
            self.explored.push(current);
        }
        log::trace!(
            "step {}: expanding {} (frontier {})",
            self.iterations,
            self.graph.node(current).pos(),
            self.frontier.count()
        );

        match self.algorithm {
            Algorithm::BreadthFirst => self.expand_breadth_first(current),
            Algorithm::Dijkstra => self.expand_dijkstra(current),
            Algorithm::GreedyBestFirst => self.expand_greedy_best_first(current, goal),
            Algorithm::AStar => self.expand_astar(current, goal),
        }

        // The goal counts as reached once it is discovered, not when it is
        // popped. Popping it directly only happens when it is the start.
        if current == goal || self.frontier_contains(goal) {
            self.path = self.reconstruct_path(goal);
            self.finish(SearchStatus::Succeeded);
            log::debug!(
                "{} search reached {} from {} in {} iterations: {} nodes, cost {}",
                self.algorithm,
                self.graph.node(goal).pos(),
                self.graph.node(start).pos(),
                self.iterations,
                self.path.len(),
                self.graph.node(goal).g_cost()
            );
        }
        Ok(self.status)
    }

    /// Step until the run ends.
    ///
    /// Fails with [`SearchError::InvalidState`] on an idle engine; a run that
    /// has already ended reports its status without stepping.
    pub fn run_to_completion(&mut self) -> Result<SearchStatus, SearchError> {
        if self.status == SearchStatus::Idle {
            return Err(SearchError::InvalidState(self.status));
        }
        while self.status == SearchStatus::Running {
            self.step()?;
        }
        Ok(self.status)
    }

    /// Remove every obstacle and discard the current run.
    pub fn clear_board(&mut self) {
        self.graph.reset_all();
        self.abandon();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for editing obstacles. Any in-flight run is discarded
    /// and the engine returns to [`SearchStatus::Idle`].
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.abandon();
        &mut self.graph
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn start(&self) -> Option<Point> {
        self.start.map(|id| self.graph.node(id).pos())
    }

    pub fn goal(&self) -> Option<Point> {
        self.goal.map(|id| self.graph.node(id).pos())
    }

    /// Frontier nodes in heap order (not sorted).
    pub fn frontier_contents(&self) -> impl Iterator<Item = &Node> + '_ {
        self.frontier.iter().map(|e| self.graph.node(e.node))
    }

    /// Explored nodes in the order they were finalized.
    pub fn explored_contents(&self) -> impl Iterator<Item = &Node> + '_ {
        self.explored.iter().map(|&id| self.graph.node(id))
    }

    /// The reconstructed path from start to goal; empty until the run
    /// succeeds.
    pub fn path(&self) -> impl Iterator<Item = &Node> + '_ {
        self.path.iter().map(|&id| self.graph.node(id))
    }

    /// Path coordinates from start to goal.
    pub fn path_points(&self) -> Vec<Point> {
        self.path().map(Node::pos).collect()
    }

    /// Number of frontier pops in the current run.
    #[inline]
    pub fn iteration_count(&self) -> usize {
        self.iterations
    }

    /// Wall time from `initialize` to the latest step.
    #[inline]
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed
    }

    /// Cost recorded for the goal once the run has succeeded.
    pub fn goal_cost(&self) -> Option<f32> {
        match (self.status, self.goal) {
            (SearchStatus::Succeeded, Some(goal)) => Some(self.graph.node(goal).g_cost()),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Internals shared by the expansion strategies
    // -----------------------------------------------------------------------

    #[inline]
    pub(crate) fn is_explored(&self, id: NodeId) -> bool {
        self.explored_flags[id.0]
    }

    /// O(frontier) membership scan.
    #[inline]
    pub(crate) fn frontier_contains(&self, id: NodeId) -> bool {
        self.frontier.contains_by(|e| e.node == id)
    }

    /// Cost of reaching `nb` through `current`.
    #[inline]
    pub(crate) fn tentative_cost(&self, current: NodeId, nb: NodeId) -> f32 {
        let cur = self.graph.node(current);
        self.graph.distance(current, nb) + cur.g_cost + cur.kind.cost()
    }

    /// Record `priority` on `nb` and push it onto the frontier.
    pub(crate) fn push_frontier(&mut self, nb: NodeId, priority: f32) {
        self.graph.node_mut(nb).priority = priority;
        self.frontier.enqueue(FrontierEntry { node: nb, priority });
    }

    /// Copy the neighbour list of `id` into the scratch buffer.
    pub(crate) fn take_neighbors(&mut self, id: NodeId) -> Vec<NodeId> {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(self.graph.node(id).neighbors());
        nbuf
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        self.elapsed = self.started.map_or(Duration::ZERO, |t| t.elapsed());
    }

    fn clear_run(&mut self) {
        self.frontier.clear();
        for &id in &self.explored {
            self.explored_flags[id.0] = false;
        }
        self.explored.clear();
        self.path.clear();
        self.iterations = 0;
        self.elapsed = Duration::ZERO;
        self.started = None;
    }

    fn abandon(&mut self) {
        self.graph.reset_search_state_only();
        self.clear_run();
        self.start = None;
        self.goal = None;
        self.status = SearchStatus::Idle;
    }
}
