use crate::engine::SearchEngine;
use crate::node::NodeId;

impl SearchEngine {
    /// Greedy best-first expansion.
    ///
    /// Like breadth-first, each neighbour is discovered once, but it is
    /// ranked only by its estimated distance to `goal`. The travelled cost is
    /// still recorded for reporting.
    pub(crate) fn expand_greedy_best_first(&mut self, current: NodeId, goal: NodeId) {
        let nbuf = self.take_neighbors(current);
        for &nb in nbuf.iter() {
            if self.is_explored(nb) || self.frontier_contains(nb) {
                continue;
            }
            let g = self.tentative_cost(current, nb);
            let node = self.graph.node_mut(nb);
            node.g_cost = g;
            node.predecessor = Some(current);
            let priority = self.graph.distance(nb, goal);
            self.push_frontier(nb, priority);
        }
        self.nbuf = nbuf;
    }
}

#[cfg(test)]
mod tests {
    use gridpath_core::Point;

    use crate::{Algorithm, Graph, SearchEngine, SearchStatus};

    #[test]
    fn heads_straight_for_the_goal() {
        let mut e = SearchEngine::new(Graph::open(8, 8).unwrap());
        e.initialize(Point::new(0, 0), Point::new(7, 0), Algorithm::GreedyBestFirst)
            .unwrap();
        assert_eq!(e.run_to_completion(), Ok(SearchStatus::Succeeded));
        // Pops (0,0) .. (6,0); the goal is discovered on the last of them.
        assert_eq!(e.iteration_count(), 7);
        let explored: Vec<_> = e.explored_contents().map(|n| n.pos()).collect();
        assert_eq!(explored, (0..7).map(|x| Point::new(x, 0)).collect::<Vec<_>>());
        assert_eq!(e.path_points().len(), 8);
    }

    #[test]
    fn priority_is_heuristic_only() {
        let mut e = SearchEngine::new(Graph::open(5, 5).unwrap());
        e.initialize(Point::new(2, 2), Point::new(4, 3), Algorithm::GreedyBestFirst)
            .unwrap();
        e.step().unwrap();
        for n in e.frontier_contents() {
            let h = crate::distance::octile(n.pos(), Point::new(4, 3));
            assert_eq!(n.priority(), h);
            assert_eq!(n.g_cost(), 1.0);
        }
    }
}
