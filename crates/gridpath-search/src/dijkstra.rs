use crate::engine::SearchEngine;
use crate::node::NodeId;

impl SearchEngine {
    /// Dijkstra expansion.
    ///
    /// Unexplored neighbours are relaxed even while they sit in the frontier.
    /// Priority is the travelled cost and is only assigned when the node
    /// joins the frontier; a later relaxation lowers `g_cost` but leaves the
    /// queued priority alone.
    pub(crate) fn expand_dijkstra(&mut self, current: NodeId) {
        let nbuf = self.take_neighbors(current);
        for &nb in nbuf.iter() {
            if self.is_explored(nb) {
                continue;
            }
            self.relax(current, nb);
            if !self.frontier_contains(nb) {
                let priority = self.graph.node(nb).g_cost;
                self.push_frontier(nb, priority);
            }
        }
        self.nbuf = nbuf;
    }

    /// Route `nb` through `current` if that is its first or a cheaper path.
    pub(crate) fn relax(&mut self, current: NodeId, nb: NodeId) {
        let tentative = self.tentative_cost(current, nb);
        let node = self.graph.node_mut(nb);
        if node.g_cost.is_infinite() || tentative < node.g_cost {
            node.g_cost = tentative;
            node.predecessor = Some(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use gridpath_core::Point;

    use crate::{Algorithm, Graph, SearchEngine, SearchStatus};

    #[test]
    fn priority_matches_cost_on_entry() {
        let mut e = SearchEngine::new(Graph::open(4, 4).unwrap());
        e.initialize(Point::new(0, 0), Point::new(3, 3), Algorithm::Dijkstra)
            .unwrap();
        e.step().unwrap();
        e.step().unwrap();
        for n in e.frontier_contents() {
            assert_eq!(n.priority(), n.g_cost());
        }
    }

    #[test]
    fn routes_around_a_wall() {
        // ...
        // .#.
        // .#.
        let mut g = Graph::open(3, 3).unwrap();
        g.set_blocked(Point::new(1, 0), true).unwrap();
        g.set_blocked(Point::new(1, 1), true).unwrap();
        let mut e = SearchEngine::new(g);
        e.initialize(Point::new(0, 0), Point::new(2, 0), Algorithm::Dijkstra)
            .unwrap();
        assert_eq!(e.run_to_completion(), Ok(SearchStatus::Succeeded));
        assert_eq!(
            e.path_points(),
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(2, 0),
            ]
        );
        assert_eq!(e.goal_cost(), Some(6.0));
    }
}
