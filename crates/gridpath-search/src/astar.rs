use crate::engine::SearchEngine;
use crate::node::NodeId;

impl SearchEngine {
    /// A* expansion.
    ///
    /// Relaxation is identical to Dijkstra. The frontier priority is
    /// `f = g + h` with the octile estimate as `h`, computed once when the
    /// node joins the frontier.
    pub(crate) fn expand_astar(&mut self, current: NodeId, goal: NodeId) {
        let nbuf = self.take_neighbors(current);
        for &nb in nbuf.iter() {
            if self.is_explored(nb) {
                continue;
            }
            self.relax(current, nb);
            if !self.frontier_contains(nb) {
                let priority = self.graph.node(nb).g_cost + self.graph.distance(nb, goal);
                self.push_frontier(nb, priority);
            }
        }
        self.nbuf = nbuf;
    }
}

#[cfg(test)]
mod tests {
    use gridpath_core::Point;

    use crate::{Algorithm, Graph, Layout, SearchEngine, SearchStatus};

    #[test]
    fn f_score_is_cost_plus_estimate() {
        let goal = Point::new(4, 2);
        let mut e = SearchEngine::new(Graph::open(5, 5).unwrap());
        e.initialize(Point::new(0, 0), goal, Algorithm::AStar).unwrap();
        e.step().unwrap();
        for n in e.frontier_contents() {
            let f = n.g_cost() + crate::distance::octile(n.pos(), goal);
            assert_eq!(n.priority(), f);
        }
    }

    #[test]
    fn heuristic_keeps_the_search_on_the_row() {
        let run = |algorithm| {
            let mut e = SearchEngine::new(Graph::open(12, 12).unwrap());
            e.initialize(Point::new(0, 5), Point::new(11, 5), algorithm)
                .unwrap();
            assert_eq!(e.run_to_completion(), Ok(SearchStatus::Succeeded));
            e.explored_contents().count()
        };
        // A* walks the row: every cell on it has f = 11, everything else more.
        assert_eq!(run(Algorithm::AStar), 11);
        assert!(run(Algorithm::Dijkstra) > 50);
    }

    #[test]
    fn cheaper_route_to_a_queued_node_keeps_its_priority() {
        // (3, 1) is first queued from (2, 1) and later reached more cheaply
        // from (4, 1) while it still waits in the frontier.
        let l = Layout::parse(
            "
#...S
...#.
.....
G###.
",
        )
        .unwrap();
        let mut e = SearchEngine::from_config(&l.to_config(Algorithm::AStar)).unwrap();
        let p = Point::new(3, 1);
        let id = e.graph().try_id(p).unwrap();
        for _ in 0..8 {
            assert_eq!(e.step(), Ok(SearchStatus::Running));
        }
        assert!(e.frontier_contains(id));
        let before = e.graph().node(id).clone();
        assert_eq!(before.g_cost(), 5.0);
        let old_pred = e.graph().node(before.predecessor().unwrap()).pos();
        assert_eq!(old_pred, Point::new(2, 1));

        assert_eq!(e.step(), Ok(SearchStatus::Running));
        let after = e.graph().node(id);
        assert_eq!(after.g_cost(), 3.0);
        let new_pred = e.graph().node(after.predecessor().unwrap()).pos();
        assert_eq!(new_pred, Point::new(4, 1));
        assert_eq!(after.priority(), before.priority());
        assert_eq!(e.frontier_contents().filter(|n| n.pos() == p).count(), 1);

        assert_eq!(e.run_to_completion(), Ok(SearchStatus::Succeeded));
        assert_eq!(e.iteration_count(), 12);
        assert_eq!(e.goal_cost(), Some(7.0));
    }
}
