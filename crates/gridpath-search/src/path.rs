use crate::engine::SearchEngine;
use crate::node::NodeId;

impl SearchEngine {
    /// Follow predecessor links back from `goal` and return the path in
    /// start-to-goal order.
    ///
    /// The walk ends at the first node without a predecessor, normally the
    /// start; a goal without one yields a single-node path.
    pub(crate) fn reconstruct_path(&self, goal: NodeId) -> Vec<NodeId> {
        let mut path = vec![goal];
        let mut cur = self.graph.node(goal).predecessor();
        while let Some(id) = cur {
            path.push(id);
            cur = self.graph.node(id).predecessor();
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use gridpath_core::Point;

    use crate::{Algorithm, Graph, SearchEngine};

    #[test]
    fn walks_predecessors_back_to_start() {
        let mut e = SearchEngine::new(Graph::open(4, 1).unwrap());
        let ids: Vec<_> = (0..4)
            .map(|x| e.graph.try_id(Point::new(x, 0)).unwrap())
            .collect();
        for w in ids.windows(2) {
            e.graph.node_mut(w[1]).predecessor = Some(w[0]);
        }
        assert_eq!(e.reconstruct_path(ids[3]), ids);
        assert_eq!(e.reconstruct_path(ids[0]), vec![ids[0]]);
    }

    #[test]
    fn succeeded_paths_are_adjacent_chains() {
        for algorithm in Algorithm::ALL {
            let mut e = SearchEngine::new(Graph::open(6, 4).unwrap());
            e.graph_mut().set_blocked(Point::new(2, 1), true).unwrap();
            e.graph_mut().set_blocked(Point::new(2, 2), true).unwrap();
            e.initialize(Point::new(0, 2), Point::new(5, 1), algorithm)
                .unwrap();
            e.run_to_completion().unwrap();
            let path = e.path_points();
            assert_eq!(path.first(), Some(&Point::new(0, 2)), "{algorithm}");
            assert_eq!(path.last(), Some(&Point::new(5, 1)), "{algorithm}");
            for w in path.windows(2) {
                assert!(w[0].is_cardinal_neighbor(w[1]), "{algorithm}: {w:?}");
                assert!(!e.graph().node_at(w[1]).unwrap().is_blocked());
            }
        }
    }
}
