use crate::engine::SearchEngine;
use crate::node::NodeId;

impl SearchEngine {
    /// Breadth-first expansion.
    ///
    /// Each neighbour is discovered at most once. Its priority is the size of
    /// the explored set at discovery time, which grows by one per step, so
    /// the min-heap hands nodes back in discovery order.
    pub(crate) fn expand_breadth_first(&mut self, current: NodeId) {
        let nbuf = self.take_neighbors(current);
        for &nb in nbuf.iter() {
            if self.is_explored(nb) || self.frontier_contains(nb) {
                continue;
            }
            let g = self.tentative_cost(current, nb);
            let node = self.graph.node_mut(nb);
            node.g_cost = g;
            node.predecessor = Some(current);
            let priority = self.explored.len() as f32;
            self.push_frontier(nb, priority);
        }
        self.nbuf = nbuf;
    }
}
