//! Random obstacle generation.

use gridpath_core::Point;
use rand::{Rng, RngExt};

use crate::graph::Graph;
use crate::node::NodeKind;

impl Graph {
    /// Block each open cell with probability `density` (clamped to 0..=1),
    /// never touching the cells in `keep`. Adjacency is rebuilt once at the
    /// end.
    ///
    /// Returns the number of newly blocked cells.
    pub fn scatter_blocked<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        density: f64,
        keep: &[Point],
    ) -> usize {
        let density = density.clamp(0.0, 1.0);
        let mut blocked = 0;
        for p in self.range() {
            if keep.contains(&p) {
                continue;
            }
            let Some(id) = self.id(p) else {
                continue;
            };
            if self.node(id).is_blocked() || !rng.random_bool(density) {
                continue;
            }
            self.node_mut(id).kind = NodeKind::Blocked;
            blocked += 1;
        }
        self.rebuild_all_neighbors();
        log::debug!("scattered {blocked} obstacles at density {density:.2}");
        blocked
    }
}
