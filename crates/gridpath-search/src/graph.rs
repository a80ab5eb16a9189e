//! The grid graph: node arena, adjacency and obstacle editing.

use gridpath_core::{Point, Range};

use crate::distance;
use crate::error::SearchError;
use crate::node::{Node, NodeId, NodeKind};

/// Owner of every [`Node`] of a `width` x `height` grid.
///
/// Nodes live in a dense row-major arena and are addressed by [`NodeId`].
/// Each open node caches its open orthogonal neighbours; blocked nodes have
/// no neighbours and appear in no neighbour list.
#[derive(Debug, Clone)]
pub struct Graph {
    range: Range,
    nodes: Vec<Node>,
}

impl Graph {
    /// Allocate a grid, asking `kind_at` for the kind of every cell.
    pub fn build(
        width: i32,
        height: i32,
        kind_at: impl Fn(Point) -> NodeKind,
    ) -> Result<Self, SearchError> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(SearchError::InvalidDimensions { width, height });
        }
        let range = Range::with_size(width, height);
        let nodes = range.iter().map(|p| Node::new(p, kind_at(p))).collect();
        let mut graph = Self { range, nodes };
        graph.rebuild_all_neighbors();
        Ok(graph)
    }

    /// A grid with every cell open.
    pub fn open(width: i32, height: i32) -> Result<Self, SearchError> {
        Self::build(width, height, |_| NodeKind::Open)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// The grid rectangle, anchored at the origin.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    /// Id of the node at `p`, or `None` outside the grid.
    #[inline]
    pub fn id(&self, p: Point) -> Option<NodeId> {
        self.range.index_of(p).map(NodeId)
    }

    /// Id of the node at `p`, failing with [`SearchError::OutOfBounds`].
    #[inline]
    pub fn try_id(&self, p: Point) -> Result<NodeId, SearchError> {
        self.id(p).ok_or(SearchError::OutOfBounds(p))
    }

    /// Node behind `id`.
    ///
    /// Ids are only handed out by this graph, so they are always valid.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Node at `p`.
    pub fn node_at(&self, p: Point) -> Result<&Node, SearchError> {
        Ok(self.node(self.try_id(p)?))
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// The open orthogonal neighbours of `p`, in north, east, south, west
    /// order. A blocked cell has none.
    pub fn neighbors_of(&self, p: Point) -> Result<impl Iterator<Item = &Node> + '_, SearchError> {
        let id = self.try_id(p)?;
        Ok(self.node(id).neighbors.iter().map(|&n| self.node(n)))
    }

    /// Set or clear the obstacle at `p` and rebuild the adjacency it affects.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), SearchError> {
        let id = self.try_id(p)?;
        let kind = if blocked {
            NodeKind::Blocked
        } else {
            NodeKind::Open
        };
        if self.node(id).kind == kind {
            return Ok(());
        }
        self.node_mut(id).kind = kind;
        self.rebuild_around(p);
        log::debug!("cell {p} is now {kind:?}");
        Ok(())
    }

    /// Flip the cell at `p` between open and blocked, returning its new kind.
    pub fn toggle(&mut self, p: Point) -> Result<NodeKind, SearchError> {
        let blocked = !self.node_at(p)?.is_blocked();
        self.set_blocked(p, blocked)?;
        Ok(self.node_at(p)?.kind)
    }

    /// Coordinates of every blocked cell, row-major.
    pub fn blocked_cells(&self) -> Vec<Point> {
        self.nodes
            .iter()
            .filter(|n| n.is_blocked())
            .map(|n| n.pos)
            .collect()
    }

    /// Octile distance between two nodes (see [`distance::octile`]).
    #[inline]
    pub fn distance(&self, a: NodeId, b: NodeId) -> f32 {
        distance::octile(self.node(a).pos, self.node(b).pos)
    }

    /// Clear search state and every obstacle.
    pub fn reset_all(&mut self) {
        for n in self.nodes.iter_mut() {
            n.reset();
            n.kind = NodeKind::Open;
        }
        self.rebuild_all_neighbors();
    }

    /// Clear search state, keeping the obstacle layout.
    pub fn reset_search_state_only(&mut self) {
        for n in self.nodes.iter_mut() {
            n.reset();
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    fn rebuild_neighbors(&mut self, id: NodeId) {
        let mut buf = std::mem::take(&mut self.nodes[id.0].neighbors);
        buf.clear();
        let node = self.node(id);
        if !node.is_blocked() {
            for np in node.pos.cardinal_neighbors() {
                match self.id(np) {
                    Some(nid) if !self.node(nid).is_blocked() => buf.push(nid),
                    _ => {}
                }
            }
        }
        self.nodes[id.0].neighbors = buf;
    }

    /// Rebuild `p` and the four cells whose lists may reference it.
    fn rebuild_around(&mut self, p: Point) {
        if let Some(id) = self.id(p) {
            self.rebuild_neighbors(id);
        }
        for np in p.cardinal_neighbors() {
            if let Some(nid) = self.id(np) {
                self.rebuild_neighbors(nid);
            }
        }
    }

    pub(crate) fn rebuild_all_neighbors(&mut self) {
        for i in 0..self.nodes.len() {
            self.rebuild_neighbors(NodeId(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions<'a>(it: impl Iterator<Item = &'a Node>) -> Vec<Point> {
        it.map(|n| n.pos()).collect()
    }

    #[test]
    fn build_rejects_non_positive_dimensions() {
        assert_eq!(
            Graph::open(0, 4).unwrap_err(),
            SearchError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert!(Graph::open(3, -1).is_err());
        assert!(Graph::open(i32::MAX, 2).is_err());
    }

    #[test]
    fn nodes_carry_their_coordinates() {
        let g = Graph::open(4, 3).unwrap();
        assert_eq!(g.len(), 12);
        for p in g.range() {
            let n = g.node_at(p).unwrap();
            assert_eq!((n.x(), n.y()), (p.x, p.y));
            assert!(n.g_cost().is_infinite());
        }
    }

    #[test]
    fn neighbors_follow_fixed_order() {
        let g = Graph::open(3, 3).unwrap();
        let ns = positions(g.neighbors_of(Point::new(1, 1)).unwrap());
        assert_eq!(
            ns,
            vec![
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(0, 1),
            ]
        );
        let corner = positions(g.neighbors_of(Point::new(0, 0)).unwrap());
        assert_eq!(corner, vec![Point::new(0, 1), Point::new(1, 0)]);
    }

    #[test]
    fn neighbors_of_out_of_bounds() {
        let g = Graph::open(3, 3).unwrap();
        assert!(matches!(
            g.neighbors_of(Point::new(3, 0)),
            Err(SearchError::OutOfBounds(_))
        ));
    }

    #[test]
    fn build_excludes_blocked_cells() {
        let wall = Point::new(1, 0);
        let g = Graph::build(3, 2, |p| {
            if p == wall {
                NodeKind::Blocked
            } else {
                NodeKind::Open
            }
        })
        .unwrap();
        for n in g.nodes() {
            assert!(n.neighbors().iter().all(|&id| g.node(id).pos() != wall));
            assert!(!n.neighbors().contains(&g.try_id(n.pos()).unwrap()));
        }
        assert_eq!(g.neighbors_of(wall).unwrap().count(), 0);
    }

    #[test]
    fn set_blocked_drops_and_restores_edges() {
        let mut g = Graph::open(3, 3).unwrap();
        let center = Point::new(1, 1);
        let before: Vec<Vec<Point>> = g
            .range()
            .iter()
            .map(|p| positions(g.neighbors_of(p).unwrap()))
            .collect();

        g.set_blocked(center, true).unwrap();
        for p in g.range() {
            assert!(!positions(g.neighbors_of(p).unwrap()).contains(&center));
        }
        assert_eq!(g.neighbors_of(center).unwrap().count(), 0);

        g.set_blocked(center, false).unwrap();
        let after: Vec<Vec<Point>> = g
            .range()
            .iter()
            .map(|p| positions(g.neighbors_of(p).unwrap()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn set_blocked_out_of_bounds() {
        let mut g = Graph::open(2, 2).unwrap();
        assert_eq!(
            g.set_blocked(Point::new(-1, 0), true),
            Err(SearchError::OutOfBounds(Point::new(-1, 0)))
        );
    }

    #[test]
    fn toggle_flips_kind() {
        let mut g = Graph::open(2, 2).unwrap();
        let p = Point::new(1, 1);
        assert_eq!(g.toggle(p).unwrap(), NodeKind::Blocked);
        assert_eq!(g.blocked_cells(), vec![p]);
        assert_eq!(g.toggle(p).unwrap(), NodeKind::Open);
        assert!(g.blocked_cells().is_empty());
    }

    #[test]
    fn resets_differ_in_layout_handling() {
        let mut g = Graph::open(3, 1).unwrap();
        g.set_blocked(Point::new(1, 0), true).unwrap();
        let id = g.try_id(Point::new(0, 0)).unwrap();
        g.node_mut(id).g_cost = 2.0;
        g.node_mut(id).predecessor = Some(id);

        g.reset_search_state_only();
        assert!(g.node(id).g_cost().is_infinite());
        assert_eq!(g.node(id).predecessor(), None);
        assert_eq!(g.blocked_cells(), vec![Point::new(1, 0)]);

        g.reset_all();
        assert!(g.blocked_cells().is_empty());
        assert_eq!(g.neighbors_of(Point::new(0, 0)).unwrap().count(), 1);
    }

    #[test]
    fn distance_uses_octile_estimate() {
        let g = Graph::open(5, 5).unwrap();
        let a = g.try_id(Point::new(0, 0)).unwrap();
        let b = g.try_id(Point::new(1, 0)).unwrap();
        let c = g.try_id(Point::new(2, 2)).unwrap();
        assert_eq!(g.distance(a, b), 1.0);
        assert!((g.distance(a, c) - 2.8).abs() < 1e-5);
    }
}
