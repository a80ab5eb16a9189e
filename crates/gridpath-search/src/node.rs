use gridpath_core::Point;

/// Handle of a [`Node`] inside its [`Graph`](crate::Graph).
///
/// The graph stores nodes in a dense row-major arena; a `NodeId` is an
/// index into it and stays valid for the graph's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the graph's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a cell can be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    #[default]
    Open = 0,
    Blocked = 1,
}

impl NodeKind {
    /// Extra cost charged when leaving a cell of this kind.
    ///
    /// This is the enumerant's integer value, so open cells cost nothing.
    #[inline]
    pub fn cost(self) -> f32 {
        self as i32 as f32
    }
}

/// One grid cell plus its search bookkeeping.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) pos: Point,
    pub(crate) kind: NodeKind,
    pub(crate) g_cost: f32,
    pub(crate) priority: f32,
    pub(crate) predecessor: Option<NodeId>,
    pub(crate) neighbors: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(pos: Point, kind: NodeKind) -> Self {
        Self {
            pos,
            kind,
            g_cost: f32::INFINITY,
            priority: 0.0,
            predecessor: None,
            neighbors: Vec::with_capacity(4),
        }
    }

    /// Grid coordinates.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.kind == NodeKind::Blocked
    }

    /// Distance travelled from the start of the current run;
    /// `f32::INFINITY` while unvisited.
    #[inline]
    pub fn g_cost(&self) -> f32 {
        self.g_cost
    }

    /// Frontier ordering key assigned when the node was last enqueued.
    #[inline]
    pub fn priority(&self) -> f32 {
        self.priority
    }

    /// Back-reference used for path reconstruction.
    #[inline]
    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    /// Open orthogonal neighbours in north, east, south, west order.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Clear the per-run search fields; the cell kind is kept.
    pub(crate) fn reset(&mut self) {
        self.g_cost = f32::INFINITY;
        self.priority = 0.0;
        self.predecessor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_cost_is_the_enumerant() {
        assert_eq!(NodeKind::Open.cost(), 0.0);
        assert_eq!(NodeKind::Blocked.cost(), 1.0);
    }

    #[test]
    fn reset_keeps_kind_and_edges() {
        let mut n = Node::new(Point::new(1, 2), NodeKind::Blocked);
        n.g_cost = 3.0;
        n.priority = 7.5;
        n.predecessor = Some(NodeId(4));
        n.neighbors.push(NodeId(9));
        n.reset();
        assert!(n.g_cost().is_infinite());
        assert_eq!(n.priority(), 0.0);
        assert_eq!(n.predecessor(), None);
        assert_eq!(n.kind(), NodeKind::Blocked);
        assert_eq!(n.neighbors(), &[NodeId(9)]);
    }
}
