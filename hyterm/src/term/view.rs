use std::iter::FusedIterator;

use crate::{
    error::{Error, Result},
    symbol::Symbol,
    term::{NodeId, Term},
    walker::{PreOrder, walk},
};

/// Borrowed, read-only view of one node of a [`Term`].
///
/// A view is `Copy` and as cheap as a pair of pointers. It stays valid for as long as the term
/// is borrowed, which statically rules out mutation while views are alive.
#[derive(Clone, Copy)]
pub struct TermRef<'a> {
    term: &'a Term,
    id: NodeId,
}

impl<'a> TermRef<'a> {
    #[inline]
    pub(crate) fn new(term: &'a Term, id: NodeId) -> Self {
        debug_assert!(term.contains_node(id));
        Self { term, id }
    }

    /// Id of the viewed node inside its term.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The term owning the viewed node.
    #[inline]
    pub fn term(&self) -> &'a Term {
        self.term
    }

    #[inline]
    pub fn symbol(&self) -> &'a Symbol {
        &self.term.node(self.id).symbol
    }

    /// Number of arguments.
    #[inline]
    pub fn arity(&self) -> usize {
        self.term.node(self.id).children.len()
    }

    /// Parent node, `None` at the root.
    #[inline]
    pub fn parent(&self) -> Option<TermRef<'a>> {
        self.term
            .node(self.id)
            .parent
            .map(|parent| TermRef::new(self.term, parent))
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.term.node(self.id).parent.is_none()
    }

    /// Argument at position `pos`.
    pub fn argument(&self, pos: usize) -> Result<TermRef<'a>> {
        let node = self.term.node(self.id);
        node.children
            .get(pos)
            .map(|&child| TermRef::new(self.term, child))
            .ok_or_else(|| Error::PositionOutOfRange {
                symbol: node.symbol.clone(),
                position: pos,
                bound: node.children.len(),
            })
    }

    /// Arguments in insertion order.
    #[inline]
    pub fn arguments(&self) -> Arguments<'a> {
        Arguments {
            term: self.term,
            inner: self.term.node(self.id).children.iter(),
        }
    }

    /// All nodes of the subtree rooted here, in pre-order (this node first).
    #[inline]
    pub fn pre_order(&self) -> PreOrder<'a> {
        PreOrder::new(*self)
    }

    /// Number of nodes of the subtree rooted here.
    pub fn size(&self) -> usize {
        self.pre_order().count()
    }

    /// Length of the longest root-to-leaf path of the subtree, a leaf having depth 1.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        walk(*self, 1usize, |level, node| {
            depth = depth.max(level);
            node.schedule_arguments(level + 1);
        });
        depth
    }

    /// Whether any node of the subtree (this node included) carries `symbol`.
    pub fn contains_symbol(&self, symbol: &Symbol) -> bool {
        self.pre_order().any(|node| node.symbol() == symbol)
    }

    /// Deep copy of the subtree into a fresh root term.
    #[inline]
    pub fn to_term(&self) -> Term {
        Term::from_ref(*self)
    }
}

impl std::fmt::Debug for TermRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermRef({})", self)
    }
}

/// Forward, read-only iterator over the arguments of a node.
///
/// Consuming it never affects the underlying term; clone it to restart from the current point.
#[derive(Clone)]
pub struct Arguments<'a> {
    term: &'a Term,
    inner: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Arguments<'a> {
    type Item = TermRef<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&id| TermRef::new(self.term, id))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Arguments<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|&id| TermRef::new(self.term, id))
    }
}

impl ExactSizeIterator for Arguments<'_> {}
impl FusedIterator for Arguments<'_> {}
