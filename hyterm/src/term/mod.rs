//! Labelled, ordered trees: the owned [`Term`] and its borrowed view [`TermRef`].
//!
//! Role
//! - A [`Term`] owns every node of its tree in a private `slotmap` arena. Nodes are addressed by
//!   a stable [`NodeId`]; the parent link is stored as an id and never owns anything, so there is
//!   no reference cycle and dropping a term releases the whole tree at once.
//! - [`TermRef`] is a `Copy` view of one node (symbol, arity, parent, arguments). All read-only
//!   operations (comparison, printing, matching) work on views.
//!
//! Ownership
//! - Inserting an argument consumes the inserted [`Term`]; extracting an argument hands back an
//!   independent [`Term`]. Anything else that reuses a subtree deep-copies it.
//! - In-place mutation ([`Term::replace_copy`]) keeps the id of the destination node, so ids held
//!   by the caller stay valid across rewrites. Ids of released nodes become stale and are
//!   reported as [`Error::UnknownNode`].
//!
//! Example
//! ```
//! use hyterm::term::Term;
//!
//! let mut f = Term::new("f").unwrap();
//! f.push_argument(Term::new("a").unwrap());
//! let b = f.push_argument(Term::new("b").unwrap());
//! assert_eq!(f.arity(), 2);
//! assert_eq!(f.get(b).unwrap().parent().unwrap().symbol().as_str(), "f");
//! assert_eq!(f.to_string(), "f ( a b )");
//! ```
mod order;
mod view;

pub use order::compare;
pub use view::{Arguments, TermRef};

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    symbol::Symbol,
};

slotmap::new_key_type! {
    /// Stable identifier of a node inside one [`Term`].
    ///
    /// Ids are only meaningful for the term that produced them (and for its clones, which keep
    /// the same ids).
    pub struct NodeId;
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) symbol: Symbol,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl Node {
    fn leaf(symbol: Symbol, parent: Option<NodeId>) -> Self {
        Self {
            symbol,
            parent,
            children: SmallVec::new(),
        }
    }
}

/// Owned labelled tree.
///
/// `Clone` duplicates the arena and keeps node ids, which lets a caller locate a position in
/// the original and mutate the same position in the clone. Use [`Term::copy`] for a fresh,
/// compact copy.
#[derive(Clone)]
pub struct Term {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Term {
    /// Create a zero-arity term from an already validated symbol.
    pub fn leaf(symbol: Symbol) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::leaf(symbol, None));
        Self { nodes, root }
    }

    /// Create a zero-arity term, validating the symbol.
    pub fn new<S: AsRef<str>>(symbol: S) -> Result<Self> {
        Symbol::new(symbol).map(Self::leaf)
    }

    /// Create a term with the given arguments, in order.
    ///
    /// ```
    /// use hyterm::term::Term;
    /// let t = Term::with_arguments("f", [Term::new("a")?, Term::new("b")?])?;
    /// assert_eq!(t.to_string(), "f ( a b )");
    /// # Ok::<(), hyterm::Error>(())
    /// ```
    pub fn with_arguments<S, I>(symbol: S, arguments: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Term>,
    {
        let mut term = Self::new(symbol)?;
        for argument in arguments {
            term.push_argument(argument);
        }
        Ok(term)
    }

    /// Build an owned copy of a view (possibly a view into another term).
    pub fn from_ref(src: TermRef<'_>) -> Self {
        let mut term = Self {
            nodes: SlotMap::with_capacity_and_key(src.size()),
            root: NodeId::default(),
        };
        term.root = term.graft(src, None);
        term
    }

    /// Id of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// View of the root node.
    #[inline]
    pub fn as_ref(&self) -> TermRef<'_> {
        TermRef::new(self, self.root)
    }

    /// View of an arbitrary node of this term.
    pub fn get(&self, id: NodeId) -> Result<TermRef<'_>> {
        if self.nodes.contains_key(id) {
            Ok(TermRef::new(self, id))
        } else {
            Err(Error::UnknownNode)
        }
    }

    /// Whether `id` refers to a live node of this term.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Symbol of the root node.
    #[inline]
    pub fn symbol(&self) -> &Symbol {
        &self.nodes[self.root].symbol
    }

    /// Arity of the root node.
    #[inline]
    pub fn arity(&self) -> usize {
        self.nodes[self.root].children.len()
    }

    /// Number of nodes in the whole tree.
    #[inline]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Deep copy into a fresh term (new ids, compact arena).
    pub fn copy(&self) -> Self {
        Self::from_ref(self.as_ref())
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    fn check(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::UnknownNode)
    }

    // ======================== Insertion ========================

    /// Append an argument to the root. The root always exists, hence infallible.
    pub fn push_argument(&mut self, argument: Term) -> NodeId {
        let arity = self.arity();
        self.insert_unchecked(self.root, arity, argument.as_ref())
    }

    /// Insert `argument` as the first argument of node `at`.
    pub fn add_argument_first(&mut self, at: NodeId, argument: Term) -> Result<NodeId> {
        self.add_argument_at(at, 0, argument)
    }

    /// Insert `argument` as the last argument of node `at`.
    pub fn add_argument_last(&mut self, at: NodeId, argument: Term) -> Result<NodeId> {
        let arity = self.check(at)?.children.len();
        self.add_argument_at(at, arity, argument)
    }

    /// Insert `argument` at position `pos` (in `0..=arity`) of node `at`. Following arguments
    /// are shifted by one.
    pub fn add_argument_at(&mut self, at: NodeId, pos: usize, argument: Term) -> Result<NodeId> {
        let node = self.check(at)?;
        if pos > node.children.len() {
            return Err(Error::PositionOutOfRange {
                symbol: node.symbol.clone(),
                position: pos,
                bound: node.children.len() + 1,
            });
        }
        Ok(self.insert_unchecked(at, pos, argument.as_ref()))
    }

    fn insert_unchecked(&mut self, at: NodeId, pos: usize, argument: TermRef<'_>) -> NodeId {
        let id = self.graft(argument, Some(at));
        self.nodes[at].children.insert(pos, id);
        id
    }

    /// Copy `src` and its descendants into this arena. The new root gets `parent` as parent
    /// link, but is not registered among the parent's children.
    fn graft(&mut self, src: TermRef<'_>, parent: Option<NodeId>) -> NodeId {
        let root = self.nodes.insert(Node::leaf(src.symbol().clone(), parent));
        let mut stack: SmallVec<[(TermRef<'_>, NodeId); 16]> = SmallVec::new();
        stack.push((src, root));

        while let Some((from, to)) = stack.pop() {
            for child in from.arguments() {
                let id = self
                    .nodes
                    .insert(Node::leaf(child.symbol().clone(), Some(to)));
                self.nodes[to].children.push(id);
                stack.push((child, id));
            }
        }

        root
    }

    // ======================== Removal ========================

    /// Detach the argument at `pos` of node `at` and return it as an independent term.
    ///
    /// The nodes of the extracted subtree are released: their ids become stale. Following
    /// arguments move one position to the left.
    pub fn extract_argument(&mut self, at: NodeId, pos: usize) -> Result<Term> {
        let node = self.check(at)?;
        let Some(&child) = node.children.get(pos) else {
            return Err(Error::PositionOutOfRange {
                symbol: node.symbol.clone(),
                position: pos,
                bound: node.children.len(),
            });
        };

        let extracted = Term::from_ref(TermRef::new(self, child));
        self.nodes[at].children.remove(pos);
        self.release(child);
        Ok(extracted)
    }

    /// Release `id` and all its descendants from the arena.
    fn release(&mut self, id: NodeId) {
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        stack.push(id);
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                stack.extend(node.children);
            }
        }
    }

    // ======================== In-place replacement ========================

    /// Overwrite node `dest` with a deep copy of `src`: symbol and arguments are replaced,
    /// while `dest` keeps its id and its position in its parent.
    ///
    /// The former descendants of `dest` are released.
    ///
    /// ```
    /// use hyterm::term::Term;
    ///
    /// let mut t: Term = "f ( a b )".parse()?;
    /// let a = t.as_ref().argument(0)?.id();
    /// let g: Term = "g ( c )".parse()?;
    /// t.replace_copy(a, g.as_ref())?;
    /// assert_eq!(t.to_string(), "f ( g ( c ) b )");
    /// assert_eq!(t.get(a)?.symbol().as_str(), "g");
    /// # Ok::<(), hyterm::Error>(())
    /// ```
    pub fn replace_copy(&mut self, dest: NodeId, src: TermRef<'_>) -> Result<()> {
        self.check(dest)?;

        let children = std::mem::take(&mut self.nodes[dest].children);
        for child in children {
            self.release(child);
        }

        self.nodes[dest].symbol = src.symbol().clone();
        for argument in src.arguments() {
            let id = self.graft(argument, Some(dest));
            self.nodes[dest].children.push(id);
        }
        Ok(())
    }

    /// Same as [`Term::replace_copy`], consuming the replacement.
    pub fn replace_with(&mut self, dest: NodeId, src: Term) -> Result<()> {
        self.replace_copy(dest, src.as_ref())
    }
}

impl From<Symbol> for Term {
    fn from(symbol: Symbol) -> Self {
        Term::leaf(symbol)
    }
}

impl<'a> From<TermRef<'a>> for Term {
    fn from(value: TermRef<'a>) -> Self {
        Term::from_ref(value)
    }
}

impl std::fmt::Debug for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Term({})", self.as_ref())
    }
}
