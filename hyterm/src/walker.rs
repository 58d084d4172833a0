//! Iterative traversals over terms.
//!
//! This module provides two traversal helpers operating on [`TermRef`] views, without
//! recursion and without cloning nodes:
//! - [`PreOrder`]: a plain iterator over every node of a subtree, parents before children,
//!   arguments left to right.
//! - [`walk`]: a guided depth-first walk. The visitor decides which arguments to descend into
//!   and threads its own input value to each of them, which makes pruning easy.
//!
//! Both use an explicit stack, so their memory footprint is O(depth · arity) and they never
//! overflow the call stack on deep terms.
//!
//! Example: collect the symbols of all leaves, skipping the subtrees under `q`
//! ```
//! use hyterm::term::Term;
//! use hyterm::walker::walk_no_input;
//!
//! let t: Term = "f ( a q ( b ) g ( c ) )".parse()?;
//! let mut leaves = Vec::new();
//! walk_no_input(t.as_ref(), |node| {
//!     if node.symbol().as_str() == "q" {
//!         return;
//!     }
//!     if node.arity() == 0 {
//!         leaves.push(node.symbol().to_string());
//!     }
//!     node.schedule_arguments(());
//! });
//! assert_eq!(leaves, ["a", "c"]);
//! # Ok::<(), hyterm::Error>(())
//! ```
use std::{cell::RefCell, iter::FusedIterator, ops::Deref};

use smallvec::SmallVec;

use crate::term::TermRef;

/// Pre-order iterator over a subtree.
#[derive(Clone)]
pub struct PreOrder<'a> {
    stack: SmallVec<[TermRef<'a>; 16]>,
}

impl<'a> PreOrder<'a> {
    pub fn new(root: TermRef<'a>) -> Self {
        let mut stack = SmallVec::new();
        stack.push(root);
        Self { stack }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = TermRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so that the leftmost argument is popped first.
        self.stack.extend(node.arguments().rev());
        Some(node)
    }
}

impl FusedIterator for PreOrder<'_> {}

type WalkerStack<'a, I> = RefCell<Vec<(TermRef<'a>, I)>>;

/// Handle passed to the visitor of [`walk`], representing the current node plus scheduling
/// control.
///
/// It dereferences to the current [`TermRef`].
pub struct WalkerHandle<'a, 's, I> {
    node: TermRef<'a>,
    stack: &'s WalkerStack<'a, I>,
}

impl<'a, I> WalkerHandle<'a, '_, I> {
    /// The node being visited.
    #[inline]
    pub fn node(&self) -> TermRef<'a> {
        self.node
    }

    /// Schedule `child` for a visit with the given input. Scheduling is LIFO: the most recently
    /// scheduled node is visited next.
    #[inline]
    pub fn schedule_visit(&self, child: TermRef<'a>, input: I) {
        debug_assert!(child.parent().is_some_and(|p| p.id() == self.node.id()));
        self.stack.borrow_mut().push((child, input));
    }

    /// Schedule every argument of the current node, to be visited left to right.
    pub fn schedule_arguments(&self, input: I)
    where
        I: Clone,
    {
        self.stack
            .borrow_mut()
            .extend(self.node.arguments().rev().map(|arg| (arg, input.clone())));
    }
}

impl<'a, I> Deref for WalkerHandle<'a, '_, I> {
    type Target = TermRef<'a>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

/// Walk a term depth-first, visiting only the nodes the visitor schedules.
///
/// The visitor receives the input attached to the current node and a [`WalkerHandle`]; the root
/// is visited first with `input`.
pub fn walk<'a, I, F>(root: TermRef<'a>, input: I, mut visitor: F)
where
    F: FnMut(I, WalkerHandle<'a, '_, I>),
{
    let stack: WalkerStack<'a, I> = RefCell::new(vec![(root, input)]);

    loop {
        // Short-lived borrow: the visitor schedules through the same cell.
        let next = stack.borrow_mut().pop();
        let Some((node, input)) = next else {
            break;
        };

        visitor(
            input,
            WalkerHandle {
                node,
                stack: &stack,
            },
        );
    }
}

/// Convenience when no input needs to be threaded.
#[inline]
pub fn walk_no_input<'a, F>(root: TermRef<'a>, mut visitor: F)
where
    F: FnMut(WalkerHandle<'a, '_, ()>),
{
    walk(root, (), |(), node| visitor(node));
}
