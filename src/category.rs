//! Open digraphs as the arrows of a monoidal category whose objects are interface sizes.
//!
//! The inherent methods [`OpenDigraph::compose`] and [`OpenDigraph::parallel`] are what
//! most code wants; these traits exist for code generic over any arrow type.
//!
//! [`Arrow::compose`] is diagrammatic: `Arrow::compose(&f, &g)` runs `f` first, like
//! `&f >> &g`. The inherent method of the same name, which method-call syntax picks,
//! takes its operands the other way around.
use crate::open_digraph::OpenDigraph;

pub trait Arrow: Sized {
    type Object;

    fn source(&self) -> Self::Object;
    fn target(&self) -> Self::Object;

    /// The identity on an interface of size `a`.
    fn identity(a: &Self::Object) -> Self;

    /// `self` followed by `other`, or None if `self.target() != other.source()`.
    fn compose(&self, other: &Self) -> Option<Self>;
}

pub trait Monoidal: Arrow {
    /// The arrow with empty interfaces.
    fn unit() -> Self;

    /// `self` and `other` side by side.
    fn tensor(&self, other: &Self) -> Self;
}

impl<L: Clone + Default> Arrow for OpenDigraph<L> {
    type Object = usize;

    fn source(&self) -> usize {
        self.inputs().len()
    }

    fn target(&self) -> usize {
        self.outputs().len()
    }

    fn identity(a: &usize) -> Self {
        OpenDigraph::identity(*a)
    }

    fn compose(&self, other: &Self) -> Option<Self> {
        (self >> other).ok()
    }
}

impl<L: Clone + Default> Monoidal for OpenDigraph<L> {
    fn unit() -> Self {
        OpenDigraph::empty()
    }

    fn tensor(&self, other: &Self) -> Self {
        self | other
    }
}
