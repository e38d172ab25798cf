/// One directed reference into the external arc pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcRef {
    pub index: usize,
    /// When set, the arc's coordinates are emitted last-to-first.
    pub reversed: bool,
}

impl ArcRef {
    pub fn forward(index: usize) -> Self {
        Self {
            index,
            reversed: false,
        }
    }

    pub fn backward(index: usize) -> Self {
        Self {
            index,
            reversed: true,
        }
    }
}

/// A shape expressed over a shared coordinate pool: an ordered sequence of
/// parts, each part chaining one or more arcs. An empty part list is the
/// null shape.
#[derive(Debug, Clone, Default)]
pub struct TopoShape {
    pub parts: Vec<Vec<ArcRef>>,
}

impl TopoShape {
    pub fn new(parts: Vec<Vec<ArcRef>>) -> Self {
        Self { parts }
    }

    pub fn null() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn is_null(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Lookup into the external arc pool. The pool owns the coordinates; the
/// encoder only borrows each arc's x and y runs for the duration of one
/// record.
pub trait ArcPool {
    /// Returns the arc's x and y sequences, or `None` when the pool has no
    /// arc at `index`.
    fn arc(&self, index: usize) -> Option<(&[f64], &[f64])>;
}

/// A plain vector of `(xx, yy)` pairs works as an identity pool, which is all
/// the round-trip path needs.
impl ArcPool for [(Vec<f64>, Vec<f64>)] {
    fn arc(&self, index: usize) -> Option<(&[f64], &[f64])> {
        self.get(index).map(|(xx, yy)| (xx.as_slice(), yy.as_slice()))
    }
}
