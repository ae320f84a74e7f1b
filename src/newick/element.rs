//! Flat, depth-annotated intermediate form of a Newick tree.
//!
//! Parser and writer do not exchange trees directly; they exchange an
//! [ElementList]. Each [Element] describes one node together with its
//! nesting depth. Elements are ordered by the position of their closing
//! character in the text, which for a well-formed tree means children
//! precede their parent and the outermost element comes last.
//!
//! [build_tree](crate::newick::build_tree) consumes a list to produce a
//! [Tree](crate::model::Tree);
//! [tree_to_elements](crate::newick::tree_to_elements) produces one from a
//! tree again.

// =$========================================================================$=
// ELEMENT
// =$========================================================================$=
/// One node of a Newick tree in flat form.
///
/// Carries everything the text states about the node. Positional
/// information is reduced to [depth](Element::depth); the parent of an
/// element is the next element in the list with a smaller depth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Node name, empty when the text names none.
    pub name: String,
    /// Branch length toward the parent, if the text carries one.
    pub branch_length: Option<f64>,
    /// Nesting depth, with the outermost element at zero.
    pub depth: usize,
    /// Whether the element closed without children.
    pub is_leaf: bool,
    /// Tag payloads in `{...}`, in text order, braces stripped.
    pub tags: Vec<String>,
    /// Comment payloads in `[...]`, in text order, brackets stripped.
    pub comments: Vec<String>,
}

// ============================================================================
// New
// ============================================================================
impl Element {
    /// Creates an empty element at depth zero.
    pub fn new() -> Self {
        Element::default()
    }

    /// Creates an empty element with the given name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Element::default()
        }
    }
}

// =$========================================================================$=
// ELEMENT LIST
// =$========================================================================$=
/// List of [Element]s in closing order.
///
/// Thin wrapper around a `Vec<Element>` so that parser, builder and writer
/// share one named currency. Order is meaningful: see the
/// [module docs](self).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementList {
    elements: Vec<Element>,
}

// ============================================================================
// New, Accessors
// ============================================================================
impl ElementList {
    /// Creates an empty list.
    pub fn new() -> Self {
        ElementList { elements: Vec::new() }
    }

    /// Appends an element at the end of the list.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the last element, which for a parsed tree is the outermost
    /// one.
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Returns an iterator over the elements in closing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }
}

// ============================================================================
// Index / IntoIterator
// ============================================================================
impl std::ops::Index<usize> for ElementList {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.elements[index]
    }
}

impl IntoIterator for ElementList {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementList {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
