//! Ordered course catalog: an unbalanced binary search tree over course numbers.
//!
//! Entries live in a generational arena owned by the catalog and link to
//! their `lower` and `higher` subtrees by arena index. Entries are never
//! removed, so every stored index stays valid for the catalog's lifetime.

use std::cmp::Ordering;
use std::collections::HashMap;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{instrument, trace};

use crate::domain::Course;

/// One node of the catalog tree.
#[derive(Debug)]
pub struct CatalogEntry {
    /// Course stored at this node
    pub course: Course,
    /// Subtree with strictly smaller course numbers
    pub lower: Option<Index>,
    /// Subtree with strictly greater course numbers
    pub higher: Option<Index>,
}

impl CatalogEntry {
    fn new(course: Course) -> Self {
        Self {
            course,
            lower: None,
            higher: None,
        }
    }
}

/// Courses keyed by number, searchable by exact key and enumerable in
/// ascending key order.
///
/// Inserting a number that is already present leaves the existing course
/// untouched. There is no rebalancing: the tree's shape follows insertion order.
#[derive(Debug)]
pub struct Catalog {
    /// Arena storage for all entries
    arena: Arena<CatalogEntry>,
    /// Index of the root entry, None for an empty catalog
    root: Option<Index>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a course unless its number is already present.
    ///
    /// Returns `true` if a new entry was created. A duplicate number is not an
    /// error; the first course inserted under a number is the one kept.
    #[instrument(level = "trace", skip(self, course), fields(number = course.number()))]
    pub fn insert(&mut self, course: Course) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(CatalogEntry::new(course)));
            return true;
        };

        loop {
            let entry = &self.arena[current];
            let ordering = course.number().cmp(entry.course.number());
            let next = match ordering {
                Ordering::Equal => {
                    trace!("duplicate course number ignored");
                    return false;
                }
                Ordering::Less => entry.lower,
                Ordering::Greater => entry.higher,
            };

            match next {
                Some(child) => current = child,
                None => {
                    let new_idx = self.arena.insert(CatalogEntry::new(course));
                    let parent = &mut self.arena[current];
                    if ordering == Ordering::Less {
                        parent.lower = Some(new_idx);
                    } else {
                        parent.higher = Some(new_idx);
                    }
                    return true;
                }
            }
        }
    }

    /// Exact-match lookup by course number. No trimming or case folding.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, number: &str) -> Option<&Course> {
        let mut current = self.root;
        while let Some(idx) = current {
            let entry = &self.arena[idx];
            current = match number.cmp(entry.course.number()) {
                Ordering::Equal => return Some(&entry.course),
                Ordering::Less => entry.lower,
                Ordering::Greater => entry.higher,
            };
        }
        None
    }

    /// Courses in ascending number order. Each call starts a fresh traversal.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of entries on the longest root-to-leaf path; 0 when empty.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(Index, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((idx, level)) = pending.pop() {
            deepest = deepest.max(level);
            let entry = &self.arena[idx];
            for child in [entry.lower, entry.higher].into_iter().flatten() {
                pending.push((child, level + 1));
            }
        }
        deepest
    }

    /// Render the tree structure. Children are prefixed with `<` (lower) or `>` (higher).
    ///
    /// The result nests as deeply as the catalog itself; check [`Catalog::depth`]
    /// before drawing very large, degenerate catalogs.
    pub fn shape(&self) -> Option<Tree<String>> {
        let root = self.root?;

        // Pre-order: every entry comes after its parent.
        let mut order = Vec::with_capacity(self.len());
        let mut pending = vec![(root, self.arena[root].course.number().to_string())];
        while let Some((idx, label)) = pending.pop() {
            let entry = &self.arena[idx];
            if let Some(higher) = entry.higher {
                pending.push((higher, format!("> {}", self.arena[higher].course.number())));
            }
            if let Some(lower) = entry.lower {
                pending.push((lower, format!("< {}", self.arena[lower].course.number())));
            }
            order.push((idx, label));
        }

        // Build children before their parents.
        let mut built: HashMap<Index, Tree<String>> = HashMap::with_capacity(order.len());
        for (idx, label) in order.into_iter().rev() {
            let entry = &self.arena[idx];
            let mut tree = Tree::new(label);
            for child in [entry.lower, entry.higher].into_iter().flatten() {
                if let Some(subtree) = built.remove(&child) {
                    tree.push(subtree);
                }
            }
            built.insert(idx, tree);
        }
        built.remove(&root)
    }
}

impl Extend<Course> for Catalog {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend(iter);
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order (ascending key) traversal over a catalog.
pub struct InOrder<'a> {
    catalog: &'a Catalog,
    stack: Vec<Index>,
}

impl<'a> InOrder<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        let mut iter = Self {
            catalog,
            stack: Vec::new(),
        };
        iter.push_lower_spine(catalog.root);
        iter
    }

    fn push_lower_spine(&mut self, mut current: Option<Index>) {
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.catalog.arena[idx].lower;
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let catalog = self.catalog;
        let entry = &catalog.arena[idx];
        self.push_lower_spine(entry.higher);
        Some(&entry.course)
    }
}
