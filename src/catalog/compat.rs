//! Socket compatibility table
//!
//! Symmetric relation over socket labels: "may socket A face socket B".
//! Symmetry is maintained by construction: `set_compatible` updates both
//! sides atomically and there is no other mutating path.

use crate::catalog::SocketLabel;
use rustc_hash::{FxHashMap, FxHashSet};

/// Symmetric compatibility relation over socket labels.
///
/// A label not present in the table is compatible with nothing. The empty
/// "no socket" label is treated as a wildcard by the placement validator,
/// not by this table.
#[derive(Debug, Clone, Default)]
pub struct SocketCompatibilityTable {
    compatible: FxHashMap<SocketLabel, FxHashSet<SocketLabel>>,
}

impl SocketCompatibilityTable {
    pub fn new() -> Self {
        SocketCompatibilityTable::default()
    }

    /// Build a table from a label list and symmetric pairs. Pairs naming
    /// unknown labels are ignored, same as `set_compatible`.
    pub fn from_pairs<'a>(
        labels: impl IntoIterator<Item = &'a str>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut table = SocketCompatibilityTable::new();
        for label in labels {
            table.add_label(SocketLabel::from(label));
        }
        for (a, b) in pairs {
            table.set_compatible(&SocketLabel::from(a), &SocketLabel::from(b), true);
        }
        table
    }

    /// Register a label with an initially empty compatible set
    pub fn add_label(&mut self, label: SocketLabel) {
        self.compatible.entry(label).or_default();
    }

    pub fn contains_label(&self, label: &SocketLabel) -> bool {
        self.compatible.contains_key(label)
    }

    /// Add or remove a symmetric compatibility edge. Both sides are updated
    /// together; if either label is unknown this is a no-op and returns false.
    pub fn set_compatible(&mut self, a: &SocketLabel, b: &SocketLabel, compatible: bool) -> bool {
        if !self.compatible.contains_key(a) || !self.compatible.contains_key(b) {
            return false;
        }
        if compatible {
            if let Some(set) = self.compatible.get_mut(a) {
                set.insert(b.clone());
            }
            if let Some(set) = self.compatible.get_mut(b) {
                set.insert(a.clone());
            }
        } else {
            if let Some(set) = self.compatible.get_mut(a) {
                set.remove(b);
            }
            if let Some(set) = self.compatible.get_mut(b) {
                set.remove(a);
            }
        }
        true
    }

    /// True if `a` may face `b`. False whenever `a` is not in the table.
    pub fn are_compatible(&self, a: &SocketLabel, b: &SocketLabel) -> bool {
        match self.compatible.get(a) {
            Some(set) => set.contains(b),
            None => false,
        }
    }

    /// Delete a label and purge it from every other label's compatible set
    pub fn remove_label(&mut self, label: &SocketLabel) {
        self.compatible.remove(label);
        for set in self.compatible.values_mut() {
            set.remove(label);
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &SocketLabel> {
        self.compatible.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> SocketLabel {
        SocketLabel::from(s)
    }

    #[test]
    fn test_symmetry_after_insert_and_remove() {
        let mut table = SocketCompatibilityTable::new();
        table.add_label(label("wall"));
        table.add_label(label("floor"));

        assert!(table.set_compatible(&label("wall"), &label("floor"), true));
        assert!(table.are_compatible(&label("wall"), &label("floor")));
        assert!(table.are_compatible(&label("floor"), &label("wall")));

        assert!(table.set_compatible(&label("floor"), &label("wall"), false));
        assert!(!table.are_compatible(&label("wall"), &label("floor")));
        assert!(!table.are_compatible(&label("floor"), &label("wall")));
    }

    #[test]
    fn test_unknown_label_is_noop() {
        let mut table = SocketCompatibilityTable::new();
        table.add_label(label("wall"));

        assert!(!table.set_compatible(&label("wall"), &label("ghost"), true));
        assert!(!table.are_compatible(&label("wall"), &label("ghost")));
        assert!(!table.are_compatible(&label("ghost"), &label("wall")));
    }

    #[test]
    fn test_self_compatibility() {
        let mut table = SocketCompatibilityTable::new();
        table.add_label(label("wall"));
        assert!(table.set_compatible(&label("wall"), &label("wall"), true));
        assert!(table.are_compatible(&label("wall"), &label("wall")));
    }

    #[test]
    fn test_remove_label_purges_edges() {
        let mut table = SocketCompatibilityTable::from_pairs(
            ["wall", "floor", "roof"],
            [("wall", "floor"), ("wall", "roof")],
        );
        table.remove_label(&label("wall"));

        assert!(!table.contains_label(&label("wall")));
        assert!(!table.are_compatible(&label("floor"), &label("wall")));
        assert!(!table.are_compatible(&label("roof"), &label("wall")));
    }
}
