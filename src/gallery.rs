//! Ordered, filterable collections of portfolio entries.
//!
//! A [`Gallery`] owns the source sequence of one page section and an active
//! [`Filter`]. Filtering only ever selects a displayed subset: the source
//! sequence is never reordered or shrunk, so positions into it stay valid
//! for the lifetime of the gallery.
//!
//! ```text
//! source:    [A(portraits), B(landscapes), C(portraits)]
//! filter:    portraits
//! displayed: [A, C]
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An entry that can be shown in a gallery.
pub trait Filterable {
    fn category(&self) -> &str;

    /// Whether the entry can be 3D printed. Only modeling projects carry
    /// this flag.
    fn printable(&self) -> bool {
        false
    }
}

/// Which subset of a gallery is displayed.
///
/// Serialized as a plain id: `"all"`, `"printable"`, or a category id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Printable,
    Category(String),
}

impl Filter {
    pub fn from_id(id: &str) -> Self {
        match id {
            "all" => Filter::All,
            "printable" => Filter::Printable,
            other => Filter::Category(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Printable => "printable",
            Filter::Category(c) => c,
        }
    }

    pub fn matches<T: Filterable + ?Sized>(&self, entry: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Printable => entry.printable(),
            Filter::Category(c) => entry.category() == c,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Filter::from_id(&id))
    }
}

/// Ordered source sequence plus the active filter.
#[derive(Debug, Clone)]
pub struct Gallery<T> {
    items: Vec<T>,
    active: Filter,
}

impl<T: Filterable> Gallery<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            active: Filter::All,
        }
    }

    /// The full source sequence, in declaration order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn active(&self) -> &Filter {
        &self.active
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.active = filter;
    }

    /// Entries matching the active filter, in source order.
    pub fn displayed(&self) -> Vec<&T> {
        self.matching(&self.active)
    }

    pub fn matching(&self, filter: &Filter) -> Vec<&T> {
        self.items.iter().filter(|e| filter.matches(*e)).collect()
    }

    /// Number of entries a filter would display.
    pub fn count(&self, filter: &Filter) -> usize {
        self.items.iter().filter(|e| filter.matches(*e)).count()
    }

    /// Count entries per key, keeping the order in which keys first appear.
    pub fn tally<'a, F>(&'a self, key: F) -> Vec<(&'a str, usize)>
    where
        F: Fn(&'a T) -> &'a str,
    {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for entry in &self.items {
            let k = key(entry);
            match counts.iter_mut().find(|(existing, _)| *existing == k) {
                Some((_, n)) => *n += 1,
                None => counts.push((k, 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: &'static str,
        category: &'static str,
        printable: bool,
    }

    impl Filterable for Entry {
        fn category(&self) -> &str {
            self.category
        }

        fn printable(&self) -> bool {
            self.printable
        }
    }

    fn entry(name: &'static str, category: &'static str) -> Entry {
        Entry {
            name,
            category,
            printable: false,
        }
    }

    fn names(entries: &[&Entry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.name).collect()
    }

    #[test]
    fn portraits_and_landscapes_scenario() {
        let mut gallery = Gallery::new(vec![entry("A", "portraits"), entry("B", "landscapes")]);

        gallery.set_filter(Filter::from_id("landscapes"));
        assert_eq!(names(&gallery.displayed()), vec!["B"]);

        gallery.set_filter(Filter::from_id("all"));
        assert_eq!(names(&gallery.displayed()), vec!["A", "B"]);
    }

    #[test]
    fn zero_match_filter_leaves_source_untouched() {
        let source = vec![entry("A", "portraits"), entry("B", "landscapes")];
        let mut gallery = Gallery::new(source.clone());

        gallery.set_filter(Filter::Category("creatures".into()));
        assert!(gallery.displayed().is_empty());
        assert_eq!(gallery.items(), source.as_slice());
    }

    #[test]
    fn printable_filter_uses_flag_not_category() {
        let mut printed = entry("C", "fusion");
        printed.printable = true;
        let gallery = Gallery::new(vec![entry("A", "blender"), printed]);

        assert_eq!(names(&gallery.matching(&Filter::Printable)), vec!["C"]);
        assert_eq!(gallery.count(&Filter::Printable), 1);
        assert_eq!(gallery.count(&Filter::All), 2);
    }

    #[test]
    fn displayed_preserves_source_order() {
        let gallery = Gallery::new(vec![
            entry("A", "portraits"),
            entry("B", "landscapes"),
            entry("C", "portraits"),
        ]);
        assert_eq!(
            names(&gallery.matching(&Filter::from_id("portraits"))),
            vec!["A", "C"]
        );
    }

    #[test]
    fn tally_counts_in_first_seen_order() {
        let gallery = Gallery::new(vec![
            entry("A", "midjourney"),
            entry("B", "dall-e"),
            entry("C", "midjourney"),
        ]);
        let tally = gallery.tally(|e| e.category);
        assert_eq!(tally, vec![("midjourney", 2), ("dall-e", 1)]);
    }

    #[test]
    fn filter_ids_round_trip_through_serde() {
        let filters: Vec<Filter> = serde_json::from_str(r#"["all","printable","blender"]"#).unwrap();
        assert_eq!(
            filters,
            vec![
                Filter::All,
                Filter::Printable,
                Filter::Category("blender".into())
            ]
        );
        assert_eq!(serde_json::to_string(&filters[2]).unwrap(), r#""blender""#);
    }
}
