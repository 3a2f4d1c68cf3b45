//! # Name Ordering
//!
//! A total order over anything that carries a name. Composite items and
//! entity attributes are kept in this order, so listings are stable across
//! processes regardless of declaration order.

use std::cmp::Ordering;

/// Something identified by a name.
pub trait Named {
    /// The name used for ordering.
    fn name(&self) -> &str;
}

impl Named for str {
    fn name(&self) -> &str {
        self
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Orders named things by the natural (lexicographic) order of their names.
///
/// Stateless; use the shared [`NamedComparator::INSTANCE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamedComparator;

impl NamedComparator {
    /// The shared comparator.
    pub const INSTANCE: NamedComparator = NamedComparator;

    /// Compare two named things by name.
    pub fn compare<A, B>(&self, a: &A, b: &B) -> Ordering
    where
        A: Named + ?Sized,
        B: Named + ?Sized,
    {
        a.name().cmp(b.name())
    }

    /// Sort a slice in name order. Equal names keep their relative order.
    pub fn sort<T: Named>(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        tag: u32,
    }

    impl Named for Item {
        fn name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn compare_is_lexicographic() {
        let c = NamedComparator::INSTANCE;
        assert_eq!(c.compare("a", "b"), Ordering::Less);
        assert_eq!(c.compare("b", "a"), Ordering::Greater);
        assert_eq!(c.compare("a", "a"), Ordering::Equal);
        assert_eq!(c.compare("Z", "a"), Ordering::Less);
    }

    #[test]
    fn sort_orders_by_name() {
        let mut items = vec![
            Item { name: "port", tag: 0 },
            Item { name: "host", tag: 1 },
            Item { name: "name", tag: 2 },
        ];
        NamedComparator::INSTANCE.sort(&mut items);
        let names: Vec<&str> = items.iter().map(|i| i.name).collect();
        assert_eq!(names, ["host", "name", "port"]);
    }

    #[test]
    fn sort_handles_duplicate_names() {
        let mut items = vec![
            Item { name: "b", tag: 0 },
            Item { name: "a", tag: 1 },
            Item { name: "b", tag: 2 },
        ];
        NamedComparator::INSTANCE.sort(&mut items);
        let names: Vec<&str> = items.iter().map(|i| i.name).collect();
        assert_eq!(names, ["a", "b", "b"]);
        assert_eq!(items[0].tag, 1);
    }
}
