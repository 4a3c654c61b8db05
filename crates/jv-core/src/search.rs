use crate::payload::{Entry, Locator};
use crate::value::JsonValue;

/// Boxed predicate, for operations that take several at once.
pub type Predicate<'f> = Box<dyn FnMut(Entry<'_>) -> bool + 'f>;

impl JsonValue {
    /// First position (sequence) or key (mapping) whose entry satisfies `pred`.
    /// `None` when nothing matches or the payload is unset.
    pub fn find_index<F>(&self, mut pred: F) -> Option<Locator>
    where
        F: FnMut(Entry<'_>) -> bool,
    {
        self.payload.entries().find(|e| pred(*e)).map(|e| e.locator())
    }

    /// Every matching position/key in container order.
    ///
    /// No matches gives `None`, never an empty vector.
    pub fn find_all_indexes<F>(&self, mut pred: F) -> Option<Vec<Locator>>
    where
        F: FnMut(Entry<'_>) -> bool,
    {
        let found: Vec<Locator> = self
            .payload
            .entries()
            .filter(|e| pred(*e))
            .map(|e| e.locator())
            .collect();
        if found.is_empty() { None } else { Some(found) }
    }

    /// One `find_all_indexes` result per predicate, grouped in predicate order.
    pub fn find_indexes_2d(&self, predicates: &mut [Predicate<'_>]) -> Vec<Option<Vec<Locator>>> {
        predicates
            .iter_mut()
            .map(|pred| self.find_all_indexes(|e| (*pred)(e)))
            .collect()
    }
}
