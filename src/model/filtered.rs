// File: ./src/model/filtered.rs
//! Predicate-driven projections over a [`Catalogue`].
//!
//! A view stores only its predicate. The projection is computed from the
//! catalogue at read time, so reads always reflect the latest mutations.
use crate::model::catalogue::Catalogue;
use std::fmt;

pub type Predicate<T> = Box<dyn Fn(&T) -> bool>;

pub fn show_all<T: 'static>() -> Predicate<T> {
    Box::new(|_: &T| true)
}

pub struct FilteredView<T> {
    predicate: Predicate<T>,
}

impl<T: 'static> Default for FilteredView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> FilteredView<T> {
    pub fn new() -> Self {
        Self {
            predicate: show_all(),
        }
    }

    pub fn reset(&mut self) {
        self.predicate = show_all();
    }
}

impl<T> FilteredView<T> {
    pub fn set_predicate(&mut self, predicate: Predicate<T>) {
        self.predicate = predicate;
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    pub fn items<'a>(&self, catalogue: &'a Catalogue<T>) -> Vec<&'a T> {
        catalogue.iter().filter(|x| self.matches(x)).collect()
    }

    pub fn len(&self, catalogue: &Catalogue<T>) -> usize {
        catalogue.iter().filter(|x| self.matches(x)).count()
    }

    pub fn get<'a>(&self, catalogue: &'a Catalogue<T>, zero_based: usize) -> Option<&'a T> {
        catalogue.iter().filter(|x| self.matches(x)).nth(zero_based)
    }
}

impl<T> fmt::Debug for FilteredView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredView").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalogue::Entry;

    #[derive(Debug, Clone, PartialEq)]
    struct Num(u32);

    impl Entry for Num {
        const KIND: &'static str = "number";

        fn is_duplicate(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    #[test]
    fn test_default_shows_everything() {
        let c = Catalogue::from_items(vec![Num(1), Num(2)]).unwrap();
        let view = FilteredView::new();
        assert_eq!(view.items(&c), vec![&Num(1), &Num(2)]);
    }

    #[test]
    fn test_view_follows_catalogue_mutations() {
        let mut c = Catalogue::from_items(vec![Num(1), Num(2), Num(3)]).unwrap();
        let mut view = FilteredView::new();
        view.set_predicate(Box::new(|n: &Num| n.0 % 2 == 1));
        assert_eq!(view.items(&c), vec![&Num(1), &Num(3)]);

        c.add(Num(5)).unwrap();
        c.remove(&Num(1)).unwrap();
        c.set(&Num(3), Num(4)).unwrap();

        let expected: Vec<&Num> = c.iter().filter(|n| n.0 % 2 == 1).collect();
        assert_eq!(view.items(&c), expected);
        assert_eq!(view.items(&c), vec![&Num(5)]);
        assert_eq!(view.len(&c), 1);
    }

    #[test]
    fn test_get_indexes_into_projection() {
        let c = Catalogue::from_items(vec![Num(1), Num(2), Num(3), Num(4)]).unwrap();
        let mut view = FilteredView::new();
        view.set_predicate(Box::new(|n: &Num| n.0 > 2));
        assert_eq!(view.get(&c, 0), Some(&Num(3)));
        assert_eq!(view.get(&c, 1), Some(&Num(4)));
        assert_eq!(view.get(&c, 2), None);

        view.reset();
        assert_eq!(view.get(&c, 0), Some(&Num(1)));
    }
}
