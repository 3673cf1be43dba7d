// File: ./src/model/catalogue.rs
//! Ordered, duplicate-free collections of entries.
//!
//! Uniqueness is decided by [`Entry::is_duplicate`], never by identity. Every
//! operation is a linear scan; catalogues are small.
use thiserror::Error;

/// An item that can live in a [`Catalogue`].
pub trait Entry: Clone + PartialEq {
    /// Human name of the entry kind, used in error messages.
    const KIND: &'static str;

    /// Weaker notion of equality that defines uniqueness within a catalogue.
    fn is_duplicate(&self, other: &Self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    #[error("This {0} already exists in the catalogue")]
    DuplicateEntry(&'static str),
    #[error("The {0} does not exist in the catalogue")]
    EntryNotFound(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue<T> {
    items: Vec<T>,
}

impl<T> Default for Catalogue<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Catalogue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Entry> Catalogue<T> {
    /// Builds a catalogue from stored items, rejecting any duplicate pair.
    pub fn from_items(items: Vec<T>) -> Result<Self, CatalogueError> {
        let mut catalogue = Self::new();
        for item in items {
            catalogue.add(item)?;
        }
        Ok(catalogue)
    }

    /// Whether a duplicate of `item` is already stored.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|x| x.is_duplicate(item))
    }

    pub fn add(&mut self, item: T) -> Result<(), CatalogueError> {
        if self.contains(&item) {
            return Err(CatalogueError::DuplicateEntry(T::KIND));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes the element equal to `item`, keeping the order of the rest.
    pub fn remove(&mut self, item: &T) -> Result<(), CatalogueError> {
        let idx = self
            .items
            .iter()
            .position(|x| x == item)
            .ok_or(CatalogueError::EntryNotFound(T::KIND))?;
        self.items.remove(idx);
        Ok(())
    }

    /// Replaces `target` in place with `replacement`.
    ///
    /// `replacement` may be a duplicate of `target` itself (an edit that only
    /// touches non-identity fields) but not of any other element.
    pub fn set(&mut self, target: &T, replacement: T) -> Result<(), CatalogueError> {
        let idx = self
            .items
            .iter()
            .position(|x| x == target)
            .ok_or(CatalogueError::EntryNotFound(T::KIND))?;

        let clashes = self
            .items
            .iter()
            .enumerate()
            .any(|(i, x)| i != idx && x.is_duplicate(&replacement));
        if clashes {
            return Err(CatalogueError::DuplicateEntry(T::KIND));
        }

        self.items[idx] = replacement;
        Ok(())
    }

    /// Removes every element matching `pred` and returns them in order.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) = self.items.drain(..).partition(|x| pred(x));
        self.items = kept;
        removed
    }
}

impl<'a, T> IntoIterator for &'a Catalogue<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
