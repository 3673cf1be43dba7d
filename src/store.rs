// File: src/store.rs
//! In-memory model: both catalogues, their filtered views, the user prefs and
//! the selected internship.
//!
//! `ModelManager` is the only owner of catalogue contents. Commands receive a
//! `&mut ModelManager` and go through the methods here.
use crate::config::UserPrefs;
use crate::model::{
    Catalogue, CatalogueError, Event, FilteredView, Internship, Predicate, events_of,
};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ModelManager {
    internships: Catalogue<Internship>,
    events: Catalogue<Event>,
    filtered_internships: FilteredView<Internship>,
    filtered_events: FilteredView<Event>,
    prefs: UserPrefs,
    selected: Option<Uuid>,
}

impl ModelManager {
    /// Builds a model from loaded catalogues. Events that point at an
    /// internship missing from `internships` are dropped.
    pub fn new(
        internships: Catalogue<Internship>,
        mut events: Catalogue<Event>,
        prefs: UserPrefs,
    ) -> Self {
        let orphans =
            events.remove_where(|e| !internships.iter().any(|i| e.belongs_to(i.id())));
        if !orphans.is_empty() {
            log::warn!(
                "Dropped {} event(s) whose internship no longer exists",
                orphans.len()
            );
        }
        Self::restore(internships, events, prefs)
    }

    /// Like [`ModelManager::new`] but keeps every event as given. Used when
    /// the internship catalogue could not be read, so a missing internship
    /// says nothing about whether an event is orphaned.
    pub fn restore(
        internships: Catalogue<Internship>,
        events: Catalogue<Event>,
        prefs: UserPrefs,
    ) -> Self {
        log::debug!(
            "Initializing model with {} internships, {} events and prefs {:?}",
            internships.len(),
            events.len(),
            prefs
        );
        Self {
            internships,
            events,
            filtered_internships: FilteredView::new(),
            filtered_events: FilteredView::new(),
            prefs,
            selected: None,
        }
    }

    // --- User prefs ---

    pub fn user_prefs(&self) -> &UserPrefs {
        &self.prefs
    }

    pub fn set_user_prefs(&mut self, prefs: UserPrefs) {
        self.prefs = prefs;
    }

    // --- Internships ---

    pub fn internship_catalogue(&self) -> &Catalogue<Internship> {
        &self.internships
    }

    pub fn has_internship(&self, internship: &Internship) -> bool {
        self.internships.contains(internship)
    }

    pub fn find_internship(&self, id: Uuid) -> Option<&Internship> {
        self.internships.iter().find(|i| i.id() == id)
    }

    /// Adds `internship` and resets the internship view so it is visible.
    pub fn add_internship(&mut self, internship: Internship) -> Result<(), CatalogueError> {
        self.internships.add(internship)?;
        self.filtered_internships.reset();
        Ok(())
    }

    /// Removes `target` together with every event attached to it. The
    /// selection is left as it is.
    pub fn delete_internship(&mut self, target: &Internship) -> Result<(), CatalogueError> {
        self.internships.remove(target)?;
        let id = target.id();
        let removed = self.events.remove_where(|e| e.belongs_to(id));
        if !removed.is_empty() {
            log::info!(
                "Removed {} event(s) attached to deleted internship {}",
                removed.len(),
                id
            );
        }
        Ok(())
    }

    pub fn set_internship(
        &mut self,
        target: &Internship,
        edited: Internship,
    ) -> Result<(), CatalogueError> {
        self.internships.set(target, edited)
    }

    pub fn filtered_internships(&self) -> Vec<&Internship> {
        self.filtered_internships.items(&self.internships)
    }

    /// Owned copy of the internship view, for command results.
    pub fn filtered_internship_list(&self) -> Vec<Internship> {
        self.filtered_internships().into_iter().cloned().collect()
    }

    pub fn filtered_internship(&self, zero_based: usize) -> Option<&Internship> {
        self.filtered_internships.get(&self.internships, zero_based)
    }

    pub fn update_filtered_internship_list(&mut self, predicate: Predicate<Internship>) {
        self.filtered_internships.set_predicate(predicate);
    }

    pub fn show_all_internships(&mut self) {
        self.filtered_internships.reset();
    }

    // --- Events ---

    pub fn event_catalogue(&self) -> &Catalogue<Event> {
        &self.events
    }

    pub fn has_event(&self, event: &Event) -> bool {
        self.events.contains(event)
    }

    /// Adds `event` and resets the event view so it is visible.
    pub fn add_event(&mut self, event: Event) -> Result<(), CatalogueError> {
        self.events.add(event)?;
        self.filtered_events.reset();
        Ok(())
    }

    pub fn delete_event(&mut self, target: &Event) -> Result<(), CatalogueError> {
        self.events.remove(target)
    }

    pub fn set_event(&mut self, target: &Event, edited: Event) -> Result<(), CatalogueError> {
        self.events.set(target, edited)
    }

    pub fn events_of(&self, internship: Uuid) -> Vec<&Event> {
        self.events.iter().filter(|e| e.belongs_to(internship)).collect()
    }

    pub fn filtered_events(&self) -> Vec<&Event> {
        self.filtered_events.items(&self.events)
    }

    pub fn filtered_event_list(&self) -> Vec<Event> {
        self.filtered_events().into_iter().cloned().collect()
    }

    pub fn filtered_event(&self, zero_based: usize) -> Option<&Event> {
        self.filtered_events.get(&self.events, zero_based)
    }

    pub fn update_filtered_event_list(&mut self, predicate: Predicate<Event>) {
        self.filtered_events.set_predicate(predicate);
    }

    pub fn show_all_events(&mut self) {
        self.filtered_events.reset();
    }

    // --- Selection ---

    /// Sets the selection, or clears it with `None`.
    pub fn update_selected_internship(&mut self, internship: Option<&Internship>) {
        self.selected = internship.map(Internship::id);
    }

    pub fn selected_internship_id(&self) -> Option<Uuid> {
        self.selected
    }

    /// The selected internship, if it is still in the catalogue.
    pub fn selected_internship(&self) -> Option<&Internship> {
        self.selected.and_then(|id| self.find_internship(id))
    }

    /// Points the event view at the events of `internship`.
    pub fn scope_events_to(&mut self, internship: Uuid) {
        self.filtered_events.set_predicate(events_of(internship));
    }

    /// Empties both catalogues, clears the selection and resets both views.
    pub fn clear(&mut self) {
        self.internships.clear();
        self.events.clear();
        self.selected = None;
        self.filtered_internships.reset();
        self.filtered_events.reset();
    }
}
