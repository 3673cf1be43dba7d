// File: ./src/model/mod.rs
pub mod catalogue;
pub mod display;
pub mod event;
pub mod field;
pub mod filtered;
pub mod internship;
pub mod matcher;

pub use catalogue::{Catalogue, CatalogueError, Entry};
pub use event::Event;
pub use field::FieldError;
pub use filtered::{FilteredView, Predicate, show_all};
pub use internship::{Internship, InternshipStatus};
pub use matcher::{EventFilter, InternshipFilter, events_of};
