//! Page definitions and the persistent page controller

pub mod controller;
pub mod definitions;

pub use controller::{PageController, Transition};
pub use definitions::{page, Field, FieldFormat, PageDef, PAGES, PAGE_COUNT};
