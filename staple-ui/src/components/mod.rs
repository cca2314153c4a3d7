//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod guard;
pub mod loading;
pub mod nav;

pub use guard::Guarded;
pub use loading::{LoaderButton, Loading};
pub use nav::Nav;
