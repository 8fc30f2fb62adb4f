/// State management module
///
/// This module handles all application state, including:
/// - Data structures deserialized from the dog API (data.rs)
/// - The gallery controller: session state and its transitions (gallery.rs)

pub mod data;
pub mod gallery;
