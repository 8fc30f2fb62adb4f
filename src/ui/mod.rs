/// View builders for the gallery window
///
/// - toolbar.rs: heading, theme toggle, breed search and dropdown, status line
/// - grid.rs: the wrapped grid of photo tiles
/// - detail.rs: the modal overlay with the enlarged photo and breed attributes

pub mod detail;
pub mod grid;
pub mod toolbar;
