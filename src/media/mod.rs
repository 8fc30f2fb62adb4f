/// Photo handling module
///
/// This module handles:
/// - Downloading the photos referenced by the current image collection
/// - Generating grid thumbnails
/// - Keeping the original bytes for the enlarged detail view

pub mod preview;
