/// Remote API module
///
/// This module handles:
/// - Fetching the breed list
/// - Searching for a page of dog photos, optionally filtered by breed
/// - Downloading photo bytes for the grid and detail view

pub mod client;

pub use client::DogApiClient;
