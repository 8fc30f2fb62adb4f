use std::fmt;
use tracing::{debug, info, warn};

use super::data::{Breed, BreedDetails, DogImage};
use crate::error::GalleryError;

/// Label of the synthetic "no filter" dropdown entry
pub const ALL_BREEDS_LABEL: &str = "All Breeds";

/// Identifies one image fetch. Tokens increase monotonically per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// An image fetch the caller must dispatch, then report back via
/// [`Gallery::apply_images`] with the same token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub token: RequestToken,
    /// `None` means "All Breeds"
    pub breed_filter: Option<String>,
}

/// What happened to an image fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced wholesale
    Replaced,
    /// The latest fetch failed; the previous collection stays visible
    Failed,
    /// A newer request was issued after this one; the result was dropped
    Stale,
}

/// One entry in the breed dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedOption {
    /// `None` for "All Breeds"
    pub id: Option<String>,
    pub name: String,
}

impl BreedOption {
    pub fn all() -> Self {
        Self {
            id: None,
            name: ALL_BREEDS_LABEL.to_string(),
        }
    }

    fn from_breed(breed: &Breed) -> Self {
        Self {
            id: Some(breed.id.clone()),
            name: breed.name.clone(),
        }
    }
}

impl fmt::Display for BreedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Gallery controller: all session state plus the rules for changing it.
///
/// The controller never performs I/O itself. Operations that need a fetch
/// return an [`ImageRequest`]; the caller runs it and feeds the result back.
/// This keeps every state transition synchronous and testable.
#[derive(Debug, Default)]
pub struct Gallery {
    /// The most recently fetched image collection
    images: Vec<DogImage>,
    loading_images: bool,
    breeds: Vec<Breed>,
    search_query: String,
    selected_breed_id: Option<String>,
    /// Position in `images` of the photo shown in the detail overlay
    selected_image: Option<usize>,
    dark_mode: bool,

    /// Last token handed out
    last_token: u64,
    /// Token of the fetch whose result will be accepted
    pending: Option<RequestToken>,
    /// Token of the fetch that produced `images`
    displayed: Option<RequestToken>,
    /// Failure of the latest image fetch, cleared by the next successful one
    images_error: Option<GalleryError>,
    /// Failure of the latest breed fetch, cleared by the next successful one
    breeds_error: Option<GalleryError>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Data loading ==========

    /// Start an image fetch for `breed_filter`.
    ///
    /// Sets the loading flag and supersedes any fetch still in flight:
    /// only the result carrying the returned token will be applied.
    pub fn load_images(&mut self, breed_filter: Option<String>) -> ImageRequest {
        self.last_token += 1;
        let token = RequestToken(self.last_token);

        if let Some(previous) = self.pending {
            debug!(?previous, ?token, "superseding in-flight image request");
        }

        self.pending = Some(token);
        self.loading_images = true;

        ImageRequest {
            token,
            breed_filter,
        }
    }

    /// Apply the result of the image fetch identified by `token`
    pub fn apply_images(
        &mut self,
        token: RequestToken,
        result: Result<Vec<DogImage>, GalleryError>,
    ) -> FetchOutcome {
        if self.pending != Some(token) {
            debug!(?token, pending = ?self.pending, "discarding stale image response");
            return FetchOutcome::Stale;
        }

        self.pending = None;
        self.loading_images = false;

        match result {
            Ok(images) => {
                info!(count = images.len(), ?token, "🐕 image collection loaded");
                self.images = images;
                self.displayed = Some(token);
                // Positions refer to the old collection
                self.selected_image = None;
                self.images_error = None;
                FetchOutcome::Replaced
            }
            Err(err) => {
                warn!(error = %err, network = err.is_network_failure(), "error fetching dog images");
                self.images_error = Some(err);
                FetchOutcome::Failed
            }
        }
    }

    /// Apply the result of a breed-list fetch.
    /// On failure the current list is kept.
    pub fn apply_breeds(&mut self, result: Result<Vec<Breed>, GalleryError>) {
        match result {
            Ok(breeds) => {
                info!(count = breeds.len(), "breed list loaded");
                self.breeds = breeds;
                self.breeds_error = None;
            }
            Err(err) => {
                warn!(error = %err, network = err.is_network_failure(), "error fetching breeds");
                self.breeds_error = Some(err);
            }
        }
    }

    // ========== User interaction ==========

    /// Update the breed search text. Never triggers a fetch.
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    /// Change the breed filter and start a matching image fetch.
    ///
    /// `breed_id` must be `None` or the id of a breed in the current list;
    /// anything else is rejected and returns `None`.
    pub fn select_breed(&mut self, breed_id: Option<String>) -> Option<ImageRequest> {
        if let Some(id) = &breed_id {
            if !self.breeds.iter().any(|b| &b.id == id) {
                warn!(breed_id = %id, "ignoring selection of unknown breed");
                return None;
            }
        }

        self.selected_breed_id = breed_id.clone();
        Some(self.load_images(breed_id))
    }

    /// Open the detail overlay for the image at `index`, or close it with `None`.
    /// Out-of-range positions are ignored.
    pub fn select_image(&mut self, index: Option<usize>) {
        match index {
            Some(i) if i >= self.images.len() => {
                warn!(index = i, len = self.images.len(), "ignoring selection outside the grid");
            }
            Some(i) => {
                debug!(index = i, image_id = ?self.images[i].id, "opening detail view");
                self.selected_image = Some(i);
            }
            None => self.selected_image = None,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    // ========== Derived views ==========

    /// Breeds whose name contains the search text, case-insensitively,
    /// in their original order
    pub fn filtered_breeds(&self) -> Vec<&Breed> {
        let needle = self.search_query.to_lowercase();
        self.breeds
            .iter()
            .filter(|breed| breed.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Dropdown entries: "All Breeds" followed by the filtered breeds
    pub fn breed_options(&self) -> Vec<BreedOption> {
        std::iter::once(BreedOption::all())
            .chain(self.filtered_breeds().into_iter().map(BreedOption::from_breed))
            .collect()
    }

    /// The dropdown entry matching the current breed filter
    pub fn selected_option(&self) -> BreedOption {
        self.selected_breed_id()
            .and_then(|id| self.breeds.iter().find(|b| b.id == id))
            .map(BreedOption::from_breed)
            .unwrap_or_else(BreedOption::all)
    }

    /// Attributes for the detail overlay, if it is open
    pub fn detail(&self) -> Option<BreedDetails> {
        self.selected_image().map(BreedDetails::for_image)
    }

    // ========== Accessors ==========

    pub fn images(&self) -> &[DogImage] {
        &self.images
    }

    pub fn is_loading_images(&self) -> bool {
        self.loading_images
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_breed_id(&self) -> Option<&str> {
        self.selected_breed_id.as_deref()
    }

    pub fn selected_image(&self) -> Option<&DogImage> {
        self.selected_image.and_then(|i| self.images.get(i))
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Token of the fetch currently awaited, if any
    pub fn pending_request(&self) -> Option<RequestToken> {
        self.pending
    }

    /// Token of the fetch that produced the visible collection
    pub fn displayed_request(&self) -> Option<RequestToken> {
        self.displayed
    }

    pub fn images_error(&self) -> Option<&GalleryError> {
        self.images_error.as_ref()
    }

    pub fn breeds_error(&self) -> Option<&GalleryError> {
        self.breeds_error.as_ref()
    }
}
