use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::Settings;
use crate::error::GalleryError;
use crate::state::data::{Breed, DogImage};

/// Number of photos requested per image search
pub const PAGE_SIZE: usize = 10;

/// Header TheDogAPI reads the API key from
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for TheDogAPI.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Clone)]
pub struct DogApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl DogApiClient {
    pub fn new(settings: &Settings) -> Result<Self, GalleryError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(concat!("dog-gallery/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// `GET /breeds`
    pub async fn breeds(&self) -> Result<Vec<Breed>, GalleryError> {
        self.get_json("/breeds", &[]).await
    }

    /// `GET /images/search?limit=10&has_breeds=true[&breed_ids=<id>]`
    pub async fn search_images(
        &self,
        breed_filter: Option<&str>,
    ) -> Result<Vec<DogImage>, GalleryError> {
        let mut query = vec![
            ("limit", PAGE_SIZE.to_string()),
            ("has_breeds", "true".to_string()),
        ];
        if let Some(breed_id) = breed_filter {
            query.push(("breed_ids", breed_id.to_string()));
        }

        self.get_json("/images/search", &query).await
    }

    /// Download a photo. The API key is not attached: photos live on a CDN host.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, GalleryError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(url, size = bytes.len(), "photo downloaded");
        Ok(bytes.to_vec())
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, GalleryError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status(status.as_u16()));
        }

        // Read the body first so a malformed payload is a decode failure,
        // not a transport one
        let body = response.bytes().await?;
        debug!(%url, size = body.len(), "api response received");
        Ok(serde_json::from_slice(&body)?)
    }
}

impl std::fmt::Debug for DogApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DogApiClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}
