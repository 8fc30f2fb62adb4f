use anyhow::Context;
use iced::widget::{column, container, scrollable};
use iced::{keyboard, Element, Length, Subscription, Task, Theme};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod error;
mod media;
mod state;
mod ui;

use api::DogApiClient;
use error::GalleryError;
use media::preview::{load_preview, ImagePreview, TilePhoto};
use state::data::{Breed, DogImage};
use state::gallery::{BreedOption, FetchOutcome, Gallery, ImageRequest, RequestToken};

/// Main application state
struct DogGallery {
    /// Client for the dog API
    client: DogApiClient,
    /// Session state: breeds, images, selection, theme
    gallery: Gallery,
    /// Downloaded photos for the displayed collection, keyed by URL
    photos: HashMap<String, TilePhoto>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Breed list fetch resolved
    BreedsLoaded(Result<Vec<Breed>, GalleryError>),
    /// Image search resolved for the request with this token
    ImagesLoaded(RequestToken, Result<Vec<DogImage>, GalleryError>),
    /// A tile photo finished downloading for the collection with this token
    PhotoLoaded(RequestToken, String, Result<ImagePreview, GalleryError>),
    /// User typed in the breed search box
    SearchChanged(String),
    /// User picked an entry in the breed dropdown
    BreedSelected(BreedOption),
    /// User clicked the tile at this position in the collection with this token
    ImageSelected(RequestToken, usize),
    /// User closed the detail overlay
    CloseDetail,
    /// User clicked the theme button
    ToggleTheme,
}

impl DogGallery {
    /// Create the application and kick off the two initial fetches
    fn new(client: DogApiClient) -> (Self, Task<Message>) {
        let mut app = DogGallery {
            client,
            gallery: Gallery::new(),
            photos: HashMap::new(),
        };

        // Independent fetches: either may resolve first, either may fail alone
        let startup = Task::batch([app.load_breeds(), app.load_images(None)]);

        (app, startup)
    }

    /// Request the breed list
    fn load_breeds(&self) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move { client.breeds().await },
            Message::BreedsLoaded,
        )
    }

    /// Request a fresh page of images, superseding any request in flight
    fn load_images(&mut self, breed_filter: Option<String>) -> Task<Message> {
        let request = self.gallery.load_images(breed_filter);
        self.dispatch(request)
    }

    fn dispatch(&self, request: ImageRequest) -> Task<Message> {
        let client = self.client.clone();
        let ImageRequest {
            token,
            breed_filter,
        } = request;

        Task::perform(
            async move { client.search_images(breed_filter.as_deref()).await },
            move |result| Message::ImagesLoaded(token, result),
        )
    }

    /// Download every photo of the displayed collection in parallel
    fn load_photos(&self) -> Task<Message> {
        let Some(token) = self.gallery.displayed_request() else {
            return Task::none();
        };

        Task::batch(self.gallery.images().iter().map(|dog| {
            let url = dog.url.clone();
            Task::perform(
                load_preview(self.client.clone(), url.clone()),
                move |result| Message::PhotoLoaded(token, url.clone(), result),
            )
        }))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BreedsLoaded(result) => {
                self.gallery.apply_breeds(result);
                Task::none()
            }
            Message::ImagesLoaded(token, result) => {
                match self.gallery.apply_images(token, result) {
                    FetchOutcome::Replaced => {
                        self.photos.clear();
                        self.load_photos()
                    }
                    FetchOutcome::Failed | FetchOutcome::Stale => Task::none(),
                }
            }
            Message::PhotoLoaded(token, url, result) => {
                if self.gallery.displayed_request() != Some(token) {
                    debug!(%url, "dropping photo for a replaced collection");
                    return Task::none();
                }

                let photo = match result {
                    Ok(preview) => TilePhoto::Ready(preview),
                    Err(err) => {
                        warn!(%url, error = %err, "error loading photo");
                        TilePhoto::Unavailable
                    }
                };
                self.photos.insert(url, photo);
                Task::none()
            }
            Message::SearchChanged(text) => {
                self.gallery.set_search_query(text);
                Task::none()
            }
            Message::BreedSelected(option) => match self.gallery.select_breed(option.id) {
                Some(request) => self.dispatch(request),
                None => Task::none(),
            },
            Message::ImageSelected(token, index) => {
                if self.gallery.displayed_request() != Some(token) {
                    debug!(index, "dropping click on a replaced collection");
                    return Task::none();
                }

                self.gallery.select_image(Some(index));
                Task::none()
            }
            Message::CloseDetail => {
                self.gallery.select_image(None);
                Task::none()
            }
            Message::ToggleTheme => {
                self.gallery.toggle_theme();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page = column![
            ui::toolbar::view(&self.gallery),
            ui::grid::view(&self.gallery, &self.photos),
        ]
        .spacing(24)
        .padding(20);

        let page = scrollable(container(page).width(Length::Fill)).height(Length::Fill);

        match self.gallery.detail() {
            Some(details) => {
                let photo = self
                    .gallery
                    .selected_image()
                    .and_then(|dog| self.photos.get(&dog.url));
                ui::detail::overlay(page, ui::detail::view(details, photo))
            }
            None => page.into(),
        }
    }

    /// Escape closes the detail overlay
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::CloseDetail),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.gallery.is_dark_mode() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dog_gallery=info")),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let settings = config::load_settings();
    info!(?settings, "🎨 Dog Gallery starting");

    let client = DogApiClient::new(&settings).context("failed to build HTTP client")?;

    iced::application("Dog Gallery", DogGallery::update, DogGallery::view)
        .theme(DogGallery::theme)
        .subscription(DogGallery::subscription)
        .centered()
        .run_with(move || DogGallery::new(client))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use iced::widget::image::Handle;

    fn app() -> DogGallery {
        let settings = Settings {
            api_base: "http://127.0.0.1:9".into(),
            ..Settings::default()
        };
        let (app, _startup) = DogGallery::new(DogApiClient::new(&settings).unwrap());
        app
    }

    fn beagle() -> Breed {
        Breed {
            id: "1".into(),
            name: "Beagle".into(),
            temperament: None,
            weight: None,
            life_span: None,
        }
    }

    fn dogs(count: usize) -> Vec<DogImage> {
        (0..count)
            .map(|n| DogImage {
                id: Some(n.to_string()),
                url: format!("https://cdn.example/{}.jpg", n),
                breeds: vec![],
            })
            .collect()
    }

    fn preview() -> ImagePreview {
        ImagePreview {
            thumbnail: Handle::from_rgba(1, 1, vec![0u8, 0, 0, 255]),
            full: Handle::from_bytes(vec![0u8]),
        }
    }

    #[test]
    fn test_startup_requests_images() {
        let app = app();
        assert!(app.gallery.is_loading_images());
        assert!(app.gallery.pending_request().is_some());
    }

    #[test]
    fn test_initial_load_without_filter() {
        let mut app = app();
        let token = app.gallery.pending_request().unwrap();

        let _ = app.update(Message::BreedsLoaded(Ok(vec![beagle()])));
        let _ = app.update(Message::ImagesLoaded(token, Ok(dogs(10))));

        assert_eq!(app.gallery.breed_options().len(), 2);
        assert_eq!(app.gallery.images().len(), 10);
        assert!(!app.gallery.is_loading_images());
    }

    #[test]
    fn test_breed_filter_replaces_grid() {
        let mut app = app();
        let initial = app.gallery.pending_request().unwrap();
        let _ = app.update(Message::BreedsLoaded(Ok(vec![beagle()])));
        let _ = app.update(Message::ImagesLoaded(initial, Ok(dogs(10))));
        let _ = app.update(Message::PhotoLoaded(
            initial,
            "https://cdn.example/0.jpg".into(),
            Ok(preview()),
        ));
        assert_eq!(app.photos.len(), 1);

        let _ = app.update(Message::BreedSelected(BreedOption {
            id: Some("1".into()),
            name: "Beagle".into(),
        }));
        let filtered = app.gallery.pending_request().unwrap();
        assert_ne!(filtered, initial);

        let _ = app.update(Message::ImagesLoaded(filtered, Ok(vec![])));
        assert!(app.gallery.images().is_empty());
        assert!(app.photos.is_empty());
    }

    #[test]
    fn test_photo_for_replaced_collection_is_dropped() {
        let mut app = app();
        let first = app.gallery.pending_request().unwrap();
        let _ = app.update(Message::ImagesLoaded(first, Ok(dogs(2))));

        let second = app.gallery.load_images(None).token;
        let _ = app.update(Message::ImagesLoaded(second, Ok(dogs(2))));

        let _ = app.update(Message::PhotoLoaded(
            first,
            "https://cdn.example/0.jpg".into(),
            Ok(preview()),
        ));
        assert!(app.photos.is_empty());

        let _ = app.update(Message::PhotoLoaded(
            second,
            "https://cdn.example/1.jpg".into(),
            Err(GalleryError::Status(404)),
        ));
        assert!(matches!(
            app.photos.get("https://cdn.example/1.jpg"),
            Some(TilePhoto::Unavailable)
        ));
    }

    #[test]
    fn test_click_on_replaced_collection_is_dropped() {
        let mut app = app();
        let first = app.gallery.pending_request().unwrap();
        let _ = app.update(Message::ImagesLoaded(first, Ok(dogs(4))));

        let second = app.gallery.load_images(None).token;
        let _ = app.update(Message::ImagesLoaded(second, Ok(dogs(4))));

        // Queued before the replacement landed
        let _ = app.update(Message::ImageSelected(first, 1));
        assert!(app.gallery.selected_image().is_none());

        let _ = app.update(Message::ImageSelected(second, 1));
        assert_eq!(
            app.gallery.selected_image().map(|d| d.url.as_str()),
            Some("https://cdn.example/1.jpg")
        );
    }

    #[test]
    fn test_failed_breeds_do_not_block_images() {
        let mut app = app();
        let token = app.gallery.pending_request().unwrap();
        let _ = app.update(Message::BreedsLoaded(Err(GalleryError::Network("refused".into()))));
        let _ = app.update(Message::ImagesLoaded(token, Ok(dogs(3))));

        assert_eq!(app.gallery.breed_options(), vec![BreedOption::all()]);
        assert_eq!(app.gallery.images().len(), 3);
    }

    #[test]
    fn test_select_close_and_theme() {
        let mut app = app();
        let token = app.gallery.pending_request().unwrap();
        let _ = app.update(Message::ImagesLoaded(token, Ok(dogs(4))));

        let _ = app.update(Message::ImageSelected(token, 2));
        assert_eq!(app.gallery.selected_image().map(|d| d.url.as_str()), Some("https://cdn.example/2.jpg"));

        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.theme(), Theme::Dark);
        assert!(app.gallery.selected_image().is_some());

        let _ = app.update(Message::CloseDetail);
        assert!(app.gallery.selected_image().is_none());
        assert_eq!(app.gallery.images().len(), 4);

        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn test_search_changes_options_only() {
        let mut app = app();
        let pending = app.gallery.pending_request();
        let _ = app.update(Message::BreedsLoaded(Ok(vec![beagle()])));

        let _ = app.update(Message::SearchChanged("xyz".into()));
        assert_eq!(app.gallery.breed_options().len(), 1);
        assert_eq!(app.gallery.pending_request(), pending);
    }
}
