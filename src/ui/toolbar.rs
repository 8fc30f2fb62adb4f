use iced::widget::{button, column, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::gallery::Gallery;
use crate::Message;

const CONTROL_WIDTH: f32 = 240.0;

/// Heading, theme toggle, breed search/filter and the status line
pub fn view(gallery: &Gallery) -> Element<'_, Message> {
    let theme_label = if gallery.is_dark_mode() {
        "Light Mode"
    } else {
        "Dark Mode"
    };

    let search = text_input("Search Breeds...", gallery.search_query())
        .on_input(Message::SearchChanged)
        .padding(8)
        .width(Length::Fixed(CONTROL_WIDTH));

    // Options are re-derived from the breed list and search text on every view
    let breed_filter = pick_list(
        gallery.breed_options(),
        Some(gallery.selected_option()),
        Message::BreedSelected,
    )
    .padding(8)
    .width(Length::Fixed(CONTROL_WIDTH));

    column![
        text("🐶 Dog Gallery").size(36),
        button(theme_label)
            .on_press(Message::ToggleTheme)
            .padding(10),
        row![search, breed_filter]
            .spacing(16)
            .align_y(Alignment::Center),
        text(status_line(gallery)).size(16),
    ]
    .spacing(20)
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .into()
}

fn status_line(gallery: &Gallery) -> String {
    let mut parts = Vec::new();

    if gallery.is_loading_images() {
        parts.push("Loading images...".to_string());
    }
    if let Some(err) = gallery.images_error() {
        parts.push(format!("⚠️  Images: {}", err));
    }
    if let Some(err) = gallery.breeds_error() {
        parts.push(format!("⚠️  Breeds: {}", err));
    }

    if parts.is_empty() {
        format!("{} photos", gallery.images().len())
    } else {
        parts.join("  ·  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;

    #[test]
    fn test_status_line() {
        let mut gallery = Gallery::new();
        let request = gallery.load_images(None);
        assert_eq!(status_line(&gallery), "Loading images...");

        gallery.apply_images(request.token, Err(GalleryError::Status(503)));
        assert!(status_line(&gallery).contains("HTTP 503"));

        let request = gallery.load_images(None);
        gallery.apply_images(request.token, Ok(vec![]));
        assert_eq!(status_line(&gallery), "0 photos");
    }

    #[test]
    fn test_status_line_keeps_breed_error_visible() {
        let mut gallery = Gallery::new();
        let request = gallery.load_images(None);
        gallery.apply_breeds(Err(GalleryError::Network("connection refused".into())));

        // Shown alongside the loading indicator
        let status = status_line(&gallery);
        assert!(status.contains("Loading images..."));
        assert!(status.contains("Breeds: request failed"));

        gallery.apply_images(request.token, Ok(vec![]));
        let status = status_line(&gallery);
        assert!(status.contains("Breeds: request failed"));
        assert!(!status.contains("Images:"));
    }
}
