use iced::widget::{button, container, image, text};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::media::preview::TilePhoto;
use crate::state::gallery::{Gallery, RequestToken};
use crate::Message;

/// Edge length of a grid tile in logical pixels
const TILE_SIZE: f32 = 256.0;

/// One tile per image in the current collection, in order.
/// `photos` is keyed by image URL.
pub fn view<'a>(gallery: &'a Gallery, photos: &'a HashMap<String, TilePhoto>) -> Element<'a, Message> {
    let images = gallery.images();
    let token = gallery.displayed_request();

    let Some(token) = token.filter(|_| !images.is_empty()) else {
        let label = if gallery.is_loading_images() {
            ""
        } else {
            "No photos to show"
        };
        return container(text(label))
            .padding(40)
            .center_x(Length::Fill)
            .into();
    };

    let tiles: Vec<Element<'a, Message>> = images
        .iter()
        .enumerate()
        .map(|(index, dog)| tile(token, index, photos.get(&dog.url)))
        .collect();

    container(Wrap::with_elements(tiles).spacing(16.0).line_spacing(16.0))
        .center_x(Length::Fill)
        .into()
}

fn tile<'a>(token: RequestToken, index: usize, photo: Option<&TilePhoto>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match photo {
        Some(TilePhoto::Ready(preview)) => image(preview.thumbnail.clone())
            .width(Length::Fixed(TILE_SIZE))
            .height(Length::Fixed(TILE_SIZE))
            .content_fit(ContentFit::Cover)
            .into(),
        Some(TilePhoto::Unavailable) => placeholder("Image unavailable"),
        None => placeholder("Loading…"),
    };

    button(content)
        .on_press(Message::ImageSelected(token, index))
        .padding(6)
        .style(button::secondary)
        .into()
}

fn placeholder<'a>(label: &'static str) -> Element<'a, Message> {
    container(text(label))
        .center_x(Length::Fixed(TILE_SIZE))
        .center_y(Length::Fixed(TILE_SIZE))
        .into()
}
