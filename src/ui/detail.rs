use iced::font::Weight;
use iced::widget::{button, center, column, container, image, opaque, row, stack, text};
use iced::{Alignment, Color, ContentFit, Element, Font, Length};

use crate::media::preview::TilePhoto;
use crate::state::data::BreedDetails;
use crate::Message;

/// Card with the enlarged photo and the breed attributes.
/// Every field in `details` already carries its fallback text.
pub fn view<'a>(details: BreedDetails, photo: Option<&TilePhoto>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match photo {
        Some(TilePhoto::Ready(preview)) => image(preview.full.clone())
            .width(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        Some(TilePhoto::Unavailable) => text("Image unavailable").into(),
        None => text("Loading…").into(),
    };

    let card = column![
        picture,
        text(format!("🐾 {}", details.name)).size(24),
        attribute("Temperament", details.temperament),
        attribute("Weight", details.weight),
        attribute("Life Span", details.life_span),
        button("Close")
            .on_press(Message::CloseDetail)
            .padding(10)
            .style(button::danger),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    container(card)
        .padding(20)
        .max_width(520.0)
        .style(container::rounded_box)
        .into()
}

fn attribute<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    let bold = Font {
        weight: Weight::Bold,
        ..Font::DEFAULT
    };

    row![text(format!("{}:", label)).font(bold), text(value)]
        .spacing(6)
        .into()
}

/// Lay `content` over `base` behind a dimmed backdrop that swallows input
pub fn overlay<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(center(opaque(content)).style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.75,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }))
    ]
    .into()
}
