/// Product cards for the catalog grid
use iced::widget::{button, column, container, horizontal_space, row, text, Container, Space};
use iced::{Alignment, Element, Length};

use crate::state::data::Product;
use crate::state::route::Route;
use crate::Message;

pub const CARD_WIDTH: f32 = 240.0;

/// Heart glyph for a favorite flag
pub fn heart(is_favorite: bool) -> &'static str {
    if is_favorite {
        "♥"
    } else {
        "♡"
    }
}

pub fn product_card(product: &Product, is_favorite: bool) -> Element<'_, Message> {
    let favorite_button = button(text(heart(is_favorite)).size(20))
        .on_press(Message::ToggleFavorite(product.id))
        .style(button::text);

    let header = row![
        text(&product.category).size(11),
        horizontal_space(),
        favorite_button,
    ]
    .align_y(Alignment::Center);

    let body = column![
        text(&product.title).size(16),
        Space::with_height(Length::Fill),
        row![
            text(product.display_price()).size(20),
            horizontal_space(),
            text(format!("★ {}", product.rating.rate)).size(13),
        ]
        .align_y(Alignment::Center),
    ]
    .spacing(8)
    .height(Length::Fixed(120.0));

    let open = button(body)
        .on_press(Message::Navigate(Route::Product(product.id)))
        .style(button::text)
        .width(Length::Fill);

    container(column![header, open].spacing(4))
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::rounded_box)
        .into()
}

/// Placeholder shown while the catalog is loading
pub fn skeleton_card<'a>() -> Element<'a, Message> {
    let bar = |width: Length, height: f32| -> Container<'a, Message> {
        container(Space::new(width, Length::Fixed(height))).style(container::rounded_box)
    };

    container(
        column![
            bar(Length::Fixed(80.0), 12.0),
            bar(Length::Fill, 18.0),
            bar(Length::FillPortion(2), 18.0),
            Space::with_height(Length::Fixed(40.0)),
            row![bar(Length::Fixed(64.0), 20.0), horizontal_space(), bar(Length::Fixed(40.0), 20.0)],
        ]
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fixed(CARD_WIDTH))
    .height(Length::Fixed(170.0))
    .style(container::rounded_box)
    .into()
}
