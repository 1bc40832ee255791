use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Alignment, Element, Length, Theme};

use super::card::heart;
use crate::state::data::Product;
use crate::state::detail::{DetailState, DetailViewModel};
use crate::Message;

pub fn view(vm: &DetailViewModel) -> Element<'_, Message> {
    match vm.state() {
        DetailState::Loading => centered(column![text("Loading...").size(18)]),
        DetailState::NotFound => centered(
            column![
                text("Product not found").size(26),
                button(text("← Go back")).on_press(Message::Back).style(button::text),
            ]
            .spacing(16)
            .align_x(Alignment::Center),
        ),
        DetailState::Found(product) => found(product, vm.is_favorite()),
    }
}

fn found(product: &Product, is_favorite: bool) -> Element<'_, Message> {
    let back = button(text("← Back to products"))
        .on_press(Message::Back)
        .style(button::text);

    let style: fn(&Theme, button::Status) -> button::Style = if is_favorite {
        button::danger
    } else {
        button::secondary
    };
    let favorite = button(text(heart(is_favorite)).size(24))
        .on_press(Message::ToggleDetailFavorite)
        .padding([4, 12])
        .style(style);

    let rating = text(format!(
        "★ {} ({} reviews)",
        product.rating.rate, product.rating.count
    ))
    .size(14);

    let content = column![
        back,
        row![text(&product.category).size(12), horizontal_space(), favorite]
            .align_y(Alignment::Center),
        text(&product.title).size(30),
        rating,
        text(product.display_price()).size(34),
        text("Description").size(16),
        text(&product.description).size(15),
    ]
    .spacing(16)
    .max_width(800);

    scrollable(container(content).padding(32).center_x(Length::Fill)).into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
