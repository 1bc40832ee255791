/// Catalog page: header, category chips and the product grid
use iced::widget::{button, column, container, row, scrollable, text, text_input, Row};
use iced::{Alignment, Element, Length, Theme};
use iced_aw::Wrap;

use super::card::{heart, product_card, skeleton_card};
use crate::state::catalog::CatalogViewModel;
use crate::state::filter::CategoryFilter;
use crate::Message;

/// Skeleton cards shown while loading
const SKELETON_COUNT: usize = 8;

pub fn view(vm: &CatalogViewModel) -> Element<'_, Message> {
    if let Some(message) = vm.error() {
        return error_state(message);
    }

    let content = if vm.is_loading() {
        grid((0..SKELETON_COUNT).map(|_| skeleton_card()).collect())
    } else {
        let visible = vm.visible();
        if visible.is_empty() {
            empty_state(vm.has_active_filters())
        } else {
            grid(
                visible
                    .into_iter()
                    .map(|product| product_card(product, vm.is_favorite(product.id)))
                    .collect(),
            )
        }
    };

    column![
        header(vm),
        scrollable(container(content).padding(24).width(Length::Fill)).height(Length::Fill),
    ]
    .into()
}

fn header(vm: &CatalogViewModel) -> Element<'_, Message> {
    let filter = vm.filter();

    let search = text_input("Search products...", &filter.search_query)
        .on_input(Message::SearchChanged)
        .padding(10);

    let favorites_label = format!("{} Favorites ({})", heart(true), vm.favorites().len());
    let favorites_toggle = button(text(favorites_label))
        .on_press(Message::ToggleShowOnlyFavorites)
        .padding(10)
        .style(chip_style(filter.show_only_favorites));

    let top = row![
        text("Product Explorer").size(28),
        search,
        favorites_toggle,
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let mut chips = vec![chip(
        "All Products".to_string(),
        CategoryFilter::All,
        filter.selected_category == CategoryFilter::All,
    )];
    for category in vm.categories() {
        let value = CategoryFilter::Named(category.clone());
        let selected = filter.selected_category == value;
        chips.push(chip(category.clone(), value, selected));
    }

    container(column![top, Row::with_children(chips).spacing(8)].spacing(16))
        .padding(20)
        .width(Length::Fill)
        .into()
}

fn chip<'a>(label: String, value: CategoryFilter, selected: bool) -> Element<'a, Message> {
    button(text(label).size(13))
        .on_press(Message::CategorySelected(value))
        .padding([6, 14])
        .style(chip_style(selected))
        .into()
}

fn chip_style(selected: bool) -> fn(&Theme, button::Status) -> button::Style {
    if selected {
        button::primary
    } else {
        button::secondary
    }
}

fn grid(cards: Vec<Element<'_, Message>>) -> Element<'_, Message> {
    Wrap::with_elements(cards)
        .spacing(16.0_f32)
        .line_spacing(16.0_f32)
        .into()
}

/// Hint under "No products found"
fn empty_hint(filters_active: bool) -> &'static str {
    if filters_active {
        "Try adjusting your search or filters."
    } else {
        "The catalog has no products right now."
    }
}

/// The clear button is always offered; with nothing to clear it is a no-op.
fn empty_state<'a>(filters_active: bool) -> Element<'a, Message> {
    let content = column![
        text("No products found").size(22),
        text(empty_hint(filters_active)).size(14),
        button(text("Clear all filters"))
            .on_press(Message::ClearFilters)
            .padding(10),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(60)
        .center_x(Length::Fill)
        .into()
}

fn error_state(message: &str) -> Element<'_, Message> {
    let content = column![
        container(text(message).size(16)).padding(16).style(container::rounded_box),
        button(text("Try Again")).on_press(Message::Reload).padding(10),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
