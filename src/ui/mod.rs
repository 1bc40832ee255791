/// Presentation layer
///
/// Pure display over the view-models; every interaction is turned
/// into a `Message` and handled in `main.rs`.

pub mod card;
pub mod catalog;
pub mod detail;
