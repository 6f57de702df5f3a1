//! Clients for external services

pub mod images;

pub use images::{fetch_image, HttpImageFetcher, ImageFetcher};
