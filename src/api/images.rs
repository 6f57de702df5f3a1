use crate::error::{CollectionError, CollectionResult};

const USER_AGENT: &str = "TCG-Collection/1.0";

/// Retrieves raw image bytes for a URL
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> CollectionResult<Vec<u8>>;
}

/// Fetches images over HTTP with a reused blocking client
#[derive(Debug, Clone, Default)]
pub struct HttpImageFetcher {
    client: reqwest::blocking::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> CollectionResult<Vec<u8>> {
        fetch_with(&self.client, url)
    }
}

/// Fetch image bytes with a one-off client
pub fn fetch_image(url: &str) -> CollectionResult<Vec<u8>> {
    fetch_with(&reqwest::blocking::Client::new(), url)
}

fn fetch_with(client: &reqwest::blocking::Client, url: &str) -> CollectionResult<Vec<u8>> {
    log::debug!("Fetching image: {}", url);

    let response = client.get(url).header("User-Agent", USER_AGENT).send()?;

    if response.status().is_success() {
        Ok(response.bytes()?.to_vec())
    } else {
        Err(CollectionError::HttpStatus(response.status()))
    }
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
