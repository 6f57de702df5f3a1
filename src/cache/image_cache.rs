use crate::api::{HttpImageFetcher, ImageFetcher};
use crate::error::{CollectionError, CollectionResult};
use std::collections::HashMap;

/// Per-process cache of card images keyed by URL.
/// Entries live as long as the cache; nothing is evicted.
pub struct ImageCache<F = HttpImageFetcher> {
    fetcher: F,
    images: HashMap<String, Vec<u8>>,
}

impl Default for ImageCache<HttpImageFetcher> {
    fn default() -> Self {
        Self::new(HttpImageFetcher::new())
    }
}

impl<F: ImageFetcher> ImageCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            images: HashMap::new(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns the image at `url`, fetching it on first use.
    /// Bytes that are not a recognisable image are rejected and not cached.
    pub fn get_or_fetch(&mut self, url: &str) -> CollectionResult<&[u8]> {
        if self.images.contains_key(url) {
            log::info!("Image cache hit for {}", url);
        } else {
            log::info!("Image cache miss for {}, fetching", url);
            let bytes = self.fetcher.fetch(url)?;
            let format = image::guess_format(&bytes)
                .map_err(|e| CollectionError::Image(format!("{url}: {e}")))?;
            log::debug!("Cached {:?} image ({} bytes) for {}", format, bytes.len(), url);
            self.images.insert(url.to_string(), bytes);
        }

        self.images
            .get(url)
            .map(Vec::as_slice)
            .ok_or_else(|| CollectionError::Image(format!("{url}: missing from cache")))
    }
}
