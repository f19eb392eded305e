/// Fetch → Decode → Store, in that order
///
/// The workflow short-circuits on the first failing step and never lets an
/// error or panic escape: callers only see an image or nothing. Storing is
/// best effort. A failed save is logged, and the decoded image is still
/// returned so it can be displayed.

use log::{debug, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task;

use crate::notify::Notification;

use super::decoder;
use super::fetcher::{HttpFetcher, ImageFetcher};
use super::store::ImageStore;
use super::DownloadedImage;

/// Where a workflow run currently is, or where it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Decoding,
    Storing,
    Done,
    Failed,
}

/// Result of one run
#[derive(Debug, Clone)]
pub enum DownloadOutcome {
    /// Empty URL; no step was started
    InvalidUrl,
    /// Image fetched and decoded
    Downloaded(DownloadedImage),
    /// Fetch or decode failed
    Failed,
}

impl DownloadOutcome {
    pub fn into_image(self) -> Option<DownloadedImage> {
        match self {
            DownloadOutcome::Downloaded(image) => Some(image),
            DownloadOutcome::InvalidUrl | DownloadOutcome::Failed => None,
        }
    }

    pub fn notification(&self) -> Notification {
        match self {
            DownloadOutcome::InvalidUrl => Notification::InvalidUrl,
            DownloadOutcome::Downloaded(_) => Notification::Downloaded,
            DownloadOutcome::Failed => Notification::Failed,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            DownloadOutcome::InvalidUrl => Stage::Idle,
            DownloadOutcome::Downloaded(_) => Stage::Done,
            DownloadOutcome::Failed => Stage::Failed,
        }
    }
}

/// The download pipeline, generic over how bytes are fetched
#[derive(Debug)]
pub struct DownloadWorkflow<F = HttpFetcher> {
    fetcher: F,
    store: ImageStore,
}

impl DownloadWorkflow<HttpFetcher> {
    /// HTTP fetching, saving into the default pictures location
    pub fn with_defaults() -> Self {
        Self::new(HttpFetcher::new(), ImageStore::default_location())
    }
}

impl<F: ImageFetcher> DownloadWorkflow<F> {
    pub fn new(fetcher: F, store: ImageStore) -> Self {
        Self { fetcher, store }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Run the whole pipeline for one URL. Blocks on network and disk I/O.
    pub fn run(&self, url: &str) -> DownloadOutcome {
        if url.is_empty() {
            debug!("Empty URL, nothing to download");
            return DownloadOutcome::InvalidUrl;
        }

        let image = match catch_fault(|| self.fetch_and_decode(url)) {
            Some(image) => image,
            None => {
                info!("Download failed: {}", url);
                return DownloadOutcome::Failed;
            }
        };

        debug!("Stage: {:?}", Stage::Storing);
        let stored = catch_fault(|| match self.store.save(&image) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Could not save downloaded image: {}", e);
                None
            }
        });
        if let Some(path) = stored {
            info!("Stored image at {}", path.display());
        }

        info!("Downloaded {}x{} image from {}", image.width(), image.height(), url);
        DownloadOutcome::Downloaded(image)
    }

    /// Convenience form of `run` that only reports the image
    pub fn download(&self, url: &str) -> Option<DownloadedImage> {
        self.run(url).into_image()
    }

    fn fetch_and_decode(&self, url: &str) -> Option<DownloadedImage> {
        debug!("Stage: {:?}", Stage::Fetching);
        let bytes = self
            .fetcher
            .fetch(url)
            .map_err(|e| warn!("Fetch failed for {}: {}", url, e))
            .ok()?;

        debug!("Stage: {:?}", Stage::Decoding);
        decoder::decode(&bytes)
            .map_err(|e| warn!("Decode failed for {}: {}", url, e))
            .ok()
    }
}

/// Run a step, turning a panic into `None`
fn catch_fault<T>(step: impl FnOnce() -> Option<T>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(step)) {
        Ok(value) => value,
        Err(payload) => {
            warn!("Unexpected fault during download: {}", panic_message(&*payload));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Download with the default HTTP fetcher and storage location
pub fn download_image(url: &str) -> Option<DownloadedImage> {
    DownloadWorkflow::with_defaults().download(url)
}

/// Run the workflow on tokio's blocking pool so the UI thread never waits
/// on the network or the disk
pub async fn download_image_async<F>(
    workflow: Arc<DownloadWorkflow<F>>,
    url: String,
) -> Option<DownloadedImage>
where
    F: ImageFetcher + 'static,
{
    task::spawn_blocking(move || workflow.download(&url))
        .await
        .unwrap_or_else(|e| {
            warn!("Download task join error: {}", e);
            None
        })
}
