/// Screen state, independent of the widget toolkit
///
/// Everything the window shows lives here and changes only through
/// `submit` (button press) and `finish` (download result).

use log::{debug, info};

use crate::download::DownloadedImage;
use crate::notify::{Notification, Notifier};

/// One download the UI has asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    /// Increases with every accepted button press
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct ViewState {
    /// Current contents of the URL field
    pub url: String,
    /// Last successfully downloaded image
    pub image: Option<DownloadedImage>,
    /// Generation of the most recent request
    pub generation: u64,
    /// Downloads started but not yet finished
    pub in_flight: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
    }

    /// Handle a press of the download button.
    /// Returns the request to run, or `None` if the URL field is empty.
    pub fn submit(&mut self, notifier: &mut impl Notifier) -> Option<DownloadRequest> {
        if self.url.is_empty() {
            notifier.notify(Notification::InvalidUrl);
            return None;
        }

        self.generation += 1;
        self.in_flight += 1;
        debug!("Starting download #{} for {}", self.generation, self.url);

        Some(DownloadRequest {
            url: self.url.clone(),
            generation: self.generation,
        })
    }

    /// Apply the result of a finished download.
    ///
    /// Results are applied in the order they arrive, including results of
    /// requests that were superseded by a newer press.
    pub fn finish(
        &mut self,
        generation: u64,
        result: Option<DownloadedImage>,
        notifier: &mut impl Notifier,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if generation < self.generation {
            info!(
                "Download #{} finished after newer request #{}",
                generation, self.generation
            );
        }

        match result {
            Some(image) => {
                self.image = Some(image);
                notifier.notify(Notification::Downloaded);
            }
            None => notifier.notify(Notification::Failed),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use image::{DynamicImage, RgbaImage};

    fn sized(width: u32, height: u32) -> DownloadedImage {
        DownloadedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(width, height)))
    }

    #[test]
    fn test_empty_url_only_notifies() {
        let mut state = ViewState::new();
        let mut notifier = RecordingNotifier::default();

        assert!(state.submit(&mut notifier).is_none());

        assert_eq!(notifier.received, vec![Notification::InvalidUrl]);
        assert_eq!(state.generation, 0);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_submit_issues_increasing_generations() {
        let mut state = ViewState::new();
        let mut notifier = RecordingNotifier::default();
        state.set_url("http://example.test/a.png".to_string());

        let first = state.submit(&mut notifier).unwrap();
        let second = state.submit(&mut notifier).unwrap();

        assert_eq!(first.url, "http://example.test/a.png");
        assert!(second.generation > first.generation);
        assert_eq!(state.in_flight, 2);
        assert!(notifier.received.is_empty());
    }

    #[test]
    fn test_success_replaces_image() {
        let mut state = ViewState::new();
        let mut notifier = RecordingNotifier::default();
        state.set_url("http://example.test/a.png".to_string());
        let request = state.submit(&mut notifier).unwrap();

        state.finish(request.generation, Some(sized(3, 2)), &mut notifier);

        assert_eq!(state.image.as_ref().map(|i| i.width()), Some(3));
        assert_eq!(notifier.received, vec![Notification::Downloaded]);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_failure_keeps_previous_image() {
        let mut state = ViewState::new();
        let mut notifier = RecordingNotifier::default();
        state.image = Some(sized(7, 7));
        state.set_url("http://example.test/broken".to_string());
        let request = state.submit(&mut notifier).unwrap();

        state.finish(request.generation, None, &mut notifier);

        assert_eq!(state.image.as_ref().map(|i| i.width()), Some(7));
        assert_eq!(notifier.received, vec![Notification::Failed]);
    }

    #[test]
    fn test_stale_result_is_still_applied() {
        let mut state = ViewState::new();
        let mut notifier = RecordingNotifier::default();
        state.set_url("http://example.test/old.png".to_string());
        let old = state.submit(&mut notifier).unwrap();
        state.set_url("http://example.test/new.png".to_string());
        let new = state.submit(&mut notifier).unwrap();

        state.finish(new.generation, Some(sized(1, 1)), &mut notifier);
        state.finish(old.generation, Some(sized(9, 9)), &mut notifier);

        assert_eq!(state.image.as_ref().map(|i| i.width()), Some(9));
        assert_eq!(notifier.received.len(), 2);
    }
}
