use iced::widget::{button, column, container, image, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use log::info;
use std::sync::Arc;

use image_fetch::download::{download_image_async, DownloadWorkflow, DownloadedImage};
use image_fetch::ui::state::ViewState;
use image_fetch::ui::toast::{self, Toasts};

/// Main application state
struct ImageFetch {
    /// Shared download pipeline, handed to each background task
    workflow: Arc<DownloadWorkflow>,
    /// What the screen shows
    state: ViewState,
    /// Pixel handle for the displayed image, rebuilt only when it changes
    handle: Option<image::Handle>,
    /// Notification shown at the bottom of the window
    toasts: Toasts,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User edited the URL field
    UrlChanged(String),
    /// User clicked "Download Image" or pressed Enter
    DownloadPressed,
    /// Background download finished (generation, result)
    DownloadFinished(u64, Option<DownloadedImage>),
    /// Toast timer ran out
    ToastExpired(u64),
}

impl ImageFetch {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let workflow = DownloadWorkflow::with_defaults();
        info!("Downloads are saved to {}", workflow.store().file_path().display());

        (
            ImageFetch {
                workflow: Arc::new(workflow),
                state: ViewState::new(),
                handle: None,
                toasts: Toasts::default(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::UrlChanged(url) => {
                self.state.set_url(url);
                Task::none()
            }
            Message::DownloadPressed => match self.state.submit(&mut self.toasts) {
                Some(request) => {
                    let generation = request.generation;
                    Task::perform(
                        download_image_async(self.workflow.clone(), request.url),
                        move |result| Message::DownloadFinished(generation, result),
                    )
                }
                None => Task::none(),
            },
            Message::DownloadFinished(generation, result) => {
                if let Some(downloaded) = &result {
                    self.handle = Some(image::Handle::from_rgba(
                        downloaded.width(),
                        downloaded.height(),
                        downloaded.to_rgba8(),
                    ));
                }
                self.state.finish(generation, result, &mut self.toasts);
                Task::none()
            }
            Message::ToastExpired(id) => {
                self.toasts.expire(id);
                Task::none()
            }
        };

        // Every toast shown during this update gets its own dismiss timer
        let timers = self
            .toasts
            .take_started()
            .into_iter()
            .map(|id| Task::perform(toast::dismiss_after(id), Message::ToastExpired));

        Task::batch(std::iter::once(task).chain(timers))
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text_input("Enter Image URL", &self.state.url)
                .on_input(Message::UrlChanged)
                .on_submit(Message::DownloadPressed)
                .padding(10),
            button("Download Image")
                .on_press(Message::DownloadPressed)
                .width(Length::Fill)
                .padding(10),
        ]
        .spacing(16)
        .padding(16)
        .align_x(Alignment::Center);

        if self.state.is_busy() {
            content = content.push(text("Downloading...").size(14));
        }

        if let Some(handle) = &self.handle {
            content = content.push(
                image(handle.clone())
                    .width(Length::Fixed(400.0))
                    .height(Length::Fixed(400.0)),
            );
        }

        if let Some(current) = self.toasts.current() {
            content = content.push(
                container(text(current.message).size(16))
                    .padding(10)
                    .style(container::rounded_box),
            );
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Image Fetch", ImageFetch::update, ImageFetch::view)
        .theme(ImageFetch::theme)
        .centered()
        .run_with(ImageFetch::new)
}
