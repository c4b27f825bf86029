use std::path::PathBuf;

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, canvas, column, container, row, text};
use iced::{window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;

use crate::config::ViewerConfig;
use crate::error::{DecodeError, Error};
use crate::media::decode::{self, DecodedImage};
use crate::state::viewer::Viewer;
use crate::ui::filmstrip::Filmstrip;

/// Which pointer transition happened on the filmstrip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Pressed,
    Dragged,
    Released,
}

/// Pointer input in canvas coordinates, with the canvas width at that time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i32,
    pub width: i32,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User asked for the folder picker
    OpenFolder,
    /// Mouse activity on the filmstrip
    Pointer(PointerEvent),
    Next,
    Previous,
    WindowResized(Size),
    /// Background decode finished
    ImageDecoded(String, Result<DecodedImage, DecodeError>),
}

/// Main application state
pub struct FilmstripViewer {
    config: ViewerConfig,
    /// The opened folder, if any
    viewer: Option<Viewer>,
    /// Status message to display to the user
    status: String,
    viewport_width: i32,
}

impl FilmstripViewer {
    /// Create the application, opening the configured folder or the picker
    pub fn new(config: ViewerConfig) -> (Self, Task<Message>) {
        let mut app = FilmstripViewer {
            viewport_width: config.window_size.0.round() as i32,
            config,
            viewer: None,
            status: "Select an image folder to start.".to_string(),
        };

        let task = match app.config.initial_folder.clone() {
            Some(folder) => app.load_folder(folder),
            None => Task::done(Message::OpenFolder),
        };

        (app, task)
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolder => {
                // Show the native folder picker dialog
                let mut dialog = FileDialog::new().set_title("Select an Image Folder");
                if let Some(dir) = self.config.picker_directory() {
                    dialog = dialog.set_directory(dir);
                }

                match dialog.pick_folder() {
                    Some(folder) => self.load_folder(folder),
                    None => {
                        tracing::info!("Folder selection cancelled");
                        self.status = "Folder selection cancelled.".to_string();
                        Task::none()
                    }
                }
            }
            Message::Pointer(event) => {
                let Some(viewer) = self.viewer.as_mut() else {
                    return Task::none();
                };

                self.viewport_width = event.width;
                viewer.resize(event.width);

                match event.kind {
                    PointerKind::Pressed => {
                        viewer.press(event.x);
                        Task::none()
                    }
                    PointerKind::Dragged => {
                        if viewer.drag(event.x) {
                            self.request_decodes()
                        } else {
                            Task::none()
                        }
                    }
                    PointerKind::Released => {
                        viewer.release(event.x);
                        self.status = viewer.caption();
                        self.request_decodes()
                    }
                }
            }
            Message::Next => self.navigate(Viewer::next),
            Message::Previous => self.navigate(Viewer::previous),
            Message::WindowResized(size) => {
                self.viewport_width = size.width.round() as i32;
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.resize(self.viewport_width);
                }
                self.request_decodes()
            }
            Message::ImageDecoded(path, result) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.store_decoded(path, result);
                }
                Task::none()
            }
        }
    }

    fn navigate(&mut self, step: fn(&mut Viewer)) -> Task<Message> {
        let Some(viewer) = self.viewer.as_mut() else {
            return Task::none();
        };
        if viewer.is_dragging() {
            return Task::none();
        }

        step(viewer);
        self.status = viewer.caption();
        self.request_decodes()
    }

    /// Scan a folder and replace the current one with it.
    /// Failures leave the previous folder on screen.
    fn load_folder(&mut self, folder: PathBuf) -> Task<Message> {
        match Viewer::from_folder(
            &folder,
            &self.config.scan,
            self.viewport_width,
            self.config.preload_radius,
        ) {
            Ok(viewer) => {
                tracing::info!(
                    "Opened {} with {} images",
                    folder.display(),
                    viewer.sequence().len()
                );
                self.status = viewer.caption();
                self.viewer = Some(viewer);
                self.request_decodes()
            }
            Err(Error::Sequence(err)) => {
                tracing::info!("No images in {}", folder.display());
                self.status = err.to_string();
                Task::none()
            }
            Err(err) => {
                tracing::warn!("{}", err);
                self.status = err.to_string();
                Task::none()
            }
        }
    }

    /// Start background decodes for images about to be shown
    fn request_decodes(&mut self) -> Task<Message> {
        let Some(viewer) = self.viewer.as_mut() else {
            return Task::none();
        };

        let wanted = viewer.wanted_images();
        if wanted.is_empty() {
            return Task::none();
        }
        viewer.mark_requested(&wanted);

        let max_dimension = self.config.max_dimension;
        Task::batch(wanted.into_iter().map(|path| {
            Task::perform(decode::load_image(path, max_dimension), |(path, result)| {
                Message::ImageDecoded(path, result)
            })
        }))
    }

    /// Build the user interface
    pub fn view(&self) -> Element<'_, Message> {
        let has_images = self.viewer.is_some();

        let toolbar = row![
            button("Open Folder")
                .on_press(Message::OpenFolder)
                .padding(10),
            button("◀ Previous")
                .on_press_maybe(has_images.then_some(Message::Previous))
                .padding(10),
            button("Next ▶")
                .on_press_maybe(has_images.then_some(Message::Next))
                .padding(10),
        ]
        .spacing(10)
        .padding(10)
        .align_y(Alignment::Center);

        let display: Element<'_, Message> = match &self.viewer {
            Some(viewer) => canvas(Filmstrip { viewer })
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text("No folder open").size(20))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        column![
            toolbar,
            display,
            container(text(&self.status).size(16)).padding(10),
        ]
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
            keyboard::on_key_press(|key, _modifiers| match key.as_ref() {
                Key::Named(Named::ArrowRight) => Some(Message::Next),
                Key::Named(Named::ArrowLeft) => Some(Message::Previous),
                Key::Character("o") => Some(Message::OpenFolder),
                _ => None,
            }),
        ])
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }
}

/// Run the viewer window
pub fn run(config: ViewerConfig) -> iced::Result {
    let window_size = config.window_size;

    iced::application("Image Viewer", FilmstripViewer::update, FilmstripViewer::view)
        .subscription(FilmstripViewer::subscription)
        .theme(FilmstripViewer::theme)
        .window_size(window_size)
        .centered()
        .run_with(move || FilmstripViewer::new(config))
}
