//! Main GUI application

use crate::backend::{failure_description, spawn_batch, BackendEvent, BatchHandle};
use crate::collector::{collect, CollectOptions, OutputKind, Quality};
use crate::extractor::{find_ffmpeg, find_ytdlp, Extractor, YtDlpExtractor};
use crate::gui::clipboard;
use crate::gui::dialogs;
use crate::gui::views::{main_view, MainViewState};
use crate::utils::config::AppSettings;
use iced::widget::text_editor;
use iced::{Application, Command, Element, Subscription, Theme};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Main application state
pub struct SocialloaderApp {
    settings: AppSettings,

    // URL editor; holds the placeholder line until the user first touches it
    url_content: text_editor::Content,
    placeholder_active: bool,

    // Batch options
    output_kind: OutputKind,
    quality: Quality,
    download_location: String,

    // Progress reporting
    progress: f32,
    status_message: String,
    input_error: Option<String>,

    // Present only while a batch runs
    batch: Option<BatchHandle>,
    last_output: Option<PathBuf>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Input events
    UrlEditorAction(text_editor::Action),
    PasteFromClipboard,
    ClearUrlInput,

    // Options
    OutputKindSelected(OutputKind),
    QualitySelected(Quality),
    DownloadLocationChanged(String),
    BrowseDownloadLocation,
    OpenDownloadFolder,

    // Batch control
    StartDownload,
    CancelDownload,

    // System
    Tick, // Drains worker events while a batch runs
}

impl Application for SocialloaderApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppSettings;

    fn new(settings: Self::Flags) -> (Self, Command<Message>) {
        let input_error = missing_tool_warning(find_ytdlp().as_deref(), find_ffmpeg().as_deref());

        let app = Self {
            url_content: text_editor::Content::with_text(&settings.placeholder),
            placeholder_active: !settings.placeholder.is_empty(),
            output_kind: OutputKind::default(),
            quality: Quality::default(),
            download_location: settings.download_location.to_string_lossy().to_string(),
            progress: 0.0,
            status_message: "Ready".to_string(),
            input_error,
            batch: None,
            last_output: None,
            settings,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Social Media Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            // Input events
            Message::UrlEditorAction(action) => {
                if self.placeholder_active
                    && matches!(
                        action,
                        text_editor::Action::Click(_) | text_editor::Action::Edit(_)
                    )
                {
                    self.clear_urls();
                }
                self.url_content.perform(action);
                self.input_error = None;
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::get_clipboard_content() {
                    Ok(text) => {
                        if self.placeholder_active {
                            self.clear_urls();
                        }
                        let mut current = self.url_content.text();
                        if !current.trim().is_empty() && !current.ends_with('\n') {
                            current.push('\n');
                        }
                        current.push_str(text.trim_end());
                        self.url_content = text_editor::Content::with_text(&current);
                        self.input_error = None;
                    }
                    Err(e) => {
                        warn!("{}", e);
                        self.input_error = Some(e);
                    }
                }
                Command::none()
            }

            Message::ClearUrlInput => {
                self.clear_urls();
                self.input_error = None;
                Command::none()
            }

            // Options
            Message::OutputKindSelected(kind) => {
                self.output_kind = kind;
                Command::none()
            }

            Message::QualitySelected(quality) => {
                self.quality = quality;
                Command::none()
            }

            Message::DownloadLocationChanged(location) => {
                self.download_location = location;
                self.input_error = None;
                Command::none()
            }

            Message::BrowseDownloadLocation => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select output directory")
                    .pick_folder()
                {
                    self.download_location = path.to_string_lossy().to_string();
                    self.input_error = None;
                }
                Command::none()
            }

            Message::OpenDownloadFolder => {
                let folder = self.folder_to_open();
                if let Err(e) = open::that(&folder) {
                    warn!("Failed to open folder {}: {}", folder.display(), e);
                }
                Command::none()
            }

            // Batch control
            Message::StartDownload => {
                if self.batch.is_none() {
                    if let Err(notice) = self.start_batch(create_extractor) {
                        notice.show();
                    }
                }
                Command::none()
            }

            Message::CancelDownload => {
                if let Some(handle) = &self.batch {
                    info!("Cancelling download batch");
                    handle.cancel();
                    self.status_message = "Cancelling...".to_string();
                }
                Command::none()
            }

            // System
            Message::Tick => {
                for notice in self.drain_events() {
                    notice.show();
                }
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        main_view(MainViewState {
            url_content: &self.url_content,
            input_error: self.input_error.as_deref(),
            output_kind: self.output_kind,
            quality: self.quality,
            download_location: &self.download_location,
            progress: self.progress,
            status_message: &self.status_message,
            is_running: self.batch.is_some(),
            is_cancelling: self.is_cancelling(),
        })
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.batch.is_some() {
            iced::time::every(self.settings.poll_interval).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl SocialloaderApp {
    fn clear_urls(&mut self) {
        self.url_content = text_editor::Content::new();
        self.placeholder_active = false;
    }

    /// Validate the input and hand the batch to a worker thread.
    ///
    /// Nothing is spawned, and `make_extractor` is not called, when
    /// validation fails.
    fn start_batch<F>(&mut self, make_extractor: F) -> Result<(), ErrorNotice>
    where
        F: FnOnce() -> anyhow::Result<Arc<dyn Extractor>>,
    {
        let raw_text = if self.placeholder_active {
            String::new()
        } else {
            self.url_content.text()
        };
        let options = CollectOptions {
            output_kind: self.output_kind,
            quality: self.quality,
            destination_directory: PathBuf::from(self.download_location.trim()),
            placeholder: self.settings.placeholder.clone(),
        };

        let requests = match collect(&raw_text, &options) {
            Ok(requests) => requests,
            Err(e) => {
                debug!("Rejected batch: {}", e);
                self.input_error = Some(e.to_string());
                return Err(ErrorNotice::new("Error", e.to_string()));
            }
        };
        self.input_error = None;

        let extractor = make_extractor().map_err(|e| {
            error!("Cannot start batch: {}", e);
            ErrorNotice::unexpected(e)
        })?;

        let count = requests.len();
        let handle = spawn_batch(requests, extractor, self.settings.clone()).map_err(|e| {
            error!("Failed to start download worker: {}", e);
            ErrorNotice::unexpected(e)
        })?;

        info!("Started batch of {} URL(s)", count);
        self.batch = Some(handle);
        self.progress = 0.0;
        self.last_output = None;
        self.status_message = format!("Processing 1/{}: Starting...", count);
        Ok(())
    }

    /// Apply every event the worker has sent since the last tick.
    ///
    /// Returns the error dialogs to show, in the order they happened.
    fn drain_events(&mut self) -> Vec<ErrorNotice> {
        let mut notices = Vec::new();
        let mut finished = false;

        while let Some(handle) = self.batch.as_mut() {
            match handle.try_receive() {
                Ok(Some(event)) => {
                    if self.apply_event(event, &mut notices) {
                        finished = true;
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("{}", e);
                    notices.push(ErrorNotice::unexpected(e));
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            self.finish_batch();
        }
        notices
    }

    /// Returns true once the batch is over
    fn apply_event(&mut self, event: BackendEvent, notices: &mut Vec<ErrorNotice>) -> bool {
        match event {
            BackendEvent::RequestStarted {
                fraction, status, ..
            }
            | BackendEvent::Progress { fraction, status } => {
                self.progress = fraction;
                // Keep "Cancelling..." until the worker confirms
                if !self.is_cancelling() {
                    self.status_message = status;
                }
                false
            }
            BackendEvent::RequestCompleted {
                ordinal,
                total,
                output_file,
                ..
            } => {
                debug!("Request {}/{} completed", ordinal, total);
                if output_file.is_some() {
                    self.last_output = output_file;
                }
                false
            }
            BackendEvent::RequestFailed {
                ordinal,
                total,
                url,
                error,
            } => {
                notices.push(ErrorNotice::new(
                    "Download Error",
                    failure_description(ordinal, total, &url, &error),
                ));
                false
            }
            BackendEvent::UnexpectedError(message) => {
                notices.push(ErrorNotice::unexpected(message));
                false
            }
            BackendEvent::BatchFinished(summary) => {
                info!(
                    "Batch done: {}/{} succeeded, {} skipped",
                    summary.succeeded,
                    summary.total,
                    summary.skipped()
                );
                true
            }
        }
    }

    fn is_cancelling(&self) -> bool {
        self.batch.as_ref().is_some_and(BatchHandle::is_cancelling)
    }

    fn finish_batch(&mut self) {
        self.batch = None;
        self.progress = 0.0;
        self.status_message = "Ready".to_string();
    }

    /// The chosen directory, or the folder of the last finished file when the
    /// field is empty
    fn folder_to_open(&self) -> PathBuf {
        let location = self.download_location.trim();
        if !location.is_empty() {
            return PathBuf::from(location);
        }
        self.last_output
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.download_location.clone())
    }
}

/// A modal error waiting to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
struct ErrorNotice {
    title: &'static str,
    description: String,
}

impl ErrorNotice {
    fn new(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            title,
            description: description.into(),
        }
    }

    fn unexpected(error: impl std::fmt::Display) -> Self {
        Self::new("Error", format!("Unexpected error: {}", error))
    }

    fn show(&self) {
        dialogs::show_error(self.title, &self.description);
    }
}

fn create_extractor() -> anyhow::Result<Arc<dyn Extractor>> {
    Ok(Arc::new(YtDlpExtractor::new()?))
}

/// Warning shown at startup when a required tool cannot be found
pub fn missing_tool_warning(ytdlp: Option<&Path>, ffmpeg: Option<&Path>) -> Option<String> {
    match (ytdlp, ffmpeg) {
        (Some(_), Some(_)) => None,
        (None, Some(_)) => Some(
            "yt-dlp was not found; downloads will fail until it is installed".to_string(),
        ),
        (Some(_), None) => Some(
            "ffmpeg was not found; merging video and converting to MP3 will fail".to_string(),
        ),
        (None, None) => Some(
            "yt-dlp and ffmpeg were not found; install both before downloading".to_string(),
        ),
    }
}
