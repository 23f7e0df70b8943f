//! Privileged action component: reacts to context-menu items, command
//! shortcuts and popup buttons by talking to the page and the host.

use std::sync::Arc;

use crate::clock::Clock;
use crate::config::SoradlConfig;
use crate::dispatch::{BatchDispatch, Dispatcher};
use crate::messaging::{ChannelError, Message, PageChannel, Response, UNREACHABLE_NOTICE};
use crate::presentation::Severity;
use crate::resolve::ResolvedTarget;

const NO_VIDEOS: &str = "No videos found on this page.";
const NOT_COMPATIBLE: &str =
    "This doesn't appear to be a Sora site. Try navigating to a page with Sora videos.";
const POPUP_UNREACHABLE: &str = "Error: Could not connect to the page. Try refreshing.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// Right-click directly on a video; the platform may supply its `src`.
    DownloadVideo { src_url: Option<String> },
    /// Right-click on anything else.
    DownloadFromElement,
    DownloadAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    DownloadVideo,
    ForceDetect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupButton {
    Download,
    DownloadAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    ContextMenu(MenuItem),
    Command(Shortcut),
    Popup { button: PopupButton, tab_url: String },
}

#[derive(Debug)]
pub enum Outcome {
    /// One download handed to the host.
    Started,
    Batch(BatchDispatch),
    NotStarted { reason: String },
}

impl Outcome {
    fn not_started(reason: impl Into<String>) -> Self {
        Outcome::NotStarted {
            reason: reason.into(),
        }
    }
}

pub struct ActionController<C> {
    channel: C,
    dispatcher: Dispatcher,
    clock: Arc<dyn Clock>,
    config: SoradlConfig,
}

impl<C: PageChannel> ActionController<C> {
    pub fn new(
        channel: C,
        dispatcher: Dispatcher,
        clock: Arc<dyn Clock>,
        config: SoradlConfig,
    ) -> Self {
        Self {
            channel,
            dispatcher,
            clock,
            config,
        }
    }

    pub fn handle(&self, trigger: Trigger) -> Outcome {
        tracing::debug!(?trigger, "trigger");
        match trigger {
            Trigger::ContextMenu(MenuItem::DownloadVideo { src_url: Some(url) }) => {
                self.download_direct(&url)
            }
            Trigger::ContextMenu(MenuItem::DownloadVideo { src_url: None })
            | Trigger::Command(Shortcut::DownloadVideo) => {
                self.ask(Message::ResolveAndDownload, UNREACHABLE_NOTICE)
            }
            Trigger::ContextMenu(MenuItem::DownloadFromElement) => {
                self.ask(Message::DownloadAtLastRightClick, UNREACHABLE_NOTICE)
            }
            Trigger::Command(Shortcut::ForceDetect) => {
                self.ask(Message::ForceDetect, UNREACHABLE_NOTICE)
            }
            Trigger::ContextMenu(MenuItem::DownloadAll)
            | Trigger::Popup {
                button: PopupButton::DownloadAll,
                ..
            } => self.download_all(),
            Trigger::Popup {
                button: PopupButton::Download,
                tab_url,
            } => {
                if !self.is_compatible_tab(&tab_url) {
                    return Outcome::not_started(NOT_COMPATIBLE);
                }
                self.ask(Message::ResolveAndDownload, POPUP_UNREACHABLE)
            }
        }
    }

    fn is_compatible_tab(&self, tab_url: &str) -> bool {
        url::Url::parse(tab_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| self.config.is_compatible_host(h)))
            .unwrap_or(false)
    }

    fn download_direct(&self, url: &str) -> Outcome {
        match ResolvedTarget::from_source(url, self.clock.as_ref()) {
            Ok(target) => match self.dispatcher.dispatch_single(target) {
                Ok(()) => Outcome::Started,
                Err(e) => Outcome::not_started(e.to_string()),
            },
            Err(e) => {
                self.notify(e.user_message(), Severity::Error);
                Outcome::not_started(e.to_string())
            }
        }
    }

    fn ask(&self, message: Message, unreachable_notice: &str) -> Outcome {
        match self.channel.request(message) {
            Ok(Response::Download { request }) => match self.dispatcher.dispatch_request(request) {
                Ok(()) => Outcome::Started,
                Err(e) => Outcome::not_started(e.to_string()),
            },
            Ok(Response::Failed { reason }) => Outcome::not_started(reason),
            Ok(other) => {
                tracing::warn!(?other, "unexpected page response");
                Outcome::not_started("unexpected page response")
            }
            Err(e) => self.unreachable(e, unreachable_notice),
        }
    }

    fn download_all(&self) -> Outcome {
        let items = match self.channel.request(Message::DownloadAll) {
            Ok(Response::Batch { items }) => items,
            Ok(other) => {
                tracing::warn!(?other, "unexpected page response");
                Vec::new()
            }
            Err(e) => return self.unreachable(e, UNREACHABLE_NOTICE),
        };
        if items.is_empty() {
            self.notify(NO_VIDEOS, Severity::Error);
            return Outcome::not_started(NO_VIDEOS);
        }
        self.notify(
            &format!("Found {} videos. Starting download...", items.len()),
            Severity::Info,
        );
        Outcome::Batch(self.dispatcher.dispatch_plan(items))
    }

    fn unreachable(&self, err: ChannelError, notice: &str) -> Outcome {
        tracing::warn!("could not reach page: {}", err);
        self.notify(notice, Severity::Error);
        Outcome::not_started(notice)
    }

    /// Best-effort: a notice that cannot be delivered is only logged.
    fn notify(&self, message: &str, severity: Severity) {
        let request = Message::ShowNotification {
            message: message.to_string(),
            severity,
        };
        if let Err(e) = self.channel.request(request) {
            tracing::debug!("notification not delivered: {}", e);
        }
    }
}
