//! Page-embedded logic: owns interaction state and answers controller
//! requests against the current document.

use std::sync::Arc;

use crate::clock::Clock;
use crate::config::SoradlConfig;
use crate::dispatch::{plan_batch, DownloadRequest};
use crate::error::ResolveError;
use crate::interaction::{
    EventKind, EventRegistry, InteractionState, InteractionTracker, PageEvent,
};
use crate::messaging::{Message, Response};
use crate::page::{find_frame, Document, ElementHandle, Point};
use crate::presentation::{
    Anchor, Decoration, Decorator, FrameCapture, PickerOutcome, Severity, ToastCenter, VideoPicker,
};
use crate::resolve::{
    force_detect, resolve_target_at_position, resolve_with_rule, ResolvedTarget,
};
use crate::scanner::{describe_videos, scan, CandidateSet, VideoCandidate};

const STARTED: &str = "Video download started!";
const NO_VIDEOS: &str = "No videos found on this page.";
const NOTHING_AT_POSITION: &str = "No video associated with this element.";

pub struct PageAgent {
    config: SoradlConfig,
    clock: Arc<dyn Clock>,
    registry: EventRegistry,
    tracker: InteractionTracker,
    toasts: ToastCenter,
    decorator: Decorator,
}

impl PageAgent {
    pub fn new(config: SoradlConfig, clock: Arc<dyn Clock>) -> Self {
        let mut registry = EventRegistry::new();
        let tracker = InteractionTracker::attach(
            &mut registry,
            InteractionState::new_shared(),
            config.tracker.clone(),
        );
        Self {
            toasts: ToastCenter::new(config.presentation.toast_ttl()),
            config,
            clock,
            registry,
            tracker,
            decorator: Decorator::new(),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.tracker.state().borrow().clone()
    }

    pub fn toasts(&self) -> &ToastCenter {
        &self.toasts
    }

    /// Registry for additional (page-level) listeners.
    pub fn registry_mut(&mut self) -> &mut EventRegistry {
        &mut self.registry
    }

    /// The page navigated: recorded interaction and decorations no longer
    /// refer to anything.
    pub fn navigate(&mut self) {
        self.tracker.state().borrow_mut().reset();
        self.decorator.clear();
        self.toasts.dismiss();
    }

    /// Delivers a DOM event. Keyboard shortcuts produce a response; pointer
    /// events only update interaction state.
    pub fn on_event(&mut self, doc: &dyn Document, mut event: PageEvent) -> Option<Response> {
        self.registry.dispatch(doc, &mut event);
        if event.kind == EventKind::KeyDown {
            return self.on_key(doc, &event);
        }
        None
    }

    fn on_key(&mut self, doc: &dyn Document, event: &PageEvent) -> Option<Response> {
        let key = event.key.as_deref()?.to_ascii_lowercase();
        let m = event.modifiers;
        match (m.alt, m.shift, key.as_str()) {
            (true, true, "v") => {
                self.toasts.show(describe_videos(doc), Severity::Info);
                Some(Response::Ack)
            }
            (true, false, "d") => Some(self.handle(doc, Message::ResolveAndDownload)),
            (true, false, "r") => {
                self.refresh_decorations(doc);
                self.toasts
                    .show("Refreshed video download buttons", Severity::Info);
                Some(Response::Ack)
            }
            _ => None,
        }
    }

    pub fn handle(&mut self, doc: &dyn Document, message: Message) -> Response {
        tracing::debug!(?message, "page request");
        match message {
            Message::ResolveAndDownload => self.resolve_and_download(doc),
            Message::DownloadAtLastRightClick => match self.state().last_right_click {
                Some(at) => self.download_at(doc, at),
                None => {
                    let err = ResolveError::PositionNotRecorded;
                    self.fail(err.user_message(), err)
                }
            },
            Message::GetVideoAtPosition { x, y } => self.lookup_at(doc, Point::new(x, y)),
            Message::ForceDetect => self.force_detect(doc),
            Message::DownloadAll => {
                let set = self.scan(doc);
                Response::Batch {
                    items: plan_batch(&set, self.clock.as_ref(), self.config.dispatch.stagger()),
                }
            }
            Message::ShowNotification { message, severity } => {
                self.toasts.show(message, severity);
                Response::Ack
            }
        }
    }

    fn scan(&self, doc: &dyn Document) -> CandidateSet {
        scan(doc, &self.config.scan.options())
    }

    fn resolve_and_download(&mut self, doc: &dyn Document) -> Response {
        let set = self.scan(doc);
        let state = self.state();
        let resolved = resolve_with_rule(doc, &set, &state, &self.config.resolver.policy);
        let Some((rule, candidate)) = resolved else {
            let err = ResolveError::NoCandidate;
            return self.fail(err.user_message(), err);
        };
        tracing::info!(?rule, url = %candidate.source_url, "resolved best target");
        self.start(ResolvedTarget::from_candidate(&candidate, self.clock.as_ref()))
    }

    fn video_at(&self, doc: &dyn Document, at: Point) -> Option<VideoCandidate> {
        resolve_target_at_position(
            doc,
            at,
            self.config.resolver.container_ratio,
            &self.config.scan.options(),
        )
    }

    /// No notice and no download; the caller decides what to do with it.
    fn lookup_at(&self, doc: &dyn Document, at: Point) -> Response {
        let found = self.video_at(doc, at);
        let target = found
            .as_ref()
            .map(|c| ResolvedTarget::from_candidate(c, self.clock.as_ref()));
        let request = match target {
            Some(Ok(target)) => Some(DownloadRequest::single(target)),
            Some(Err(e)) => {
                tracing::debug!("video at position not downloadable: {}", e);
                None
            }
            None => None,
        };
        Response::Lookup {
            has_video: found.is_some(),
            request,
        }
    }

    fn download_at(&mut self, doc: &dyn Document, at: Point) -> Response {
        match self.video_at(doc, at) {
            Some(candidate) => {
                self.start(ResolvedTarget::from_candidate(&candidate, self.clock.as_ref()))
            }
            None => self.fail(NOTHING_AT_POSITION, ResolveError::NoCandidate),
        }
    }

    fn force_detect(&mut self, doc: &dyn Document) -> Response {
        let set = self.scan(doc);
        match force_detect(&set) {
            Some(candidate) => {
                let response =
                    self.start(ResolvedTarget::from_candidate(&candidate, self.clock.as_ref()));
                if matches!(response, Response::Download { .. }) {
                    self.toasts.show("Downloading video...", Severity::Info);
                }
                response
            }
            None => self.fail(NO_VIDEOS, ResolveError::NoCandidate),
        }
    }

    fn start(&mut self, target: Result<ResolvedTarget, ResolveError>) -> Response {
        match target {
            Ok(target) => {
                self.toasts.show(STARTED, Severity::Success);
                Response::Download {
                    request: DownloadRequest::single(target),
                }
            }
            Err(err) => self.fail(err.user_message(), err),
        }
    }

    fn fail(&mut self, notice: &str, err: ResolveError) -> Response {
        self.toasts.show(notice, Severity::Error);
        Response::Failed {
            reason: err.to_string(),
        }
    }

    /// One re-scan pass of the inline download buttons.
    pub fn refresh_decorations(&mut self, doc: &dyn Document) -> Vec<Decoration> {
        self.decorator.decorate(doc)
    }

    /// The injected button on `video` was clicked.
    pub fn activate_decoration(&mut self, doc: &dyn Document, video: ElementHandle) -> Response {
        let Some(decoration) = self.decorator.get(video).cloned() else {
            let err = ResolveError::NoCandidate;
            return self.fail(err.user_message(), err);
        };
        {
            let mut state = self.tracker.state().borrow_mut();
            match decoration.anchor {
                Anchor::Positioned(container) => {
                    state.record_container(container, video)
                }
                Anchor::Wrapper => state.record_video(video),
            }
        }
        // Use the live source; the decorated one may be stale.
        let live = find_frame(doc, video.frame)
            .and_then(|d| d.video_source(video.node))
            .unwrap_or("")
            .to_string();
        self.start(ResolvedTarget::from_source(&live, self.clock.as_ref()))
    }

    /// Manual selection flow. Shows an error notice when nothing qualifies.
    pub fn open_picker(&mut self, doc: &dyn Document, capture: &dyn FrameCapture) -> PickerOutcome {
        let set = self.scan(doc);
        let p = &self.config.presentation;
        let outcome =
            VideoPicker::open(doc, &set, capture, (p.thumbnail_width, p.thumbnail_height));
        if outcome == PickerOutcome::Empty {
            self.toasts
                .show("No valid videos found on this page.", Severity::Error);
        }
        outcome
    }

    /// Completes the picker flow for entry `index`.
    pub fn pick(&mut self, picker: &VideoPicker, index: usize) -> Response {
        let target = picker.choose(index, self.clock.as_ref());
        self.start(target)
    }
}
