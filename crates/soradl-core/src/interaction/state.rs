use std::cell::RefCell;
use std::rc::Rc;

use crate::page::{ElementHandle, Point};

/// What the user last interacted with on the current page.
///
/// Every field may be stale: the element it names can be gone by the time
/// it is read, so consumers re-check against a fresh scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub last_hovered_video: Option<ElementHandle>,
    pub last_focused_container: Option<ElementHandle>,
    pub last_right_click: Option<Point>,
}

/// Page-wide state shared between event listeners and action handlers.
/// Single-threaded: only ever touched from the page's event loop.
pub type SharedState = Rc<RefCell<InteractionState>>;

impl InteractionState {
    pub fn new_shared() -> SharedState {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn record_video(&mut self, video: ElementHandle) {
        self.last_hovered_video = Some(video);
    }

    pub fn record_container(&mut self, container: ElementHandle, video: ElementHandle) {
        self.last_hovered_video = Some(video);
        self.last_focused_container = Some(container);
    }

    pub fn record_right_click(&mut self, at: Point) {
        self.last_right_click = Some(at);
    }

    /// Forget everything; called on navigation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_and_reset() {
        let mut s = InteractionState::default();
        s.record_container(ElementHandle::top(1), ElementHandle::top(2));
        s.record_video(ElementHandle::top(5));
        assert_eq!(s.last_hovered_video, Some(ElementHandle::top(5)));
        assert_eq!(s.last_focused_container, Some(ElementHandle::top(1)));
        s.record_right_click(Point::new(3.0, 4.0));
        s.reset();
        assert_eq!(s, InteractionState::default());
    }
}
