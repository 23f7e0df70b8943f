//! On-page feedback: toasts, the multi-video picker, and per-video download
//! buttons kept fresh by a periodic re-scan.

mod decorator;
mod picker;
mod rescan;
mod toast;

pub use decorator::{Anchor, Decoration, Decorator};
pub use picker::{
    CaptureError, FrameCapture, NoFrameCapture, PickerEntry, PickerOutcome, Thumbnail, VideoPicker,
};
pub use rescan::{spawn_rescan, MutationSignal, RescanCause, RescanHandle};
pub use toast::{Severity, Toast, ToastCenter};
