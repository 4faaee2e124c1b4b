//! # fcc-wizard: Assessment Interview
//!
//! Drives one assessment from mode selection to submission.
//!
//! - **Classification** (`classification.rs`): main → sub / custom name →
//!   meat inquiry, as pure state transitions with cascading resets.
//! - **Steps** (`steps.rs`): the ordered step list and its labels, built
//!   from the resolver's active sections.
//! - **Session** (`session.rs`): [`WizardState`], per-step advance gates,
//!   AI pre-fill, live scoring and the final submission.

pub mod classification;
pub mod error;
pub mod session;
pub mod steps;

pub use classification::ClassificationState;
pub use error::{AdvanceBlocker, UnknownCaptureMode, WizardError};
pub use session::{Progress, WizardState};
pub use steps::{build_steps, step_labels, CaptureMode, WizardStep};
