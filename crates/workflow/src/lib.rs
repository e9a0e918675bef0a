//! Mutation workflow.
//!
//! A user action becomes a [`MutationRequest`]; the [`MutationController`]
//! dispatches it to the store, folds the reply into the shared cache and
//! settles it into exactly one [`MutationOutcome`]. [`MutationController::submit`]
//! wraps that with the call-site effects: the submit gate, one notification
//! per terminal outcome, optional navigation, and the form reset signal.
//! Effects bound to a view are skipped once its [`ViewScope`] is closed.

pub mod controller;
pub mod gate;
pub mod navigation;
pub mod notify;
pub mod outcome;
pub mod request;
pub mod scope;

pub use controller::{CallSite, Effects, MutationController, Submission};
pub use gate::{SubmitControl, SubmitGuard};
pub use navigation::{Destination, NavigationLog, Navigator, Routes};
pub use notify::{AutoDismiss, Notification, NotificationCenter, NotificationSink, NotificationStyle, Severity};
pub use outcome::{MutationError, MutationOutcome, Settled};
pub use request::{MutationOp, MutationRequest, TargetKey};
pub use scope::{ScopeClock, ViewScope};
