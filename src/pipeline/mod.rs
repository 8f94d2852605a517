//! Pipeline stages for handling a content change notification.
//!
//! - `receive`: route filter and body parsing
//! - `classify`: decides whether the change affects published pages
//! - `trigger`: asks the build hook to rebuild the site
//! - `purge`: invalidates affected URLs at the delivery network
//! - `respond`: composes the acknowledgment
//! - `pipeline`: runs the stages for one invocation

pub mod classify;
mod outcome;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod purge;
pub mod receive;
pub mod respond;
pub mod trigger;

pub use classify::ContentKind;
pub use outcome::StepOutcome;
pub use pipeline::{HandlerOutcome, InvocationContext, InvocationReport, WebhookPipeline};
pub use purge::{PurgeReport, PurgeSet};
pub use receive::Receipt;
