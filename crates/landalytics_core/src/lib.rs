//! Landalytics core: pure scan-session state machine and view-model helpers.
mod effect;
mod event;
mod msg;
mod narrative;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ScanRequest};
pub use event::{ScoreMap, StreamEvent};
pub use msg::Msg;
pub use narrative::{FinalVerdict, Narrative, RoadmapStep, SwotMatrix, SwotPoint};
pub use state::{AppState, ScanId, ScanSession, SessionStatus, NO_DATA_MESSAGE};
pub use update::update;
pub use view_model::ScanView;
