//! Landalytics engine: transport, stream decoding, and effect execution.
mod classify;
mod client;
mod config;
mod engine;
mod line;
mod types;

pub use classify::classify;
pub use client::{AnalysisStream, ChannelEventSink, EventSink, ReqwestAnalysisClient};
pub use config::{ClientSettings, API_URL_ENV};
pub use engine::EngineHandle;
pub use line::LineBuffer;
pub use types::{EngineEvent, ScanError};
