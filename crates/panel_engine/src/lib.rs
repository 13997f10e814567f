//! Panel engine: HTTP clients for the résumé-parsing and scoring endpoints,
//! and the background runtime that executes them.
mod engine;
mod http;
mod scoring;
mod settings;
mod types;
mod upload;
mod wire;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use scoring::{ReqwestScoringClient, ScoringClient, SCORE_PATH};
pub use settings::{ClientSettings, DEFAULT_BASE_URL};
pub use types::{ClientError, EngineEvent, FailureKind, ParsedResume, RequestId, ScoreReport};
pub use upload::{is_pdf_path, ReqwestUploadClient, UploadClient, RESUME_FIELD, UPLOAD_PATH};
