//! Panel core: pure state machine and view-model helpers for the ATS score panel.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    is_pdf_file_name, AnalysisRequest, AnalysisResult, AnalyzeBlocker, PanelState, Phase,
    PhaseKind, RequestId, ResumeFile, UploadStatus, BUSY_MESSAGE, PARSED_MESSAGE,
    PARSING_MESSAGE, REJECTED_FILE_MESSAGE,
};
pub use update::update;
pub use view_model::{PanelViewModel, ANALYZE_LABEL, SCORING_LABEL};
