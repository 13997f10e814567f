use std::path::{Path, PathBuf};

use panel_logging::{panel_debug, redacted_len};

use crate::view_model::{PanelViewModel, ANALYZE_LABEL, SCORING_LABEL};

/// Monotonically increasing tag attached to every network request.
pub type RequestId = u64;

pub const REJECTED_FILE_MESSAGE: &str = "❌ Please upload a valid PDF resume";
pub const PARSING_MESSAGE: &str = "Parsing resume...";
pub const PARSED_MESSAGE: &str = "✅ Resume uploaded and parsed";
pub const BUSY_MESSAGE: &str = "⏳ Wait for the current check to finish before uploading a new resume";

/// Only the name is inspected by the core; reading the bytes is the engine's job.
pub fn is_pdf_file_name(name: &str) -> bool {
    name.ends_with(".pdf")
}

/// A file chosen by the user in the résumé selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    path: PathBuf,
}

impl ResumeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, lossily converted. Empty when the path has none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_pdf(&self) -> bool {
        is_pdf_file_name(&self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// One scoring response. Values are stored exactly as the backend sent them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    pub score: i64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Where the panel is in its upload/analyze cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading {
        request: RequestId,
    },
    Uploaded,
    Analyzing {
        request: RequestId,
    },
    Scored(AnalysisResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseKind {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    Analyzing,
    Scored,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Uploading { .. } => PhaseKind::Uploading,
            Phase::Uploaded => PhaseKind::Uploaded,
            Phase::Analyzing { .. } => PhaseKind::Analyzing,
            Phase::Scored(_) => PhaseKind::Scored,
        }
    }

    pub fn in_flight(&self) -> bool {
        matches!(self, Phase::Uploading { .. } | Phase::Analyzing { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    None,
    Rejected,
    Parsing,
    Parsed,
    /// A valid file was picked while an analysis was running and not uploaded.
    Busy,
    Failed(String),
}

impl UploadStatus {
    pub fn message(&self) -> String {
        match self {
            UploadStatus::None => String::new(),
            UploadStatus::Rejected => REJECTED_FILE_MESSAGE.to_string(),
            UploadStatus::Parsing => PARSING_MESSAGE.to_string(),
            UploadStatus::Parsed => PARSED_MESSAGE.to_string(),
            UploadStatus::Busy => BUSY_MESSAGE.to_string(),
            UploadStatus::Failed(reason) => format!("❌ Resume upload failed: {reason}"),
        }
    }
}

/// Why the analyze action is currently unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeBlocker {
    RequestInFlight,
    MissingResume,
    MissingJobDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    /// `None` until an upload succeeds; `Some("")` is a parsed but empty résumé.
    resume_text: Option<String>,
    job_description: String,
    phase: Phase,
    upload_status: UploadStatus,
    analysis_error: Option<String>,
    last_request: RequestId,
    dirty: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn resume_text(&self) -> &str {
        self.resume_text.as_deref().unwrap_or_default()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn score(&self) -> Option<i64> {
        self.result().map(|result| result.score)
    }

    pub fn matched_keywords(&self) -> &[String] {
        self.result()
            .map(|result| result.matched_keywords.as_slice())
            .unwrap_or_default()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Scored(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Analyzing { .. })
    }

    pub fn upload_status(&self) -> &UploadStatus {
        &self.upload_status
    }

    pub fn analysis_error(&self) -> Option<&str> {
        self.analysis_error.as_deref()
    }

    pub fn analyze_blocker(&self) -> Option<AnalyzeBlocker> {
        if self.phase.in_flight() {
            Some(AnalyzeBlocker::RequestInFlight)
        } else if self.resume_text().is_empty() {
            Some(AnalyzeBlocker::MissingResume)
        } else if self.job_description.is_empty() {
            Some(AnalyzeBlocker::MissingJobDescription)
        } else {
            None
        }
    }

    pub fn can_analyze(&self) -> bool {
        self.analyze_blocker().is_none()
    }

    pub fn view(&self) -> PanelViewModel {
        let result = self.result();
        PanelViewModel {
            phase: self.phase.kind(),
            resume_text: self.resume_text().to_string(),
            job_description: self.job_description.clone(),
            score: result.map(|r| r.score),
            matched_keywords: result.map(|r| r.matched_keywords.clone()).unwrap_or_default(),
            missing_keywords: result.map(|r| r.missing_keywords.clone()).unwrap_or_default(),
            strengths: result.map(|r| r.strengths.clone()).unwrap_or_default(),
            weaknesses: result.map(|r| r.weaknesses.clone()).unwrap_or_default(),
            suggestions: result.map(|r| r.suggestions.clone()).unwrap_or_default(),
            is_loading: self.is_loading(),
            upload_status: self.upload_status.message(),
            analysis_error: self.analysis_error.clone(),
            analyze_blocker: self.analyze_blocker(),
            analyze_label: if self.is_loading() {
                SCORING_LABEL
            } else {
                ANALYZE_LABEL
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    /// Phase to fall back to when nothing is in flight.
    fn resting_phase(&self) -> Phase {
        if self.resume_text.is_some() {
            Phase::Uploaded
        } else {
            Phase::Idle
        }
    }

    pub(crate) fn reject_file(&mut self) {
        self.upload_status = UploadStatus::Rejected;
        self.mark_dirty();
    }

    pub(crate) fn defer_upload(&mut self) {
        self.upload_status = UploadStatus::Busy;
        self.mark_dirty();
    }

    pub(crate) fn begin_upload(&mut self) -> RequestId {
        let request = self.next_request();
        self.phase = Phase::Uploading { request };
        self.upload_status = UploadStatus::Parsing;
        self.analysis_error = None;
        self.mark_dirty();
        request
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_analysis(&mut self) -> (RequestId, AnalysisRequest) {
        let request = self.next_request();
        self.phase = Phase::Analyzing { request };
        self.analysis_error = None;
        self.mark_dirty();
        let payload = AnalysisRequest {
            resume_text: self.resume_text().to_string(),
            job_description: self.job_description.clone(),
        };
        (request, payload)
    }

    pub(crate) fn apply_upload(&mut self, request: RequestId, outcome: Result<String, String>) {
        match self.phase {
            Phase::Uploading { request: pending } if pending == request => {}
            _ => {
                panel_debug!("Ignoring stale upload response request={}", request);
                return;
            }
        }

        match outcome {
            Ok(text) => {
                panel_debug!("Upload request={} parsed {}", request, redacted_len(&text));
                self.resume_text = Some(text);
                self.phase = Phase::Uploaded;
                self.upload_status = UploadStatus::Parsed;
            }
            Err(reason) => {
                self.phase = self.resting_phase();
                self.upload_status = UploadStatus::Failed(reason);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_analysis(
        &mut self,
        request: RequestId,
        outcome: Result<AnalysisResult, String>,
    ) {
        match self.phase {
            Phase::Analyzing { request: pending } if pending == request => {}
            _ => {
                panel_debug!("Ignoring stale analysis response request={}", request);
                return;
            }
        }

        // The notice about a deferred file is moot once the analysis settles.
        if self.upload_status == UploadStatus::Busy {
            self.upload_status = UploadStatus::Parsed;
        }
        match outcome {
            Ok(result) => {
                self.phase = Phase::Scored(result);
            }
            Err(reason) => {
                self.phase = self.resting_phase();
                self.analysis_error = Some(reason);
            }
        }
        self.mark_dirty();
    }

    /// Back to the mount state. The request counter survives so that responses
    /// to requests issued before the reset can never match a new one.
    pub(crate) fn reset(&mut self) {
        let last_request = self.last_request;
        *self = Self {
            last_request,
            ..Self::default()
        };
        self.mark_dirty();
    }
}
