use std::sync::{mpsc, Arc};

use panel_core::{AnalysisResult, Effect, Msg};
use panel_engine::{
    ClientError, ClientSettings, EngineEvent, EngineHandle, EventSink, ScoreReport,
};
use panel_logging::{panel_info, panel_warn};

use super::app::LoopEvent;

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Result<Self, ClientError> {
        let sink = Arc::new(MsgSink { loop_tx });
        Ok(Self {
            engine: EngineHandle::new(settings, sink)?,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UploadResume { request, file } => {
                    panel_info!("UploadResume request={} file={:?}", request, file.file_name());
                    self.engine.upload(request, file.path());
                }
                Effect::ScoreResume { request, payload } => {
                    panel_info!("ScoreResume request={}", request);
                    self.engine
                        .score(request, payload.resume_text, payload.job_description);
                }
            }
        }
    }
}

struct MsgSink {
    loop_tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.loop_tx.send(LoopEvent::Msg(to_msg(event)));
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { request, result } => Msg::UploadFinished {
            request,
            outcome: result.map(|parsed| parsed.text).map_err(|err| {
                panel_warn!("Upload request={} failed: {}", request, err);
                err.to_string()
            }),
        },
        EngineEvent::ScoreCompleted { request, result } => Msg::AnalysisFinished {
            request,
            outcome: result.map(to_analysis).map_err(|err| {
                panel_warn!("Score request={} failed: {}", request, err);
                err.to_string()
            }),
        },
    }
}

fn to_analysis(report: ScoreReport) -> AnalysisResult {
    AnalysisResult {
        score: report.score,
        matched_keywords: report.matched_keywords,
        missing_keywords: report.missing_keywords,
        strengths: report.strengths,
        weaknesses: report.weaknesses,
        suggestions: report.suggestions,
    }
}
