//! JSON bodies exchanged with the backend.
use serde::{Deserialize, Serialize};

use crate::{ClientError, FailureKind, ParsedResume, ScoreReport};

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponseBody {
    /// Missing or `null` is read as an empty résumé.
    #[serde(default)]
    text: Option<String>,
}

impl From<UploadResponseBody> for ParsedResume {
    fn from(body: UploadResponseBody) -> Self {
        ParsedResume {
            text: body.text.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreRequestBody<'a> {
    pub resume: &'a str,
    pub jobdesc: &'a str,
}

/// The scoring service names its lists either `*Keywords` or `*Skills`; some
/// deployments send both, in which case the `*Keywords` spelling wins.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoreResponseBody {
    score: JsonNumber,
    #[serde(default)]
    matched_keywords: Option<Vec<String>>,
    #[serde(default)]
    matched_skills: Option<Vec<String>>,
    #[serde(default)]
    missing_keywords: Option<Vec<String>>,
    #[serde(default)]
    missing_skills: Option<Vec<String>>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl TryFrom<ScoreResponseBody> for ScoreReport {
    type Error = ClientError;

    fn try_from(body: ScoreResponseBody) -> Result<Self, Self::Error> {
        let matched_keywords = body
            .matched_keywords
            .or(body.matched_skills)
            .ok_or_else(|| {
                ClientError::new(
                    FailureKind::MalformedResponse,
                    "missing field `matchedKeywords`",
                )
            })?;
        Ok(ScoreReport {
            score: body.score.to_i64(),
            matched_keywords,
            missing_keywords: body
                .missing_keywords
                .or(body.missing_skills)
                .unwrap_or_default(),
            strengths: body.strengths,
            weaknesses: body.weaknesses,
            suggestions: body.suggestions,
        })
    }
}

/// Scores are integral in practice, but JSON does not distinguish `82` from `82.0`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonNumber {
    Int(i64),
    Float(f64),
}

impl JsonNumber {
    fn to_i64(&self) -> i64 {
        match *self {
            JsonNumber::Int(value) => value,
            JsonNumber::Float(value) => value.round() as i64,
        }
    }
}

/// Shape of the backend's failure responses, e.g. `{"error": "Missing input"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
