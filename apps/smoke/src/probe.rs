//! Probe model: what to send, and what a healthy response looks like.
//!
//! A `Probe` describes one HTTP check. `Expectation::classify` turns the raw
//! `Observation` that came back into pass (a human-readable summary) or fail
//! (a typed `ProbeError`). `standard_plan` builds the probe sequence the
//! harness runs against a deployment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::Method;

use crate::config::Config;
use crate::errors::ProbeError;
use crate::fixtures;

const OPTIMIZE_PATH: &str = "/optimize-cv";
const CV_FIELD: &str = "cv_file";
const CV_FILE_NAME: &str = "cv.txt";
const CV_CONTENT_TYPE: &str = "text/plain";
const JOB_OFFER_FIELD: &str = "job_offer";

/// Body excerpts quoted in failure messages are capped at this many chars.
const EXCERPT_MAX_CHARS: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

/// One discrete HTTP check against the target deployment. Immutable once
/// built; the runner executes probes in plan order.
#[derive(Debug)]
pub struct Probe {
    pub name: String,
    pub method: Method,
    pub url: String,
    pub form_fields: Vec<(String, String)>,
    pub attachment: Option<Attachment>,
    pub expect: Expectation,
    /// A failing blocking probe halts the remainder of the run.
    pub blocking: bool,
    /// On success, the response body is written here verbatim.
    pub save_artifact_to: Option<PathBuf>,
}

/// A file part of a multipart submission.
#[derive(Debug)]
pub struct Attachment {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub content: String,
}

/// What a well-formed 200 payload looks like for a given probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Status 200 and a body that parses as JSON (backend liveness).
    JsonBody,
    /// Status 200, any body (the frontend serves an HTML page).
    AnyBody,
    /// Status 200 with a Content-Type indicating a binary document and a
    /// non-empty body (the generation endpoint).
    BinaryDocument,
}

/// The raw outcome of one HTTP exchange, before classification.
#[derive(Debug)]
pub struct Observation {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Probe {
    /// Backend liveness check: `GET {base}/`, expects a JSON body.
    pub fn liveness(name: &str, base_url: &str) -> Self {
        Probe {
            name: name.to_string(),
            method: Method::GET,
            url: format!("{base_url}/"),
            form_fields: Vec::new(),
            attachment: None,
            expect: Expectation::JsonBody,
            blocking: true,
            save_artifact_to: None,
        }
    }

    /// Frontend liveness check: `GET {base}/`, any body counts.
    pub fn page(name: &str, base_url: &str) -> Self {
        Probe {
            name: name.to_string(),
            method: Method::GET,
            url: format!("{base_url}/"),
            form_fields: Vec::new(),
            attachment: None,
            expect: Expectation::AnyBody,
            blocking: true,
            save_artifact_to: None,
        }
    }

    /// Generation check: multipart `POST {base}/optimize-cv` with the CV as
    /// a `cv.txt` file part and the job offer as a text field. The returned
    /// document is saved to `output`.
    pub fn generation(
        name: &str,
        base_url: &str,
        cv: String,
        job_offer: String,
        output: PathBuf,
    ) -> Self {
        Probe {
            name: name.to_string(),
            method: Method::POST,
            url: format!("{base_url}{OPTIMIZE_PATH}"),
            form_fields: vec![(JOB_OFFER_FIELD.to_string(), job_offer)],
            attachment: Some(Attachment {
                field_name: CV_FIELD.to_string(),
                file_name: CV_FILE_NAME.to_string(),
                content_type: CV_CONTENT_TYPE.to_string(),
                content: cv,
            }),
            expect: Expectation::BinaryDocument,
            blocking: true,
            save_artifact_to: Some(output),
        }
    }
}

impl Expectation {
    /// Classifies an observation. Anything other than status 200 with a
    /// well-formed payload is a failure; the Ok value is the summary line
    /// shown in the report.
    pub fn classify(&self, observation: &Observation) -> Result<String, ProbeError> {
        if observation.status != 200 {
            return Err(ProbeError::UnexpectedStatus {
                status: observation.status,
                body_excerpt: excerpt(&observation.body),
            });
        }

        match self {
            Expectation::JsonBody => {
                match serde_json::from_slice::<serde_json::Value>(&observation.body) {
                    Ok(body) => Ok(format!("service responded: {body}")),
                    Err(e) => Err(ProbeError::MalformedResponse(format!(
                        "Body is not valid JSON: {e}"
                    ))),
                }
            }
            Expectation::AnyBody => Ok(format!("page served ({} bytes)", observation.body.len())),
            Expectation::BinaryDocument => {
                let content_type = observation.content_type.as_deref().ok_or_else(|| {
                    ProbeError::MalformedResponse("Response has no Content-Type header".to_string())
                })?;
                if content_type.starts_with("text/html") {
                    return Err(ProbeError::MalformedResponse(format!(
                        "Expected a binary document, got {content_type}"
                    )));
                }
                if observation.body.is_empty() {
                    return Err(ProbeError::MalformedResponse(
                        "Response body is empty".to_string(),
                    ));
                }
                Ok(format!(
                    "received {content_type} ({} bytes)",
                    observation.body.len()
                ))
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Plan construction
// ────────────────────────────────────────────────────────────────────────────

/// Builds the probe sequence for one run:
/// backend liveness, frontend liveness (when a frontend is configured),
/// CV generation, and a trailing backend connectivity re-check (full-stack
/// runs only). All probes are blocking, so the first failure aborts the run.
pub fn standard_plan(config: &Config) -> Result<Vec<Probe>> {
    let cv = read_input(config.cv_file.as_deref(), fixtures::SAMPLE_CV, "CV")?;
    let job_offer = read_input(
        config.job_offer_file.as_deref(),
        fixtures::SAMPLE_JOB_OFFER,
        "job offer",
    )?;

    let mut plan = vec![Probe::liveness("backend liveness", &config.base_url)];
    if let Some(frontend_url) = &config.frontend_url {
        plan.push(Probe::page("frontend liveness", frontend_url));
    }
    plan.push(Probe::generation(
        "cv generation",
        &config.base_url,
        cv,
        job_offer,
        config.output_path.clone(),
    ));
    if config.frontend_url.is_some() {
        plan.push(Probe::liveness("backend connectivity", &config.base_url));
    }

    Ok(plan)
}

fn read_input(path: Option<&Path>, fallback: &str, label: &str) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {label} file {}", path.display())),
        None => Ok(fallback.to_string()),
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "<empty body>".to_string();
    }
    let mut out: String = text.chars().take(EXCERPT_MAX_CHARS).collect();
    if text.chars().count() > EXCERPT_MAX_CHARS {
        out.push_str("...");
    }
    out
}
