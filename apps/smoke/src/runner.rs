//! Sequential probe executor.
//!
//! Probes run in plan order. When a blocking probe fails, the remainder of
//! the plan is skipped and recorded by name; the run's overall result is the
//! AND of every executed probe. Probe failures never escape as errors, they
//! become failed `ProbeResult`s.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::artifact;
use crate::client::ProbeClient;
use crate::errors::ProbeError;
use crate::probe::Probe;

/// Outcome of one probe, ready for rendering or JSON output.
#[derive(Debug, Serialize)]
pub struct ProbeResult {
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    pub elapsed_ms: u64,
}

/// Outcome of a whole run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub overall_success: bool,
    pub results: Vec<ProbeResult>,
    pub skipped: Vec<String>,
}

/// Executes the plan in order, halting after the first blocking failure.
pub async fn run(client: &ProbeClient, plan: Vec<Probe>) -> RunReport {
    let mut results = Vec::with_capacity(plan.len());
    let mut skipped = Vec::new();
    let mut halted = false;

    for probe in &plan {
        if halted {
            skipped.push(probe.name.clone());
            continue;
        }

        info!("Probing {} ({})", probe.name, probe.url);
        let result = execute_probe(client, probe).await;
        if result.success {
            debug!("{} passed in {}ms", probe.name, result.elapsed_ms);
        } else {
            warn!("{} failed: {}", probe.name, result.message);
            if probe.blocking {
                halted = true;
            }
        }
        results.push(result);
    }

    RunReport {
        overall_success: results.iter().all(|r| r.success),
        results,
        skipped,
    }
}

/// Runs one probe end to end: request, classification, artifact write.
/// Every failure mode collapses into a failed result here.
async fn execute_probe(client: &ProbeClient, probe: &Probe) -> ProbeResult {
    let started = Instant::now();
    let outcome = check(client, probe).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok((status, message)) => ProbeResult {
            name: probe.name.clone(),
            success: true,
            status: Some(status),
            message,
            artifact: probe.save_artifact_to.clone(),
            elapsed_ms,
        },
        Err(e) => ProbeResult {
            name: probe.name.clone(),
            success: false,
            status: e.status_code(),
            message: e.to_string(),
            artifact: None,
            elapsed_ms,
        },
    }
}

async fn check(client: &ProbeClient, probe: &Probe) -> Result<(u16, String), ProbeError> {
    let observation = client.execute(probe).await?;
    let message = probe.expect.classify(&observation)?;
    if let Some(path) = &probe.save_artifact_to {
        artifact::persist(path, &observation.body).await?;
    }
    Ok((observation.status, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn healthy_backend(document: &[u8]) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "CV Optimizer API is running"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/optimize-cv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(document.to_vec()),
            )
            .mount(&server)
            .await;
        server
    }

    fn generation_probe(server: &MockServer, output: PathBuf) -> Probe {
        Probe::generation(
            "cv generation",
            &server.uri(),
            fixtures::SAMPLE_CV.to_string(),
            fixtures::SAMPLE_JOB_OFFER.to_string(),
            output,
        )
    }

    #[tokio::test]
    async fn test_healthy_run_passes_and_saves_the_artifact() {
        let document = vec![0x7fu8; 15_000];
        let server = healthy_backend(&document).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("optimized-cv.pdf");

        let client = ProbeClient::new(5).unwrap();
        let plan = vec![
            Probe::liveness("backend liveness", &server.uri()),
            generation_probe(&server, output.clone()),
        ];
        let report = run(&client, plan).await;

        assert!(report.overall_success);
        assert!(report.skipped.is_empty());
        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|r| r.success));
        assert_eq!(report.results[1].status, Some(200));
        assert_eq!(report.results[1].artifact, Some(output.clone()));

        // The artifact is the response body, byte for byte.
        let on_disk = std::fs::read(&output).unwrap();
        assert_eq!(on_disk.len(), document.len());
        assert_eq!(on_disk, document);
    }

    #[tokio::test]
    async fn test_a_second_identical_run_reports_the_same_outcome() {
        let document = vec![0x7fu8; 512];
        let server = healthy_backend(&document).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("optimized-cv.pdf");
        let client = ProbeClient::new(5).unwrap();

        for _ in 0..2 {
            let plan = vec![
                Probe::liveness("backend liveness", &server.uri()),
                generation_probe(&server, output.clone()),
            ];
            let report = run(&client, plan).await;
            assert!(report.overall_success);
            assert_eq!(std::fs::read(&output).unwrap().len(), document.len());
        }
    }

    #[tokio::test]
    async fn test_blocking_failure_skips_the_rest_of_the_plan() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;
        // The generation endpoint must never be called after the liveness
        // probe fails.
        Mock::given(method("POST"))
            .and(path("/optimize-cv"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("optimized-cv.pdf");
        let client = ProbeClient::new(5).unwrap();
        let plan = vec![
            Probe::liveness("backend liveness", &server.uri()),
            generation_probe(&server, output.clone()),
        ];
        let report = run(&client, plan).await;

        assert!(!report.overall_success);
        assert_eq!(report.results.len(), 1);
        assert!(!report.results[0].success);
        assert_eq!(report.results[0].status, Some(503));
        assert!(report.results[0].message.contains("503"));
        assert_eq!(report.skipped, vec!["cv generation".to_string()]);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_the_run_without_crashing() {
        let client = ProbeClient::new(1).unwrap();
        let plan = vec![Probe::liveness("backend liveness", "http://127.0.0.1:1")];
        let report = run(&client, plan).await;

        assert!(!report.overall_success);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].status, None);
        assert!(!report.results[0].message.is_empty());
    }

    #[tokio::test]
    async fn test_artifact_write_failure_fails_the_probe() {
        let document = vec![0x7fu8; 64];
        let server = healthy_backend(&document).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing-parent").join("optimized-cv.pdf");

        let client = ProbeClient::new(5).unwrap();
        let plan = vec![generation_probe(&server, output)];
        let report = run(&client, plan).await;

        assert!(!report.overall_success);
        assert!(!report.results[0].success);
        assert!(report.results[0].message.contains("Failed to write artifact"));
        assert_eq!(report.results[0].artifact, None);
    }

    #[tokio::test]
    async fn test_non_blocking_failure_does_not_halt_the_run() {
        let down = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&down)
            .await;
        let up = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&up)
            .await;

        let mut optional = Probe::liveness("optional check", &down.uri());
        optional.blocking = false;
        let plan = vec![optional, Probe::liveness("backend liveness", &up.uri())];

        let client = ProbeClient::new(5).unwrap();
        let report = run(&client, plan).await;

        assert_eq!(report.results.len(), 2);
        assert!(!report.results[0].success);
        assert!(report.results[1].success);
        assert!(report.skipped.is_empty());
        // Overall success is the AND of every probe, so one failure is enough.
        assert!(!report.overall_success);
    }

    #[tokio::test]
    async fn test_malformed_liveness_body_fails_the_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = ProbeClient::new(5).unwrap();
        let probe = Probe::liveness("backend liveness", &server.uri());

        let report = run(&client, vec![probe]).await;
        assert!(!report.overall_success);
        assert!(report.results[0].message.contains("not valid JSON"));
        assert_eq!(report.results[0].status, None);
    }
}
