//! Thin HTTP layer around `reqwest`: turns a `Probe` into a request and the
//! response into an `Observation`. Every failure surfaces as a `ProbeError`.

use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;

use crate::errors::ProbeError;
use crate::probe::{Observation, Probe};

pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// Builds a client whose requests are bounded by `timeout_secs`. The
    /// timeout covers the whole exchange, connect through body read, so a
    /// hung service cannot stall the run indefinitely.
    pub fn new(timeout_secs: u64) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(ProbeClient { client })
    }

    /// Sends the probe's request and collects status, Content-Type and the
    /// full body. Classification of the payload is the probe's job; this
    /// method only fails on transport problems.
    pub async fn execute(&self, probe: &Probe) -> Result<Observation, ProbeError> {
        let mut request = self.client.request(probe.method.clone(), &probe.url);

        if probe.attachment.is_some() || !probe.form_fields.is_empty() {
            let mut form = multipart::Form::new();
            for (name, value) in &probe.form_fields {
                form = form.text(name.clone(), value.clone());
            }
            if let Some(attachment) = &probe.attachment {
                let part = multipart::Part::text(attachment.content.clone())
                    .file_name(attachment.file_name.clone())
                    .mime_str(&attachment.content_type)?;
                form = form.part(attachment.field_name.clone(), part);
            }
            request = request.multipart(form);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(Observation {
            status,
            content_type,
            body,
        })
    }
}
