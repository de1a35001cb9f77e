// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP client shared by the catalog providers
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
    show_progress: bool,
}

impl JsonClient {
    pub fn new(timeout_secs: u64, show_progress: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("likedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            show_progress,
        })
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed_precise}] {bytes}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    }

    /// GET `url` and decode the JSON body.
    ///
    /// `accept` overrides the Accept header (Kitsu wants JSON:API).
    pub async fn get_json<T>(&self, url: Url, accept: Option<&'static str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        // Query strings carry API keys, only the path is logged
        let label = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
        debug!("Requesting {}", label);

        let pb = self.progress_bar();
        pb.set_message("Sending request...");

        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, HeaderValue::from_static(accept));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", label))?;

        if !response.status().is_success() {
            pb.finish_and_clear();
            return Err(anyhow::anyhow!(
                "HTTP request to {} failed with status: {}",
                label,
                response.status()
            ));
        }

        pb.set_message("Downloading...");

        let mut response_bytes = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = futures_util::StreamExt::next(&mut stream).await {
            let chunk = chunk_result.with_context(|| "Failed to read response chunk")?;
            response_bytes.extend_from_slice(&chunk);
            pb.set_position(response_bytes.len() as u64);
        }

        pb.finish_and_clear();
        debug!("Response from {}: {} bytes", label, response_bytes.len());

        let response_text = String::from_utf8(response_bytes)
            .with_context(|| "Failed to convert response to UTF-8 string")?;

        if response_text.trim().is_empty() {
            return Err(anyhow::anyhow!("Empty response from {}", label));
        }

        decode_json(&response_text)
    }
}

pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        let message = describe_parse_error(text, &e);
        warn!("JSON parsing error: {}", message);
        anyhow::anyhow!(message)
    })
}

/// Parse error with the line/column and about 100 characters either side
pub fn describe_parse_error(text: &str, e: &serde_json::Error) -> String {
    let line_num = e.line();
    let col_num = e.column();

    let mut byte_pos = 0;
    for (i, line_content) in text.lines().enumerate() {
        if i + 1 == line_num {
            byte_pos += col_num.saturating_sub(1);
            break;
        }
        byte_pos += line_content.len() + 1;
    }
    let byte_pos = byte_pos.min(text.len());

    let mut start = byte_pos.saturating_sub(100);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (byte_pos + 100).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    format!(
        "JSON parsing failed at line {}, column {} (byte position ~{}):\n\
        Context: ...{}...\n\
        Error: {}",
        line_num,
        col_num,
        byte_pos,
        text[start..end].replace(['\n', '\r'], " "),
        e
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Page {
        page: u32,
    }

    #[test]
    fn parse_error_points_at_location() {
        let text = "{\n  \"page\": \"one\"\n}";
        let err = decode_json::<Page>(text).unwrap_err().to_string();

        assert!(err.contains("line 2"));
        assert!(err.contains("\"page\": \"one\""));
    }

    #[test]
    fn parse_error_context_respects_char_boundaries() {
        let text = format!("{{\"page\": \"{}\"", "ü".repeat(200));
        let err = serde_json::from_str::<Page>(&text).unwrap_err();

        // Must not panic slicing through multi-byte characters
        let message = describe_parse_error(&text, &err);
        assert!(message.starts_with("JSON parsing failed"));
    }

    #[test]
    fn decodes_valid_json() {
        let page: Page = decode_json("{\"page\": 3}").unwrap();
        assert_eq!(page.page, 3);
    }
}
