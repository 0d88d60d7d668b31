//! Test helpers for rhyme-service integration tests.
//!
//! Spawns the service on a random port with both upstream APIs replaced by
//! wiremock servers.

#![allow(dead_code)]

use rhyme_service::config::{
    GoogleConfig, HttpClientConfig, ModelConfig, RhymeConfig, WordsApiConfig,
};
use rhyme_service::startup::Application;
use serde_json::json;
use service_core::config::Config as CoreConfig;
use std::net::{IpAddr, Ipv4Addr};
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_MODEL: &str = "gemini-2.5-flash";
pub const TEST_GOOGLE_API_KEY: &str = "test-google-key";
pub const TEST_RAPIDAPI_KEY: &str = "test-rapidapi-key";
pub const TEST_RAPIDAPI_HOST: &str = "wordsapiv1.p.rapidapi.com";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

pub struct TestApp {
    pub address: String,
    pub http_port: u16,
    pub gemini: MockServer,
    pub words_api: MockServer,
    client: reqwest::Client,
}

/// Configuration pointing both providers at the given mock servers.
pub fn test_config(gemini_uri: &str, words_api_uri: &str) -> RhymeConfig {
    RhymeConfig {
        common: CoreConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        },
        models: ModelConfig {
            text_model: TEST_MODEL.to_string(),
            temperature: 1.0,
        },
        google: GoogleConfig {
            api_key: TEST_GOOGLE_API_KEY.to_string(),
            api_base_url: format!("{}/v1beta", gemini_uri),
        },
        words_api: WordsApiConfig {
            api_key: TEST_RAPIDAPI_KEY.to_string(),
            host: TEST_RAPIDAPI_HOST.to_string(),
            base_url: words_api_uri.to_string(),
        },
        http_client: HttpClientConfig { timeout_secs: 5 },
    }
}

/// A Gemini `generateContent` reply carrying `text`.
pub fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 60, "candidatesTokenCount": 2 }
    }))
}

impl TestApp {
    pub async fn spawn() -> Self {
        let gemini = MockServer::start().await;
        let words_api = MockServer::start().await;

        let config = test_config(&gemini.uri(), &words_api.uri());
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let http_port = app.http_port();
        let address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            http_port,
            gemini,
            words_api,
            client,
        }
    }

    /// GET `path_and_query` on the running service.
    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path_and_query))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
