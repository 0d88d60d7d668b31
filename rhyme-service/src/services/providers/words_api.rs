//! WordsAPI (via RapidAPI) rhymes provider.

use super::{ProviderError, RhymesProvider};
use crate::config::WordsApiConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};

const PROVIDER_NAME: &str = "words_api";
const RAPIDAPI_KEY_HEADER: &str = "X-RapidAPI-Key";
const RAPIDAPI_HOST_HEADER: &str = "X-RapidAPI-Host";

pub struct WordsApiProvider {
    config: WordsApiConfig,
    client: Client,
}

impl WordsApiProvider {
    pub fn new(config: WordsApiConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// `{base_url}/words/{word}/rhymes`, with `word` encoded as one path segment.
    fn rhymes_url(&self, word: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            ProviderError::NotConfigured(format!(
                "Invalid WordsAPI base URL '{}': {}",
                self.config.base_url, e
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::NotConfigured(format!(
                    "WordsAPI base URL '{}' cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["words", word, "rhymes"]);

        Ok(url)
    }
}

#[async_trait]
impl RhymesProvider for WordsApiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn rhymes(&self, word: &str) -> Result<serde_json::Value, ProviderError> {
        let url = self.rhymes_url(word)?;

        tracing::debug!(word = %word, "Requesting rhymes from WordsAPI");

        let response = self
            .client
            .get(url)
            .header(RAPIDAPI_KEY_HEADER, &self.config.api_key)
            .header(RAPIDAPI_HOST_HEADER, &self.config.host)
            .send()
            .await
            .map_err(|e| {
                ProviderError::NetworkError(format!(
                    "Failed to connect to WordsAPI: {}",
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::UpstreamStatus {
                provider: PROVIDER_NAME,
                status,
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| {
                ProviderError::ApiError(format!(
                    "Failed to parse WordsAPI response: {}",
                    e.without_url()
                ))
            })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "RapidAPI key is not configured".to_string(),
            ));
        }

        if self.config.host.is_empty() {
            return Err(ProviderError::NotConfigured(
                "RapidAPI host is not configured".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> WordsApiProvider {
        WordsApiProvider::new(
            WordsApiConfig {
                api_key: "rapid-key".to_string(),
                host: "wordsapiv1.p.rapidapi.com".to_string(),
                base_url: base_url.to_string(),
            },
            Client::new(),
        )
    }

    #[test]
    fn url_encodes_word_as_single_segment() {
        let url = provider("https://example.test/").rhymes_url("ice cream/x").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/words/ice%20cream%2Fx/rhymes"
        );
    }

    #[test]
    fn url_keeps_base_path() {
        let url = provider("https://example.test/api").rhymes_url("cat").unwrap();
        assert_eq!(url.as_str(), "https://example.test/api/words/cat/rhymes");
    }

    #[test]
    fn invalid_base_url_is_not_configured() {
        let err = provider("not a url").rhymes_url("cat").unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn sends_rapidapi_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/words/cat/rhymes"))
            .and(header("X-RapidAPI-Key", "rapid-key"))
            .and(header("X-RapidAPI-Host", "wordsapiv1.p.rapidapi.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "word": "cat",
                "rhymes": { "all": ["bat", "hat"] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let doc = provider(&server.uri()).rhymes("cat").await.unwrap();
        assert_eq!(doc["rhymes"]["all"], json!(["bat", "hat"]));
    }

    #[tokio::test]
    async fn non_success_keeps_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"success":false,"message":"word not found"}"#),
            )
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        let err = provider.rhymes("qwxz").await.unwrap_err();
        assert_eq!(err.to_string(), "words_api returned 404 Not Found");
        match err {
            ProviderError::UpstreamStatus {
                provider: label,
                status,
                body,
            } => {
                assert_eq!(label, provider.name());
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(body, r#"{"success":false,"message":"word not found"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).rhymes("cat").await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiError(_)));
    }
}
