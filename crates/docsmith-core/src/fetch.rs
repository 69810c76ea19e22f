//! Fetching one version's inputs from the schema source
//!
//! The schema document and the per-language example sets are independent
//! resources; for one version they are requested concurrently and joined.
//! All of them must succeed - a single failed fetch aborts that version's
//! generation with a descriptive error, and the caller moves on to the
//! next configured version.

use crate::error::{Error, Result};
use crate::schema::{Lang, LanguageExamples, SchemaDocument, SdkExampleSet};
use futures::future::try_join_all;
use tracing::{debug, info};
use url::Url;

/// HTTP client bound to one version's schema base URL
#[derive(Debug, Clone)]
pub struct SchemaClient {
    http: reqwest::Client,
    base: Url,
}

impl SchemaClient {
    /// Create a client for `{base_url}/{version}/`
    pub fn for_version(base_url: &str, version: &str) -> Result<Self> {
        let joined = format!("{}/{}/", base_url.trim_end_matches('/'), version);
        let base = Url::parse(&joined).map_err(|source| Error::Url {
            input: joined,
            source,
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Fetch the schema document plus every language's example set,
    /// concurrently
    pub async fn fetch_version_inputs(
        &self,
        langs: &[Lang],
    ) -> Result<(SchemaDocument, Vec<LanguageExamples>)> {
        info!(base = %self.base, "fetching schema and example sets");
        let examples = try_join_all(langs.iter().map(|&lang| self.fetch_examples(lang)));
        let (schema, examples) = tokio::try_join!(self.fetch_schema(), examples)?;
        Ok((schema, examples))
    }

    async fn fetch_schema(&self) -> Result<SchemaDocument> {
        let text = self.get_text("api_schema.json").await?;
        serde_json::from_str(&text).map_err(|source| Error::Json {
            context: format!("{}api_schema.json", self.base),
            source,
        })
    }

    async fn fetch_examples(&self, lang: Lang) -> Result<LanguageExamples> {
        let file = format!("{}-examples.json", lang.slug());
        let text = self.get_text(&file).await?;
        let set: SdkExampleSet = serde_json::from_str(&text).map_err(|source| Error::Json {
            context: format!("{}{}", self.base, file),
            source,
        })?;
        debug!(
            lang = %lang,
            endpoints = set.endpoints.len(),
            management = set.management.len(),
            "loaded example set"
        );
        Ok(LanguageExamples::new(lang, set))
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.base.join(path).map_err(|source| Error::Url {
            input: format!("{}{}", self.base, path),
            source,
        })?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                message: "request failed".to_string(),
                source: Some(source),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                url: url.to_string(),
                message: format!("unexpected status {status}"),
                source: None,
            });
        }
        response.text().await.map_err(|source| Error::Http {
            url: url.to_string(),
            message: "failed to read body".to_string(),
            source: Some(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_version_joins_base_and_version() {
        let client = SchemaClient::for_version("https://schemas.example.com/api", "v1").unwrap();
        assert_eq!(client.base.as_str(), "https://schemas.example.com/api/v1/");

        // Trailing slash on the base does not double up.
        let client = SchemaClient::for_version("https://schemas.example.com/api/", "v2").unwrap();
        assert_eq!(client.base.as_str(), "https://schemas.example.com/api/v2/");
    }

    #[test]
    fn test_for_version_rejects_garbage() {
        assert!(SchemaClient::for_version("not a url", "v1").is_err());
    }
}
