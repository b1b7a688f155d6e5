// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use dill::*;
use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use rocrate_uploader_core::*;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Talks to the Zenodo deposit REST API.
///
/// Deposition identifiers are remembered per upload key in
/// [`DepositionIdCache`], so re-running an upload with the same key updates the
/// existing record according to [`ExistingDepositionPolicy`].
pub struct ZenodoClientHttp {
    config: Arc<ZenodoClientConfig>,
    upload_config: Arc<ZenodoUploadConfig>,
    deposition_id_cache: Arc<dyn DepositionIdCache>,
}

#[component(pub)]
#[interface(dyn ZenodoClient)]
impl ZenodoClientHttp {
    const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        config: Arc<ZenodoClientConfig>,
        upload_config: Arc<ZenodoUploadConfig>,
        deposition_id_cache: Arc<dyn DepositionIdCache>,
    ) -> Self {
        Self {
            config,
            upload_config,
            deposition_id_cache,
        }
    }

    fn resolve_token(&self, env: ZenodoEnvironment) -> Result<SecretString, ZenodoClientError> {
        if let Some(token) = &self.config.access_token
            && !token.expose_secret().is_empty()
        {
            return Ok(token.clone());
        }

        let env_var = env.token_env_var();
        if self.config.token_from_env
            && let Ok(token) = std::env::var(env_var)
            && !token.is_empty()
        {
            return Ok(SecretString::from(token));
        }

        Err(ZenodoClientError::MissingToken { env_var })
    }

    fn open_session(&self, env: ZenodoEnvironment) -> Result<ZenodoSession, ZenodoClientError> {
        let token = self.resolve_token(env)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Self::HTTP_CONNECT_TIMEOUT)
            .timeout(self.config.request_timeout)
            .build()
            .int_err()?;

        Ok(ZenodoSession {
            client,
            base_url: self.config.base_url(env).clone(),
            token,
        })
    }

    async fn create_deposition(
        &self,
        session: &ZenodoSession,
        metadata: &ZenodoMetadata,
        paths: &[PathBuf],
    ) -> Result<Deposition, ZenodoClientError> {
        let deposition = session.create_deposition(metadata).await?;
        tracing::info!(deposition_id = deposition.id, "Created deposition");

        session.upload_files(&deposition, paths).await?;
        Ok(deposition)
    }

    async fn update_existing(
        &self,
        session: &ZenodoSession,
        deposition_id: u64,
        metadata: &ZenodoMetadata,
        paths: &[PathBuf],
    ) -> Result<Option<Deposition>, ZenodoClientError> {
        let existing = match session.get_deposition(deposition_id).await {
            Ok(d) => d,
            Err(ZenodoClientError::Api { status: 404, .. }) => {
                tracing::warn!(deposition_id, "Cached deposition no longer exists");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let draft = if existing.dto.submitted {
            let draft = session.new_version(&existing).await?;
            tracing::info!(
                previous_deposition_id = existing.id,
                deposition_id = draft.id,
                "Created new version of a published deposition"
            );
            draft
        } else {
            tracing::info!(deposition_id, "Updating draft deposition in place");
            existing
        };

        session.update_metadata(draft.id, metadata).await?;
        for file in &draft.dto.files {
            session.delete_file(draft.id, &file.id).await?;
        }
        session.upload_files(&draft, paths).await?;

        Ok(Some(draft))
    }
}

#[async_trait::async_trait]
impl ZenodoClient for ZenodoClientHttp {
    #[tracing::instrument(level = "info", skip_all, fields(%key, %sandbox))]
    async fn ensure_deposition(
        &self,
        key: &str,
        metadata: &ZenodoMetadata,
        paths: &[PathBuf],
        sandbox: bool,
    ) -> Result<Value, ZenodoClientError> {
        let env = ZenodoEnvironment::from_sandbox_flag(sandbox);
        let session = self.open_session(env)?;

        if let Some(path) = paths.iter().find(|p| !p.is_file()) {
            return Err(ZenodoClientError::FileNotFound { path: path.clone() });
        }

        let cached_id = self
            .deposition_id_cache
            .get_deposition_id(env, key)
            .await?;

        let existing = match (cached_id, self.upload_config.on_existing) {
            (Some(deposition_id), ExistingDepositionPolicy::NewVersion) => {
                self.update_existing(&session, deposition_id, metadata, paths)
                    .await?
            }
            (Some(deposition_id), ExistingDepositionPolicy::NewDeposition) => {
                tracing::info!(
                    deposition_id,
                    "Ignoring cached deposition as configured to always create a new one"
                );
                None
            }
            (None, _) => None,
        };

        let deposition = match existing {
            Some(d) => d,
            None => self.create_deposition(&session, metadata, paths).await?,
        };

        let result = if self.upload_config.publish {
            let published = session.publish(deposition.id).await?;
            tracing::info!(deposition_id = deposition.id, "Published deposition");
            published
        } else {
            session.get_deposition(deposition.id).await?.raw
        };

        self.deposition_id_cache
            .set_deposition_id(env, key, deposition.id)
            .await?;

        Ok(result)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Session
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct ZenodoSession {
    client: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl ZenodoSession {
    /// Appends to the base URL's path, so a base like `https://host/zenodo`
    /// keeps its prefix
    fn depositions_url(&self, suffix: &str) -> Result<Url, InternalError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| "Zenodo URL cannot be a base")
            .int_err()?
            .pop_if_empty()
            .extend(["api", "deposit", "depositions"])
            .extend(suffix.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ZenodoClientError> {
        let request = request
            .bearer_auth(self.token.expose_secret())
            .build()
            .int_err()?;

        let method = request.method().clone();
        let url = request.url().to_string();
        tracing::debug!(%method, %url, "Sending Zenodo API request");

        let response = self.client.execute(request).await.int_err()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%method, %url, %status, %body, "Zenodo API request failed");

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    ZenodoClientError::Unauthorized {
                        status: status.as_u16(),
                    }
                }
                _ => ZenodoClientError::Api {
                    status: status.as_u16(),
                    url,
                    body,
                },
            });
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let bytes = response.bytes().await.int_err()?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes).int_err()?)
    }

    async fn create_deposition(
        &self,
        metadata: &ZenodoMetadata,
    ) -> Result<Deposition, ZenodoClientError> {
        let url = self.depositions_url("")?;
        let raw = self
            .send(self.client.post(url).json(&json!({ "metadata": metadata })))
            .await?;
        Ok(Deposition::from_raw(raw)?)
    }

    async fn get_deposition(&self, deposition_id: u64) -> Result<Deposition, ZenodoClientError> {
        let url = self.depositions_url(&format!("/{deposition_id}"))?;
        self.get_deposition_by_url(url).await
    }

    async fn get_deposition_by_url(&self, url: Url) -> Result<Deposition, ZenodoClientError> {
        let raw = self.send(self.client.get(url)).await?;
        Ok(Deposition::from_raw(raw)?)
    }

    async fn new_version(&self, published: &Deposition) -> Result<Deposition, ZenodoClientError> {
        let url = self.depositions_url(&format!("/{}/actions/newversion", published.id))?;
        let raw = self.send(self.client.post(url)).await?;

        let response = Deposition::from_raw(raw)?;
        let Some(latest_draft) = &response.dto.links.latest_draft else {
            return Err("Zenodo did not return a link to the new version draft"
                .int_err()
                .into());
        };
        let latest_draft = Url::parse(latest_draft).int_err()?;

        self.get_deposition_by_url(latest_draft).await
    }

    async fn update_metadata(
        &self,
        deposition_id: u64,
        metadata: &ZenodoMetadata,
    ) -> Result<(), ZenodoClientError> {
        let url = self.depositions_url(&format!("/{deposition_id}"))?;
        self.send(self.client.put(url).json(&json!({ "metadata": metadata })))
            .await?;
        Ok(())
    }

    async fn delete_file(&self, deposition_id: u64, file_id: &str) -> Result<(), ZenodoClientError> {
        let url = self.depositions_url(&format!("/{deposition_id}/files/{file_id}"))?;
        tracing::debug!(deposition_id, file_id, "Deleting file from draft");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn upload_files(
        &self,
        deposition: &Deposition,
        paths: &[PathBuf],
    ) -> Result<(), ZenodoClientError> {
        let Some(bucket) = &deposition.dto.links.bucket else {
            return Err(format!("Deposition {} has no bucket link", deposition.id)
                .int_err()
                .into());
        };

        for path in paths {
            self.upload_file(bucket, path).await?;
        }
        Ok(())
    }

    async fn upload_file(&self, bucket: &str, path: &Path) -> Result<(), ZenodoClientError> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(format!("Can't determine file name of {}", path.display())
                .int_err()
                .into());
        };

        let mut url = Url::parse(bucket).int_err()?;
        url.path_segments_mut()
            .map_err(|_| "Bucket URL cannot be a base")
            .int_err()?
            .pop_if_empty()
            .push(file_name);

        let file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ZenodoClientError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.int_err().into()),
        };
        let size = file.metadata().await.int_err()?.len();

        tracing::info!(path = %path.display(), size, %url, "Uploading file");

        self.send(
            self.client
                .put(url)
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .header(reqwest::header::CONTENT_LENGTH, size)
                .body(reqwest::Body::from(file)),
        )
        .await?;

        Ok(())
    }

    async fn publish(&self, deposition_id: u64) -> Result<Value, ZenodoClientError> {
        let url = self.depositions_url(&format!("/{deposition_id}/actions/publish"))?;
        self.send(self.client.post(url)).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deposition as returned by the API, along with the fields we act upon
struct Deposition {
    id: u64,
    raw: Value,
    dto: DepositionDto,
}

impl Deposition {
    fn from_raw(raw: Value) -> Result<Self, InternalError> {
        let dto: DepositionDto = serde_json::from_value(raw.clone())
            .context_int_err("unexpected deposition representation")?;
        Ok(Self {
            id: dto.id,
            raw,
            dto,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DepositionDto {
    id: u64,
    #[serde(default)]
    submitted: bool,
    #[serde(default)]
    links: DepositionLinksDto,
    #[serde(default)]
    files: Vec<DepositionFileDto>,
}

#[derive(Debug, Default, Deserialize)]
struct DepositionLinksDto {
    bucket: Option<String>,
    latest_draft: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DepositionFileDto {
    id: String,
}
