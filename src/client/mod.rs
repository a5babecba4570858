// This file is part of the terraform-provider-clearscape project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{RequestBuilder, StatusCode, Url};
use tracing::debug;

mod environments;
mod error;
mod models;
mod shared;

pub use error::{ApiError, ApiResult};
pub use models::{Credential, Environment, Service};
pub use shared::SharedClient;

pub const DEFAULT_HOST_URL: &str = "https://api.clearscape.teradata.com/";

/// Every request is bounded by this timeout, there is no per-call override
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(1000);

/// Client for the ClearScape REST API
///
/// The client is immutable once built and can be shared between concurrent
/// resource operations.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    token: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"***")
            .finish()
    }
}

impl ApiClient {
    /// Build a client for `host`, or for [`DEFAULT_HOST_URL`] if `host` is `None` or empty
    pub fn new(host: Option<&str>, token: impl Into<String>) -> ApiResult<Self> {
        let host = host.filter(|host| !host.is_empty()).unwrap_or(DEFAULT_HOST_URL);
        let base_url = Url::parse(host).map_err(|err| ApiError::InvalidUrl {
            url: host.to_owned(),
            message: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: host.to_owned(),
                message: "URL cannot be used as a base".to_owned(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            token: token.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each of them
    fn url<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authenticate and send a request, returning the body of a `200 OK` response
    async fn do_request(&self, request: RequestBuilder) -> ApiResult<Bytes> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), len = body.len(), "ClearScape API response");

        if status != StatusCode::OK {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body)
    }
}
