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

use thiserror::Error;

/// Failure of a call to the ClearScape API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The API answered with anything but `200 OK`
    #[error("status: {status}, body: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
