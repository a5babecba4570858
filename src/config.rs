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

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description};
use tf_provider::value::{Value, ValueString};
use tf_provider::{map, AttributePath};

/// Environment variable holding the API token when the configuration does not set one
pub const TOKEN_ENV_VAR: &str = "CLEARCAPE_API_TOKEN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The provider cannot create the ClearScape API client as there is an unknown configuration value for the ClearScape API token.")]
    UnknownToken,
    #[error("The provider cannot create the ClearScape API client as the ClearScape API token is missing. Set the `token` value in the configuration or use the CLEARCAPE_API_TOKEN environment variable. If either is already set, ensure the value is not empty.")]
    MissingToken,
    #[error("The provider cannot create the ClearScape API client as there is an unknown configuration value for the ClearScape API host.")]
    UnknownHost,
}

impl ConfigError {
    pub fn summary(&self) -> &'static str {
        match self {
            ConfigError::UnknownToken => "Unknown ClearScape API Token",
            ConfigError::MissingToken => "Missing ClearScape API Token",
            ConfigError::UnknownHost => "Unknown ClearScape API Host",
        }
    }

    pub fn attribute(&self) -> AttributePath {
        match self {
            ConfigError::UnknownToken | ConfigError::MissingToken => AttributePath::new("token"),
            ConfigError::UnknownHost => AttributePath::new("host"),
        }
    }
}

/// `provider "clearscape"` block
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    #[serde(borrow = "'a")]
    pub token: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub host: ValueString<'a>,
}

impl<'a> ProviderConfig<'a> {
    pub fn block() -> Block {
        Block {
            description: Description::plain("ClearScape environments"),
            attributes: map! {
                "token" => Attribute {
                    attr_type: AttributeType::String,
                    description: Description::plain(format!(
                        "ClearScape API token. Defaults to the {TOKEN_ENV_VAR} environment variable."
                    )),
                    constraint: AttributeConstraint::Optional,
                    sensitive: true,
                    deprecated: false,
                },
                "host" => Attribute {
                    attr_type: AttributeType::String,
                    description: Description::plain(format!(
                        "Base URL of the ClearScape API. Defaults to {}",
                        crate::client::DEFAULT_HOST_URL
                    )),
                    constraint: AttributeConstraint::Optional,
                    sensitive: false,
                    deprecated: false,
                },
            },
            ..Default::default()
        }
    }

    /// Token to authenticate with
    ///
    /// A token set in the configuration always wins over `from_env`, even when empty.
    pub fn resolve_token(&self, from_env: Option<String>) -> Result<String, ConfigError> {
        let token = match &self.token {
            Value::Value(token) => token.to_string(),
            Value::Null => from_env.unwrap_or_default(),
            Value::Unknown => return Err(ConfigError::UnknownToken),
        };
        if token.is_empty() {
            Err(ConfigError::MissingToken)
        } else {
            Ok(token)
        }
    }

    /// Host override, `None` when the default host should be used
    pub fn resolve_host(&self) -> Result<Option<&str>, ConfigError> {
        match &self.host {
            Value::Value(host) if !host.is_empty() => Ok(Some(&**host)),
            Value::Unknown => Err(ConfigError::UnknownHost),
            _ => Ok(None),
        }
    }
}
