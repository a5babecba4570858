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

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info};

use tf_provider::schema::Schema;
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{map, AttributePath, Diagnostics, DynamicDataSource, DynamicResource, Provider};

use crate::{
    client::{ApiClient, SharedClient},
    config::{ProviderConfig, TOKEN_ENV_VAR},
    environment::{EnvironmentResource, EnvironmentsDataSource},
};

#[derive(Debug, Default, Clone)]
pub struct ClearscapeProvider {
    client: SharedClient,
}

#[async_trait]
impl Provider for ClearscapeProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: ProviderConfig::block(),
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        if let Value::Value(host) = &config.host {
            if let Err(err) = ApiClient::new(Some(&**host), "") {
                diags.error(
                    "Invalid ClearScape API Host",
                    err.to_string(),
                    AttributePath::new("host"),
                );
                return None;
            }
        }
        Some(())
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        info!(terraform_version, "Configuring ClearScape client");

        let resolved = config
            .resolve_token(std::env::var(TOKEN_ENV_VAR).ok())
            .and_then(|token| Ok((token, config.resolve_host()?)));
        let (token, host) = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                diags.error(err.summary(), err.to_string(), err.attribute());
                return None;
            }
        };

        match ApiClient::new(host, token) {
            Ok(client) => {
                debug!(host = client.base_url().as_str(), "Created ClearScape client");
                self.client.set(client);
            }
            Err(err) => {
                diags.error(
                    "Failed to create ClearScape API client",
                    err.to_string(),
                    AttributePath::new("host"),
                );
                return None;
            }
        }

        info!("Configured ClearScape client");
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        Some(map! {
            "environment" => EnvironmentResource::new(self.client.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        Some(map! {
            "environments" => EnvironmentsDataSource::new(self.client.clone()),
        })
    }
}
