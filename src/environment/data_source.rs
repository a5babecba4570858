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

use async_trait::async_trait;
use tracing::info;

use tf_provider::schema::Schema;
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{DataSource, Diagnostics};

use crate::client::SharedClient;
use crate::utils::WithSchema;

use super::configured_client;
use super::state::DataSourceState;

/// `clearscape_environments` data source
#[derive(Debug, Default, Clone)]
pub struct EnvironmentsDataSource {
    client: SharedClient,
}

impl EnvironmentsDataSource {
    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for EnvironmentsDataSource {
    type State<'a> = DataSourceState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(DataSourceState::schema())
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::State<'a>) -> Option<()> {
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        _config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = configured_client(&self.client, diags)?;

        let environments = match client.list_environments().await {
            Ok(environments) => environments,
            Err(err) => {
                diags.root_error("Failed to get environments", err.to_string());
                return None;
            }
        };
        info!(count = environments.len(), "Listed ClearScape environments");

        Some(DataSourceState {
            environments: Value::Value(
                environments
                    .into_iter()
                    .map(|env| Value::Value(env.into()))
                    .collect(),
            ),
        })
    }
}
