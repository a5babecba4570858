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

use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{schema::Schema, AttributePath, Diagnostics, Resource};

use crate::client::SharedClient;
use crate::utils::{WithNormalize, WithSchema, WithValidate};

use super::configured_client;
use super::state::{now, ResourceState};

/// `clearscape_environment` resource
#[derive(Debug, Default, Clone)]
pub struct EnvironmentResource {
    client: SharedClient,
}

impl EnvironmentResource {
    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for EnvironmentResource {
    type State<'a> = ResourceState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ResourceState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, Default::default()).await;

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags)?;

        info!(name = state.name.as_str(), "Reading ClearScape environment");
        let env = match client.get_environment(state.name.as_str()).await {
            Ok(env) => env,
            Err(err) => {
                let summary = if err.status() == Some(404) {
                    format!("Environment `{}` not found", state.name.as_str())
                } else {
                    format!("Failed to read environment `{}`", state.name.as_str())
                };
                diags.error(summary, err.to_string(), AttributePath::new("name"));
                return None;
            }
        };

        let mut state = state;
        state.refresh(env);

        Some((state, private_state))
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        state.forget_computed();
        state.normalize(diags);

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<tf_provider::AttributePath>,
    )> {
        let mut state = proposed_state;

        let mut trigger_replace = Vec::new();
        if state.name != prior_state.name {
            trigger_replace.push(AttributePath::new("name"));
        }
        if state.region != prior_state.region {
            trigger_replace.push(AttributePath::new("region"));
        }
        // Imported environments have no password yet
        if !prior_state.password.is_null() && state.password != prior_state.password {
            trigger_replace.push(AttributePath::new("password"));
        }

        if trigger_replace.is_empty() && operation_changed(&prior_state, &state) {
            state.forget_computed();
        } else {
            state.settle(&prior_state);
        }

        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags)?;

        let env = match client
            .create_environment(
                planned_state.name.as_str(),
                planned_state.region.as_str(),
                planned_state.password.as_str(),
            )
            .await
        {
            Ok(env) => env,
            Err(err) => {
                diags.root_error("Failed to create environment", err.to_string());
                return None;
            }
        };

        let mut state = planned_state;
        state.refresh(env);
        state.last_updated = now();

        info!(
            name = state.name.as_str(),
            state = state.state.as_str(),
            "Created ClearScape environment"
        );

        Some((state, private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        if !operation_changed(&prior_state, &planned_state) {
            // Only attributes local to the state changed
            let mut state = planned_state;
            state.settle(&prior_state);
            return Some((state, private_state));
        }
        let operation = planned_state.operation.as_str().to_owned();

        let client = configured_client(&self.client, diags)?;

        let name = prior_state.name.as_str();
        let env = match client.update_environment(name, &operation).await {
            Ok(env) => env,
            Err(err) => {
                diags.error(
                    format!("Failed to update environment `{name}`"),
                    err.to_string(),
                    AttributePath::new("operation"),
                );
                return None;
            }
        };

        let mut state = planned_state;
        state.refresh(env);
        state.last_updated = now();

        Some((state, private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let client = configured_client(&self.client, diags)?;

        let name = state.name.as_str();
        if let Err(err) = client.delete_environment(name).await {
            diags.root_error(
                format!("Failed to delete ClearScape environment `{name}`"),
                err.to_string(),
            );
            return None;
        }
        info!(name, "Deleted ClearScape environment");

        Some(())
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = configured_client(&self.client, diags)?;

        let env = match client.get_environment(&id).await {
            Ok(env) => env,
            Err(err) => {
                diags.root_error(
                    format!("Failed to import environment `{id}`"),
                    err.to_string(),
                );
                return None;
            }
        };

        let mut state = ResourceState::default();
        state.refresh(env);
        state.last_updated = now();

        Some((state, Default::default()))
    }
}

/// Whether moving from `prior` to `planned` submits the configured operation to the API
///
/// Removing the operation, or setting it back to its previous value, does not call the API.
fn operation_changed<'a>(prior: &ResourceState<'a>, planned: &ResourceState<'a>) -> bool {
    match &planned.operation {
        Value::Value(operation) => !operation.is_empty() && planned.operation != prior.operation,
        Value::Unknown => true,
        Value::Null => false,
    }
}
