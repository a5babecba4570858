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

use tf_provider::value::Value;
use tf_provider::{AttributePath, Diagnostics};

use crate::utils::WithValidate;

use super::state::ResourceState;

#[async_trait]
impl<'a> WithValidate for ResourceState<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Value::Value(name) = &self.name {
            if name.is_empty() {
                diags.error_short(
                    "`name` should not be empty",
                    attr_path.clone().attribute("name"),
                );
            } else if name.contains('/') {
                diags.error(
                    "`name` should not contain `/`",
                    format!("The environment name `{name}` is used in API paths and cannot contain `/`."),
                    attr_path.clone().attribute("name"),
                );
            }
        }
        if let Value::Value(region) = &self.region {
            if region.is_empty() {
                diags.error_short(
                    "`region` should not be empty",
                    attr_path.clone().attribute("region"),
                );
            }
        }
        if let Value::Value(operation) = &self.operation {
            if operation.is_empty() {
                diags.error_short(
                    "`operation` should not be empty, remove it instead",
                    attr_path.attribute("operation"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    async fn validate(state: ResourceState<'_>) -> Diagnostics {
        let mut diags = Diagnostics::default();
        state.validate(&mut diags, AttributePath::default()).await;
        diags
    }

    #[tokio::test]
    async fn valid_config_has_no_errors() {
        let diags = validate(ResourceState {
            name: Value::Value(Cow::Borrowed("env1")),
            region: Value::Value(Cow::Borrowed("us-east")),
            password: Value::Value(Cow::Borrowed("p")),
            ..Default::default()
        })
        .await;
        assert!(diags.errors.is_empty());
    }

    #[tokio::test]
    async fn unknown_values_are_not_checked() {
        let diags = validate(ResourceState {
            name: Value::Unknown,
            region: Value::Unknown,
            ..Default::default()
        })
        .await;
        assert!(diags.errors.is_empty());
    }

    #[tokio::test]
    async fn empty_values_are_rejected() {
        let diags = validate(ResourceState {
            name: Value::Value(Cow::Borrowed("")),
            region: Value::Value(Cow::Borrowed("")),
            operation: Value::Value(Cow::Borrowed("")),
            ..Default::default()
        })
        .await;
        assert_eq!(diags.errors.len(), 3);
    }

    #[tokio::test]
    async fn name_cannot_contain_slash() {
        let diags = validate(ResourceState {
            name: Value::Value(Cow::Borrowed("a/b")),
            ..Default::default()
        })
        .await;
        assert_eq!(diags.errors.len(), 1);
    }
}
