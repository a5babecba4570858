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

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueList, ValueString};
use tf_provider::map;

use crate::client::{Credential, Environment, Service};
use crate::utils::WithSchema;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialState<'a> {
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub value: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceState<'a> {
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub url: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub credentials: ValueList<Value<CredentialState<'a>>>,
}

/// Environment as listed by the `clearscape_environments` data source
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentState<'a> {
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub region: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub state: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub ip: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub dnsname: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub owner: ValueString<'a>,
    #[serde(borrow = "'a", rename = "type")]
    pub kind: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub services: ValueList<Value<ServiceState<'a>>>,
}

/// State of a `clearscape_environment` resource
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState<'a> {
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub region: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub password: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub operation: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub state: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub ip: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub dnsname: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub owner: ValueString<'a>,
    #[serde(borrow = "'a", rename = "type")]
    pub kind: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub last_updated: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub services: ValueList<Value<ServiceState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceState<'a> {
    #[serde(borrow = "'a")]
    pub environments: ValueList<Value<EnvironmentState<'a>>>,
}

pub(super) fn string<'a>(s: String) -> ValueString<'a> {
    Value::Value(Cow::Owned(s))
}

/// Current time, as stored in `last_updated`
pub(super) fn now<'a>() -> ValueString<'a> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_or(Value::Null, string)
}

impl<'a> From<Credential> for CredentialState<'a> {
    fn from(credential: Credential) -> Self {
        Self {
            name: string(credential.name),
            value: string(credential.value),
        }
    }
}

impl<'a> From<Service> for ServiceState<'a> {
    fn from(service: Service) -> Self {
        Self {
            name: string(service.name),
            url: string(service.url),
            credentials: Value::Value(
                service
                    .credentials
                    .into_iter()
                    .map(|credential| Value::Value(credential.into()))
                    .collect(),
            ),
        }
    }
}

fn services<'a>(services: Vec<Service>) -> ValueList<Value<ServiceState<'a>>> {
    Value::Value(
        services
            .into_iter()
            .map(|service| Value::Value(service.into()))
            .collect(),
    )
}

impl<'a> From<Environment> for EnvironmentState<'a> {
    fn from(env: Environment) -> Self {
        Self {
            name: string(env.name),
            region: string(env.region),
            state: string(env.state),
            ip: string(env.ip),
            dnsname: string(env.dns_name),
            owner: string(env.owner),
            kind: string(env.kind),
            services: services(env.services),
        }
    }
}

impl<'a> ResourceState<'a> {
    /// Overwrite everything the API knows about with `env`
    ///
    /// `password`, `operation` and `last_updated` are not returned by the API and are kept.
    pub fn refresh(&mut self, env: Environment) {
        self.name = string(env.name);
        self.region = string(env.region);
        self.state = string(env.state);
        self.ip = string(env.ip);
        self.dnsname = string(env.dns_name);
        self.owner = string(env.owner);
        self.kind = string(env.kind);
        self.services = services(env.services);
    }

    /// Mark every attribute computed by the API as unknown
    pub fn forget_computed(&mut self) {
        self.state = Value::Unknown;
        self.ip = Value::Unknown;
        self.dnsname = Value::Unknown;
        self.owner = Value::Unknown;
        self.kind = Value::Unknown;
        self.last_updated = Value::Unknown;
        self.services = Value::Unknown;
    }

    /// Replace every unknown computed attribute with its value in `prior`
    pub fn settle(&mut self, prior: &Self) {
        settle(&mut self.state, &prior.state);
        settle(&mut self.ip, &prior.ip);
        settle(&mut self.dnsname, &prior.dnsname);
        settle(&mut self.owner, &prior.owner);
        settle(&mut self.kind, &prior.kind);
        settle(&mut self.last_updated, &prior.last_updated);
        settle(&mut self.services, &prior.services);
    }
}

fn settle<T: Clone>(value: &mut Value<T>, prior: &Value<T>) {
    if value.is_unknown() {
        *value = match prior {
            Value::Unknown => Value::Null,
            prior => prior.clone(),
        };
    }
}

fn attribute(
    attr_type: AttributeType,
    description: &str,
    constraint: AttributeConstraint,
    sensitive: bool,
) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint,
        sensitive,
        deprecated: false,
    }
}

fn computed(description: &str) -> Attribute {
    attribute(
        AttributeType::String,
        description,
        AttributeConstraint::Computed,
        false,
    )
}

/// Attributes the API returns for an environment
fn environment_attributes() -> HashMap<String, Attribute> {
    let credential: HashMap<String, Attribute> = map! {
        "name" => computed("The name of the credential."),
        "value" => attribute(
            AttributeType::String,
            "The value of the credential.",
            AttributeConstraint::Computed,
            true,
        ),
    };
    let service: HashMap<String, Attribute> = map! {
        "name" => computed("The name of the service."),
        "url" => computed("The URL of the service."),
        "credentials" => attribute(
            AttributeType::AttributeList(credential),
            "Credentials to connect to the service.",
            AttributeConstraint::Computed,
            false,
        ),
    };

    map! {
        "name" => computed("The name of the environment."),
        "region" => computed("The region of the environment."),
        "state" => computed("The current state of the environment."),
        "ip" => computed("The IP address of the environment."),
        "dnsname" => computed("The DNS name of the environment."),
        "owner" => computed("The owner of the environment."),
        "type" => computed("The type of the environment."),
        "services" => attribute(
            AttributeType::AttributeList(service),
            "Services exposed by the environment.",
            AttributeConstraint::Computed,
            false,
        ),
    }
}

impl<'a> WithSchema for ResourceState<'a> {
    fn schema() -> Schema {
        let inputs: HashMap<String, Attribute> = map! {
            "name" => attribute(
                AttributeType::String,
                "The name of the environment. Changing it forces a new environment.",
                AttributeConstraint::Required,
                false,
            ),
            "region" => attribute(
                AttributeType::String,
                "The region of the environment. Changing it forces a new environment.",
                AttributeConstraint::Required,
                false,
            ),
            "password" => attribute(
                AttributeType::String,
                "The password for the environment. Changing it forces a new environment.",
                AttributeConstraint::Required,
                true,
            ),
            "operation" => attribute(
                AttributeType::String,
                "Operation submitted to the environment when it changes, e.g. `stop` or `start`. It is not submitted when the environment is created.",
                AttributeConstraint::Optional,
                false,
            ),
            "last_updated" => computed("The last time the environment was created or updated."),
        };
        let mut attributes = environment_attributes();
        attributes.extend(inputs);

        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes,
                description: Description::plain("ClearScape environment"),
                ..Default::default()
            },
        }
    }
}

impl<'a> WithSchema for DataSourceState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "environments" => attribute(
                        AttributeType::AttributeList(environment_attributes()),
                        "Every environment visible with the provider token.",
                        AttributeConstraint::Computed,
                        false,
                    ),
                },
                description: Description::plain("List ClearScape environments"),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment() -> Environment {
        Environment {
            name: "env1".to_owned(),
            region: "us-east".to_owned(),
            state: "running".to_owned(),
            ip: "10.1.2.3".to_owned(),
            dns_name: "env1.example.com".to_owned(),
            owner: "owner@example.com".to_owned(),
            kind: "demo".to_owned(),
            services: vec![
                Service {
                    name: "jupyter".to_owned(),
                    url: "https://env1.example.com/jupyter".to_owned(),
                    credentials: vec![],
                },
                Service {
                    name: "vantage".to_owned(),
                    url: "https://env1.example.com:1025".to_owned(),
                    credentials: vec![
                        Credential {
                            name: "username".to_owned(),
                            value: "demo_user".to_owned(),
                        },
                        Credential {
                            name: "password".to_owned(),
                            value: "p".to_owned(),
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn refresh_maps_every_service_and_credential() {
        let mut state = ResourceState::default();
        state.refresh(environment());

        let services = state.services.as_ref().unwrap();
        assert_eq!(services.len(), 2);

        let vantage = services[1].as_ref().unwrap();
        assert_eq!(vantage.name.as_str(), "vantage");
        let credentials = vantage.credentials.as_ref().unwrap();
        assert_eq!(credentials.len(), 2);
        assert_eq!(credentials[0].as_ref().unwrap().value.as_str(), "demo_user");

        let jupyter = services[0].as_ref().unwrap();
        assert_eq!(jupyter.credentials, Value::Value(vec![]));
    }

    #[test]
    fn refresh_keeps_what_the_api_does_not_return() {
        let mut state = ResourceState {
            password: string("secret".to_owned()),
            operation: string("stop".to_owned()),
            last_updated: string("2024-01-01T00:00:00Z".to_owned()),
            ..Default::default()
        };
        state.refresh(environment());

        assert_eq!(state.name.as_str(), "env1");
        assert_eq!(state.dnsname.as_str(), "env1.example.com");
        assert_eq!(state.kind.as_str(), "demo");
        assert_eq!(state.password.as_str(), "secret");
        assert_eq!(state.operation.as_str(), "stop");
        assert_eq!(state.last_updated.as_str(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn environment_without_services_maps_to_empty_list() {
        let env = Environment {
            name: "env2".to_owned(),
            ..Default::default()
        };
        let state = EnvironmentState::from(env);
        assert_eq!(state.services, Value::Value(vec![]));
    }

    #[test]
    fn forget_computed_keeps_inputs() {
        let mut state = ResourceState::default();
        state.refresh(environment());
        state.forget_computed();

        assert_eq!(state.name.as_str(), "env1");
        assert!(state.state.is_unknown());
        assert!(state.services.is_unknown());
        assert!(state.last_updated.is_unknown());
    }

    #[test]
    fn settle_restores_prior_computed() {
        let mut prior = ResourceState::default();
        prior.refresh(environment());
        prior.last_updated = string("2024-01-01T00:00:00Z".to_owned());

        let mut state = ResourceState {
            password: string("p".to_owned()),
            ..prior.clone()
        };
        state.forget_computed();
        state.settle(&prior);

        assert_eq!(state.state.as_str(), "running");
        assert_eq!(state.last_updated.as_str(), "2024-01-01T00:00:00Z");
        assert_eq!(state.services, prior.services);
        assert_eq!(state.password.as_str(), "p");

        state.last_updated = Value::Unknown;
        state.settle(&ResourceState::default());
        assert!(state.last_updated.is_null());
    }

    #[test]
    fn now_is_rfc3339() {
        let now = now();
        assert!(OffsetDateTime::parse(now.as_str(), &Rfc3339).is_ok());
    }

    #[test]
    fn resource_schema_marks_secrets_sensitive() {
        let schema = ResourceState::schema();
        let attributes = &schema.block.attributes;

        assert!(attributes["password"].sensitive);
        assert!(!attributes["name"].sensitive);
        assert!(matches!(
            attributes["name"].constraint,
            AttributeConstraint::Required
        ));
        assert!(matches!(
            attributes["ip"].constraint,
            AttributeConstraint::Computed
        ));
        assert!(matches!(
            attributes["operation"].constraint,
            AttributeConstraint::Optional
        ));
    }

    #[test]
    fn data_source_schema_lists_environments() {
        let schema = DataSourceState::schema();
        let AttributeType::AttributeList(environment) =
            &schema.block.attributes["environments"].attr_type
        else {
            panic!("`environments` should be a nested list");
        };
        assert!(environment.contains_key("services"));
        assert!(!environment.contains_key("password"));
    }
}
