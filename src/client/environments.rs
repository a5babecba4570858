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

use tracing::info;

use super::models::{Environment, EnvironmentCreateRequest, EnvironmentUpdateRequest};
use super::{ApiClient, ApiResult};

impl ApiClient {
    /// `GET /environments`
    pub async fn list_environments(&self) -> ApiResult<Vec<Environment>> {
        let url = self.url(["environments"])?;
        let body = self.do_request(self.http.get(url)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `POST /environments`
    pub async fn create_environment(
        &self,
        name: &str,
        region: &str,
        password: &str,
    ) -> ApiResult<Environment> {
        info!(name, region, "Creating ClearScape environment");
        let url = self.url(["environments"])?;
        let request = EnvironmentCreateRequest {
            name,
            region,
            password,
        };
        let body = self.do_request(self.http.post(url).json(&request)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `GET /environments/{name}`
    pub async fn get_environment(&self, name: &str) -> ApiResult<Environment> {
        let url = self.url(["environments", name])?;
        let body = self.do_request(self.http.get(url)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `PATCH /environments/{name}`
    ///
    /// `operation` is passed through as is, its meaning is up to the API.
    pub async fn update_environment(&self, name: &str, operation: &str) -> ApiResult<Environment> {
        info!(name, operation, "Updating ClearScape environment");
        let url = self.url(["environments", name])?;
        let request = EnvironmentUpdateRequest { operation };
        let body = self.do_request(self.http.patch(url).json(&request)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `DELETE /environments/{name}`
    pub async fn delete_environment(&self, name: &str) -> ApiResult<()> {
        info!(name, "Deleting ClearScape environment");
        let url = self.url(["environments", name])?;
        self.do_request(self.http.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::client::ApiError;

    const ENV1: &str = r#"{
        "name": "env1",
        "region": "us-east",
        "state": "creating",
        "ip": "10.1.2.3",
        "dnsName": "env1.example.com",
        "owner": "owner@example.com",
        "type": "demo",
        "services": [
            {"name": "jupyter", "url": "https://env1.example.com/jupyter", "credentials": []},
            {
                "name": "vantage",
                "url": "https://env1.example.com:1025",
                "credentials": [
                    {"name": "username", "value": "demo_user"},
                    {"name": "password", "value": "p"}
                ]
            }
        ]
    }"#;

    fn client(server: &mockito::Server) -> ApiClient {
        ApiClient::new(Some(server.url().as_str()), "tok").unwrap()
    }

    #[tokio::test]
    async fn create_posts_json_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/environments")
            .match_header("authorization", "Bearer tok")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(
                json!({"name": "env1", "region": "us-east", "password": "p"}),
            ))
            .with_status(200)
            .with_body(ENV1)
            .create_async()
            .await;

        let env = client(&server)
            .create_environment("env1", "us-east", "p")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(env.name, "env1");
        assert_eq!(env.region, "us-east");
        assert_eq!(env.state, "creating");
        assert_eq!(env.services.len(), 2);
    }

    #[tokio::test]
    async fn list_returns_every_environment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/environments")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(format!(r#"[{ENV1}, {{"name": "env2", "region": "eu-west"}}]"#))
            .create_async()
            .await;

        let envs = client(&server).list_environments().await.unwrap();

        mock.assert_async().await;
        let names: Vec<_> = envs.iter().map(|env| env.name.as_str()).collect();
        assert_eq!(names, ["env1", "env2"]);
    }

    #[tokio::test]
    async fn get_addresses_environment_by_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/environments/env1")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(ENV1)
            .create_async()
            .await;

        let env = client(&server).get_environment("env1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(env.name, "env1");
        assert_eq!(env.services[1].credentials[0].value, "demo_user");
    }

    #[tokio::test]
    async fn update_patches_operation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/environments/env1")
            .match_header("authorization", "Bearer tok")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"operation": "resume"})))
            .with_status(200)
            .with_body(r#"{"name": "env1", "region": "us-east", "state": "running"}"#)
            .create_async()
            .await;

        let env = client(&server)
            .update_environment("env1", "resume")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(env.state, "running");
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/environments/env1")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .create_async()
            .await;

        client(&server).delete_environment("env1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_200_reports_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/environments/missing")
            .with_status(404)
            .with_body("environment missing not found")
            .create_async()
            .await;

        let err = client(&server)
            .get_environment("missing")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        let message = err.to_string();
        assert!(message.contains("404"), "{message}");
        assert!(message.contains("environment missing not found"), "{message}");
    }

    #[tokio::test]
    async fn other_success_codes_are_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/environments")
            .with_status(201)
            .with_body(ENV1)
            .create_async()
            .await;

        let err = client(&server)
            .create_environment("env1", "us-east", "p")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(201));
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/environments")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server).list_environments().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn delete_then_get_fails() {
        let mut server = mockito::Server::new_async().await;
        let _delete = server
            .mock("DELETE", "/environments/env1")
            .with_status(200)
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/environments/env1")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let client = client(&server);
        client.delete_environment("env1").await.unwrap();
        assert!(client.get_environment("env1").await.is_err());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = ApiClient::new(Some("http://127.0.0.1:1"), "tok").unwrap();

        let err = client.list_environments().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }
}
