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

use std::sync::{Arc, PoisonError, RwLock};

use super::ApiClient;

/// Slot through which the provider hands its configured client to resources and data sources
///
/// Resources are registered before the provider is configured, so they hold a
/// clone of this handle and look the client up when they run.
#[derive(Debug, Default, Clone)]
pub struct SharedClient(Arc<RwLock<Option<Arc<ApiClient>>>>);

impl SharedClient {
    pub fn set(&self, client: ApiClient) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(client));
    }

    /// `None` until the provider has been configured
    pub fn get(&self) -> Option<Arc<ApiClient>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg(test)]
impl From<ApiClient> for SharedClient {
    fn from(client: ApiClient) -> Self {
        let shared = Self::default();
        shared.set(client);
        shared
    }
}
