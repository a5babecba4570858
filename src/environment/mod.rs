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
use std::sync::Arc;

use tf_provider::Diagnostics;

use crate::client::{ApiClient, SharedClient};

mod data_source;
mod normalize;
mod resource;
mod state;
mod validate;

pub use data_source::EnvironmentsDataSource;
pub use resource::EnvironmentResource;

fn configured_client(shared: &SharedClient, diags: &mut Diagnostics) -> Option<Arc<ApiClient>> {
    let client = shared.get();
    if client.is_none() {
        diags.root_error(
            "Provider not configured",
            "The ClearScape API client is not available yet. This is a bug in the provider, please report it.",
        );
    }
    client
}
