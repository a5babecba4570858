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
use tf_provider::{value::Value, Diagnostics};

use crate::utils::WithNormalize;

use super::state::ResourceState;

impl<'a> WithNormalize for ResourceState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.state.is_null() {
            self.state = Value::Unknown;
        }
        if self.ip.is_null() {
            self.ip = Value::Unknown;
        }
        if self.dnsname.is_null() {
            self.dnsname = Value::Unknown;
        }
        if self.owner.is_null() {
            self.owner = Value::Unknown;
        }
        if self.kind.is_null() {
            self.kind = Value::Unknown;
        }
        if self.last_updated.is_null() {
            self.last_updated = Value::Unknown;
        }
        if self.services.is_null() {
            self.services = Value::Unknown;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[test]
    fn null_computed_become_unknown() {
        let mut state = ResourceState {
            name: Value::Value(Cow::Borrowed("env1")),
            ip: Value::Value(Cow::Borrowed("10.1.2.3")),
            ..Default::default()
        };
        state.normalize(&mut Diagnostics::default());

        assert_eq!(state.name.as_str(), "env1");
        assert_eq!(state.ip.as_str(), "10.1.2.3");
        assert!(state.password.is_null());
        assert!(state.operation.is_null());
        assert!(state.state.is_unknown());
        assert!(state.services.is_unknown());
        assert!(state.last_updated.is_unknown());
    }
}
