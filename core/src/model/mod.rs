// Copyright the savingfunds contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
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
//
// SPDX-License-Identifier: Apache-2.0

mod account;
mod fund;

pub use account::{remove_account, Account};
pub use fund::{
    month_bounds, AddFundOutcome, Fund, FixedEndFund, FundGroup, ManualFund, OpenEndFund,
};

/// The root key reserved for the synthetic wrapper group created by the
/// loader around a persisted file's top-level fund groups. Never present in
/// a persisted file, never addressable by any command.
pub const SYNTHETIC_ROOT_KEY: &str = "";

impl FundGroup {
    /// Wraps a list of top-level groups (the forest stored on disk) into a
    /// single unaddressable root so the rest of the crate can operate on one
    /// `FundGroup` throughout.
    pub fn wrap_forest(top_level: Vec<FundGroup>) -> FundGroup {
        let mut root = FundGroup::new(SYNTHETIC_ROOT_KEY, "");
        for group in top_level {
            root.funds.insert(group.key.clone(), Fund::Group(group));
        }
        root
    }

    /// Reverses [`FundGroup::wrap_forest`]: unwraps the synthetic root back
    /// into the list of top-level groups, preserving insertion order.
    pub fn unwrap_forest(self) -> Vec<FundGroup> {
        debug_assert_eq!(self.key, SYNTHETIC_ROOT_KEY);
        self.funds
            .into_values()
            .filter_map(|f| match f {
                Fund::Group(g) => Some(g),
                _ => None,
            })
            .collect()
    }
}
