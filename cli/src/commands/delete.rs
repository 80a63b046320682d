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

use indexmap::IndexMap;
use savingfunds_core::error::{CoreError, CoreResult};
use savingfunds_core::model::{Account, FundGroup};

pub fn remove_fund(root: &mut FundGroup, accounts: &mut IndexMap<String, Account>, key: &str) -> CoreResult<()> {
    if !root.remove_fund_by_key(key)? {
        return Err(CoreError::FundNotFound(key.to_owned()));
    }
    for account in accounts.values_mut() {
        account.funds.shift_remove(key);
    }
    Ok(())
}

pub fn remove_account(accounts: &mut IndexMap<String, Account>, key: &str) -> CoreResult<()> {
    savingfunds_core::model::remove_account(accounts, key)
}
