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

use indexmap::{IndexMap, IndexSet};

use crate::error::{CoreError, CoreResult};

/// A real-world container of money at an institution.
///
/// Holds its leaf funds *by key* rather than by owning reference: the fund
/// tree is the sole owner of fund data, and an account resolves its funds
/// through the tree's own key lookup. This is how the cyclic fund-tree /
/// account relationship is broken in a borrow-checked language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub key: String,
    pub name: String,
    pub funds: IndexSet<String>,
}

impl Account {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Account { key: key.into(), name: name.into(), funds: IndexSet::new() }
    }
}

/// Removes the account keyed `key`, refusing if it still owns any funds.
/// Kept here rather than left to the CLI layer, for the same reason
/// [`super::FundGroup::remove_fund_by_key`] enforces the non-empty-group
/// invariant inside the core: the "don't orphan a leaf fund's account
/// reference" rule belongs to the model, not to any one caller.
pub fn remove_account(accounts: &mut IndexMap<String, Account>, key: &str) -> CoreResult<()> {
    let account = accounts.get(key).ok_or_else(|| CoreError::AccountNotFound(key.to_owned()))?;
    if !account.funds.is_empty() {
        return Err(CoreError::NonEmptyAccountRemoval(key.to_owned()));
    }
    accounts.shift_remove(key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_remove_an_account_that_still_owns_funds() {
        let mut accounts = IndexMap::new();
        let mut account = Account::new("acct", "Account");
        account.funds.insert("leaf".into());
        accounts.insert("acct".into(), account);

        assert!(remove_account(&mut accounts, "acct").is_err());

        accounts.get_mut("acct").unwrap().funds.shift_remove("leaf");
        assert!(remove_account(&mut accounts, "acct").is_ok());
        assert!(!accounts.contains_key("acct"));
    }

    #[test]
    fn removing_an_unknown_account_is_an_error() {
        let mut accounts: IndexMap<String, Account> = IndexMap::new();
        assert!(remove_account(&mut accounts, "missing").is_err());
    }
}
