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

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;

use super::error::PersistError;
use super::model::{AccountDto, FundDto};
use crate::error::CoreError;
use crate::model::{Account, Fund, FixedEndFund, FundGroup, ManualFund, OpenEndFund};

/// Reads and parses the file at `path` into an account map and a synthetic
/// root fund group (see [`FundGroup::wrap_forest`]).
pub fn load(path: &Path) -> Result<(IndexMap<String, Account>, FundGroup), PersistError> {
    let text = std::fs::read_to_string(path)?;
    let dto: super::model::FileDto = serde_yaml::from_str(&text)?;

    let mut accounts: IndexMap<String, Account> = IndexMap::with_capacity(dto.accounts.len());
    for AccountDto { key, name } in dto.accounts {
        if accounts.contains_key(&key) {
            return Err(PersistError::Core(CoreError::DuplicateAccountKey(key)));
        }
        accounts.insert(key.clone(), Account::new(key, name));
    }

    // Tracks every fund/group key seen anywhere in the tree so far: keys
    // must be unique across the whole forest, not just among siblings.
    let mut seen = HashSet::with_capacity(dto.funds.len());
    let mut top_level = Vec::with_capacity(dto.funds.len());
    for fund_dto in dto.funds {
        match convert_fund(fund_dto, &mut accounts, &mut seen)? {
            Fund::Group(group) => top_level.push(group),
            other => {
                return Err(PersistError::Core(CoreError::WrongVariant {
                    key: other.key().to_owned(),
                    reason: "top-level funds entries must be groups",
                }))
            }
        }
    }

    Ok((accounts, FundGroup::wrap_forest(top_level)))
}

fn convert_fund(dto: FundDto, accounts: &mut IndexMap<String, Account>, seen: &mut HashSet<String>) -> Result<Fund, PersistError> {
    let key = match &dto {
        FundDto::Fixed { key, .. } | FundDto::Open { key, .. } | FundDto::Manual { key, .. } | FundDto::Group { key, .. } => {
            key.clone()
        }
    };
    if !seen.insert(key.clone()) {
        return Err(PersistError::Core(CoreError::DuplicateFundKey(key)));
    }

    match dto {
        FundDto::Fixed { key, name, account, balance, target, target_date } => {
            register_leaf(accounts, &account, &key)?;
            Ok(Fund::Fixed(FixedEndFund { key, name, account, balance, target, target_date }))
        }
        FundDto::Open { key, name, account, balance, target, days } => {
            register_leaf(accounts, &account, &key)?;
            Ok(Fund::Open(OpenEndFund { key, name, account, balance, target, days }))
        }
        FundDto::Manual { key, name, account, balance } => {
            register_leaf(accounts, &account, &key)?;
            Ok(Fund::Manual(ManualFund { key, name, account, balance }))
        }
        FundDto::Group { key, name, funds, monthly_factor } => {
            let mut group = FundGroup::new(key, name);
            group.monthly_factor = monthly_factor;
            for child_dto in funds {
                let child = convert_fund(child_dto, accounts, seen)?;
                group.funds.insert(child.key().to_owned(), child);
            }
            Ok(Fund::Group(group))
        }
    }
}

fn register_leaf(accounts: &mut IndexMap<String, Account>, account_key: &str, fund_key: &str) -> Result<(), PersistError> {
    let account = accounts
        .get_mut(account_key)
        .ok_or_else(|| PersistError::Core(CoreError::AccountNotFound(account_key.to_owned())))?;
    account.funds.insert(fund_key.to_owned());
    Ok(())
}
