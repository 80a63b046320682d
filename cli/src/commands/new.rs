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

use chrono::NaiveDate;
use indexmap::IndexMap;
use savingfunds_core::error::{CoreError, CoreResult};
use savingfunds_core::model::{
    Account, AddFundOutcome, Fund, FixedEndFund, FundGroup, ManualFund, OpenEndFund, SYNTHETIC_ROOT_KEY,
};
use savingfunds_core::money::Money;

/// The synthetic root key is never addressable by any command: it would
/// otherwise let `parent`/`key` arguments silently target (or masquerade as)
/// the unwrapped forest root.
fn reject_reserved_key(key: &str) -> CoreResult<()> {
    if key == SYNTHETIC_ROOT_KEY {
        Err(CoreError::ReservedKey(key.to_owned()))
    } else {
        Ok(())
    }
}

pub fn new_account(accounts: &mut IndexMap<String, Account>, key: String, name: String) -> CoreResult<()> {
    reject_reserved_key(&key)?;
    if accounts.contains_key(&key) {
        return Err(CoreError::DuplicateAccountKey(key));
    }
    accounts.insert(key.clone(), Account::new(key, name));
    Ok(())
}

pub fn new_fund_group(root: &mut FundGroup, parent: String, key: String, name: String) -> CoreResult<()> {
    reject_reserved_key(&parent)?;
    reject_reserved_key(&key)?;
    let group = FundGroup::new(key, name);
    match root.add_fund_to_group(Fund::Group(group), &parent) {
        AddFundOutcome::Added => Ok(()),
        AddFundOutcome::DuplicateKey => Err(CoreError::DuplicateFundKey(parent)),
        AddFundOutcome::GroupNotFound => Err(CoreError::GroupNotFound(parent)),
    }
}

fn register_leaf(accounts: &mut IndexMap<String, Account>, account_key: &str, leaf_key: &str) -> CoreResult<()> {
    let account = accounts.get_mut(account_key).ok_or_else(|| CoreError::AccountNotFound(account_key.to_owned()))?;
    account.funds.insert(leaf_key.to_owned());
    Ok(())
}

pub fn new_fixed_end_fund(
    root: &mut FundGroup,
    accounts: &mut IndexMap<String, Account>,
    parent: String,
    key: String,
    name: String,
    account_key: String,
    target: String,
    target_date: NaiveDate,
) -> CoreResult<()> {
    reject_reserved_key(&parent)?;
    reject_reserved_key(&key)?;
    if !accounts.contains_key(&account_key) {
        return Err(CoreError::AccountNotFound(account_key));
    }
    let target = Money::parse(&target)?;
    if !target.is_positive() {
        return Err(CoreError::NonPositive { what: "target" });
    }
    let fund = Fund::Fixed(FixedEndFund {
        key: key.clone(),
        name,
        account: account_key.clone(),
        balance: Money::zero(),
        target,
        target_date,
    });
    match root.add_fund_to_group(fund, &parent) {
        AddFundOutcome::Added => register_leaf(accounts, &account_key, &key),
        AddFundOutcome::DuplicateKey => Err(CoreError::DuplicateFundKey(key)),
        AddFundOutcome::GroupNotFound => Err(CoreError::GroupNotFound(parent)),
    }
}

pub fn new_open_end_fund(
    root: &mut FundGroup,
    accounts: &mut IndexMap<String, Account>,
    parent: String,
    key: String,
    name: String,
    account_key: String,
    target: String,
    days: i64,
) -> CoreResult<()> {
    reject_reserved_key(&parent)?;
    reject_reserved_key(&key)?;
    if !accounts.contains_key(&account_key) {
        return Err(CoreError::AccountNotFound(account_key));
    }
    let target = Money::parse(&target)?;
    if !target.is_positive() {
        return Err(CoreError::NonPositive { what: "target" });
    }
    if days <= 0 {
        return Err(CoreError::NonPositive { what: "saving window (days)" });
    }
    let fund = Fund::Open(OpenEndFund {
        key: key.clone(),
        name,
        account: account_key.clone(),
        balance: Money::zero(),
        target,
        days,
    });
    match root.add_fund_to_group(fund, &parent) {
        AddFundOutcome::Added => register_leaf(accounts, &account_key, &key),
        AddFundOutcome::DuplicateKey => Err(CoreError::DuplicateFundKey(key)),
        AddFundOutcome::GroupNotFound => Err(CoreError::GroupNotFound(parent)),
    }
}

pub fn new_manual_fund(
    root: &mut FundGroup,
    accounts: &mut IndexMap<String, Account>,
    parent: String,
    key: String,
    name: String,
    account_key: String,
) -> CoreResult<()> {
    reject_reserved_key(&parent)?;
    reject_reserved_key(&key)?;
    if !accounts.contains_key(&account_key) {
        return Err(CoreError::AccountNotFound(account_key));
    }
    let fund = Fund::Manual(ManualFund { key: key.clone(), name, account: account_key.clone(), balance: Money::zero() });
    match root.add_fund_to_group(fund, &parent) {
        AddFundOutcome::Added => register_leaf(accounts, &account_key, &key),
        AddFundOutcome::DuplicateKey => Err(CoreError::DuplicateFundKey(key)),
        AddFundOutcome::GroupNotFound => Err(CoreError::GroupNotFound(parent)),
    }
}
