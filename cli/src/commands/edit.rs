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
use savingfunds_core::error::{CoreError, CoreResult};
use savingfunds_core::model::FundGroup;
use savingfunds_core::money::Money;

fn find_mut<'a>(root: &'a mut FundGroup, key: &str) -> CoreResult<&'a mut savingfunds_core::model::Fund> {
    root.get_fund_by_key_mut(key).ok_or_else(|| CoreError::FundNotFound(key.to_owned()))
}

pub fn set_balance(root: &mut FundGroup, key: &str, amount: &str) -> CoreResult<()> {
    let parsed = Money::parse(amount)?;
    if !parsed.is_positive() {
        return Err(CoreError::NonPositive { what: "balance" });
    }
    let fund = find_mut(root, key)?;
    let balance = fund.balance_mut().ok_or_else(|| CoreError::WrongVariant {
        key: key.to_owned(),
        reason: "groups have no balance of their own",
    })?;
    *balance = parsed;
    Ok(())
}

pub fn change_target(root: &mut FundGroup, key: &str, amount: &str) -> CoreResult<()> {
    let parsed = Money::parse(amount)?;
    if !parsed.is_positive() {
        return Err(CoreError::NonPositive { what: "target" });
    }
    let fund = find_mut(root, key)?;
    let target = fund
        .target_mut()
        .ok_or_else(|| CoreError::WrongVariant { key: key.to_owned(), reason: "only fixed- and open-end funds have an editable target" })?;
    *target = parsed;
    Ok(())
}

pub fn change_target_date(root: &mut FundGroup, key: &str, date: NaiveDate) -> CoreResult<()> {
    let fund = find_mut(root, key)?;
    let target_date = fund
        .target_date_mut()
        .ok_or_else(|| CoreError::WrongVariant { key: key.to_owned(), reason: "only fixed-end funds have a target date" })?;
    *target_date = date;
    Ok(())
}

pub fn change_saving_days(root: &mut FundGroup, key: &str, days: i64) -> CoreResult<()> {
    if days <= 0 {
        return Err(CoreError::NonPositive { what: "saving window (days)" });
    }
    let fund = find_mut(root, key)?;
    let days_field = fund
        .days_mut()
        .ok_or_else(|| CoreError::WrongVariant { key: key.to_owned(), reason: "only open-end funds have a saving window" })?;
    *days_field = days;
    Ok(())
}

pub fn change_name(root: &mut FundGroup, key: &str, name: String) -> CoreResult<()> {
    let fund = find_mut(root, key)?;
    *fund.name_mut() = name;
    Ok(())
}

pub fn change_monthly_factor(root: &mut FundGroup, key: &str, factor: &str) -> CoreResult<()> {
    let parsed = Money::parse(factor)?;
    let fund = find_mut(root, key)?;
    let monthly_factor = fund
        .monthly_factor_mut()
        .ok_or_else(|| CoreError::WrongVariant { key: key.to_owned(), reason: "only fund groups have a monthly upfactor" })?;
    *monthly_factor = parsed;
    Ok(())
}

pub fn deposit(root: &mut FundGroup, key: &str, amount: &str) -> CoreResult<()> {
    let parsed = Money::parse(amount)?;
    if !parsed.is_positive() {
        return Err(CoreError::NonPositive { what: "deposit amount" });
    }
    let fund = find_mut(root, key)?;
    let balance = fund
        .balance_mut()
        .ok_or_else(|| CoreError::WrongVariant { key: key.to_owned(), reason: "groups have no balance of their own" })?;
    *balance = balance.clone() + parsed;
    Ok(())
}

pub fn withdraw(root: &mut FundGroup, key: &str, amount: &str) -> CoreResult<()> {
    let parsed = Money::parse(amount)?;
    if !parsed.is_positive() {
        return Err(CoreError::NonPositive { what: "withdrawal amount" });
    }
    let fund = find_mut(root, key)?;
    let balance = fund
        .balance_mut()
        .ok_or_else(|| CoreError::WrongVariant { key: key.to_owned(), reason: "groups have no balance of their own" })?;
    if parsed > *balance {
        return Err(CoreError::Overdraw { amount: parsed.to_fixed(2), balance: balance.to_fixed(2) });
    }
    *balance = balance.clone() - parsed;
    Ok(())
}
