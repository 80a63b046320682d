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

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use savingfunds_core::error::{CoreError, CoreResult};
use savingfunds_core::model::{Account, FundGroup};
use savingfunds_core::money::Money;

use crate::reporting::print_allocation_map;

fn today_or(when: Option<NaiveDate>) -> NaiveDate {
    when.unwrap_or_else(|| Local::now().date_naive())
}

pub fn distribute_extra(root: &mut FundGroup, when: Option<NaiveDate>, amount: &str) -> CoreResult<()> {
    let amount = Money::parse(amount)?;
    if !amount.is_positive() {
        return Err(CoreError::NonPositive { what: "amount to distribute" });
    }
    let (allocations, remainder) = savingfunds_core::distribute::distribute_extra(root, today_or(when), amount);
    print_allocation_map(&allocations);
    println!("remainder: {remainder}");
    Ok(())
}

pub fn distribute_interest(
    accounts: &IndexMap<String, Account>,
    root: &mut FundGroup,
    when: Option<NaiveDate>,
    account_key: &str,
    amount: &str,
) -> CoreResult<()> {
    let amount = Money::parse(amount)?;
    if !amount.is_positive() {
        return Err(CoreError::NonPositive { what: "amount to distribute" });
    }
    let account = accounts.get(account_key).ok_or_else(|| CoreError::AccountNotFound(account_key.to_owned()))?;
    let (allocations, remainder) = savingfunds_core::distribute::distribute_interest(account, root, today_or(when), amount)?;
    print_allocation_map(&allocations);
    println!("remainder: {remainder}");
    Ok(())
}

pub fn distribute_monthly(root: &mut FundGroup, year: i32, month: u32, amount: &str) -> CoreResult<()> {
    let amount = Money::parse(amount)?;
    if !amount.is_positive() {
        return Err(CoreError::NonPositive { what: "amount to distribute" });
    }
    let (allocations, remainder, deficit) = savingfunds_core::distribute::distribute_monthly_toplevel(root, year, month, amount);
    print_allocation_map(&allocations);
    println!("deficit: {deficit}");
    println!("remainder: {remainder}");
    Ok(())
}
