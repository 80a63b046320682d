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

//! Plain-text reporting: the account list, the fund tree, and the
//! `comfy-table` fund table the `funds-table` command prints.

use chrono::{Local, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Table};
use indexmap::IndexMap;
use savingfunds_core::allocation::Allocation;
use savingfunds_core::error::{CoreError, CoreResult};
use savingfunds_core::model::{month_bounds, Account, Fund, FundGroup};

pub fn list_accounts(accounts: &IndexMap<String, Account>) {
    for account in accounts.values() {
        println!("{} ({}) — {} fund(s)", account.key, account.name, account.funds.len());
    }
}

pub fn list_funds(root: &FundGroup) {
    print_fund_tree(root, 0);
}

fn print_fund_tree(group: &FundGroup, depth: usize) {
    let indent = "  ".repeat(depth);
    for fund in group.funds.values() {
        match fund {
            Fund::Group(g) => {
                println!("{indent}{} ({}) [group]", g.key, g.name);
                print_fund_tree(g, depth + 1);
            }
            other => {
                println!(
                    "{indent}{} ({}) [{}] balance={} target={}",
                    other.key(),
                    other.name(),
                    other.type_name(),
                    other.balance(),
                    other.target(),
                );
            }
        }
    }
}

pub fn funds_table(root: &FundGroup) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["key", "name", "type", "account", "balance", "target"]);
    collect_rows(root, &mut table);
    println!("{table}");
}

fn collect_rows(group: &FundGroup, table: &mut Table) {
    for fund in group.funds.values() {
        match fund {
            Fund::Group(g) => collect_rows(g, table),
            other => {
                table.add_row(vec![
                    other.key().to_owned(),
                    other.name().to_owned(),
                    other.type_name().to_owned(),
                    other.account_key().unwrap_or("").to_owned(),
                    other.balance().to_fixed(2),
                    other.target().to_fixed(2),
                ]);
            }
        }
    }
}

pub fn fund_details(root: &FundGroup, key: &str) -> CoreResult<()> {
    let fund = root.get_fund_by_key(key).ok_or_else(|| CoreError::FundNotFound(key.to_owned()))?;
    println!("key: {}", fund.key());
    println!("name: {}", fund.name());
    println!("type: {}", fund.type_name());
    if let Some(account) = fund.account_key() {
        println!("account: {account}");
    }
    println!("balance: {}", fund.balance());
    println!("target: {}", fund.target());
    println!("remainder to save: {}", fund.remainder_to_save());
    Ok(())
}

pub fn account_details(accounts: &IndexMap<String, Account>, root: &FundGroup, key: &str) -> CoreResult<()> {
    let account = accounts.get(key).ok_or_else(|| CoreError::AccountNotFound(key.to_owned()))?;
    println!("key: {}", account.key);
    println!("name: {}", account.name);
    println!("funds:");
    for fund_key in &account.funds {
        if let Some(fund) = root.get_fund_by_key(fund_key) {
            println!("  {} ({}) balance={}", fund.key(), fund.name(), fund.balance());
        }
    }
    Ok(())
}

pub fn total_daily_saving_rate(root: &FundGroup, when: Option<NaiveDate>) {
    let on_date = when.unwrap_or_else(|| Local::now().date_naive());
    let total: savingfunds_core::money::Money =
        root.funds.values().map(|f| f.daily_saving_rate(on_date)).sum();
    println!("{total}");
}

pub fn monthly_amount(root: &FundGroup, year: i32, month: u32) -> CoreResult<()> {
    let (first, days) = month_bounds(year, month);
    let total: savingfunds_core::money::Money =
        root.funds.values().map(|f| f.ndays_saving(first, days)).sum();
    println!("{total}");
    Ok(())
}

/// Prints a flat allocation map as returned by the `distribute-*` commands,
/// recursing into group children with indentation.
pub fn print_allocation_map(map: &IndexMap<String, Allocation>) {
    print_allocation_map_indented(map, 0);
}

fn print_allocation_map_indented(map: &IndexMap<String, Allocation>, depth: usize) {
    let indent = "  ".repeat(depth);
    for (key, alloc) in map {
        println!("{indent}{key}: {}", alloc.amount());
        if let Some(children) = alloc.children() {
            print_allocation_map_indented(children, depth + 1);
        }
    }
}
