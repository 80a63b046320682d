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

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Clone)]
#[command(name = "savingfunds", about = "Allocate money across a tree of savings funds")]
pub struct CliArgs {
    /// Path to the savings-fund data file.
    #[clap(long, global = true, env = "SAVINGFUNDS_FILE", default_value = "./funds.yaml")]
    pub file: PathBuf,

    /// Compute and print the result without writing the mutated model back.
    #[clap(long, global = true)]
    pub dry_run: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Create a fresh data file with one account and one top-level fund group.
    Init { account_key: String, account_name: String, group_key: String, group_name: String },

    /// Register a new account.
    NewAccount { key: String, name: String },
    /// Create a fund group nested under an existing group.
    NewFundGroup { parent: String, key: String, name: String },
    /// Create a fixed-end fund: must reach `target` by `target_date`.
    NewFixedEndFund {
        parent: String,
        key: String,
        name: String,
        account_key: String,
        target: String,
        target_date: NaiveDate,
    },
    /// Create an open-end fund: fills `target` at `target / days` per day, indefinitely.
    NewOpenEndFund { parent: String, key: String, name: String, account_key: String, target: String, days: i64 },
    /// Create a manual fund: no target, holds yield.
    NewManualFund { parent: String, key: String, name: String, account_key: String },

    /// Overwrite a leaf fund's balance directly.
    SetBalance { key: String, amount: String },
    /// Change a fixed- or open-end fund's target amount.
    ChangeTarget { key: String, amount: String },
    /// Change a fixed-end fund's deadline.
    ChangeTargetDate { key: String, date: NaiveDate },
    /// Change an open-end fund's saving window, in days.
    ChangeSavingDays { key: String, days: i64 },
    /// Rename any fund or group.
    ChangeName { key: String, name: String },
    /// Change a group's upfactor multiplier.
    ChangeMonthlyFactor { key: String, factor: String },

    /// Add money to a leaf fund's balance.
    Deposit { key: String, amount: String },
    /// Remove money from a leaf fund's balance.
    Withdraw { key: String, amount: String },

    /// Remove a fund or an empty group.
    RemoveFund { key: String },
    /// Remove an account that owns no funds.
    RemoveAccount { key: String },

    /// List all accounts.
    ListAccounts,
    /// List all funds as a tree.
    ListFunds,
    /// Print all leaf funds as a table.
    FundsTable,
    /// Print one fund's details.
    FundDetails { key: String },
    /// Print one account's details.
    AccountDetails { key: String },

    /// Print the current total daily saving rate across the whole tree.
    TotalDailySavingRate {
        #[clap(long)]
        when: Option<NaiveDate>,
    },
    /// Print the minimal monthly amount for a given month.
    MonthlyAmount { year: i32, month: u32 },

    /// Distribute a one-off extra amount across the tree.
    DistributeExtra {
        #[clap(long)]
        when: Option<NaiveDate>,
        amount: String,
    },
    /// Distribute interest credited to one account.
    DistributeInterest {
        #[clap(long)]
        when: Option<NaiveDate>,
        account_key: String,
        amount: String,
    },
    /// Distribute a monthly budget across all top-level groups.
    DistributeMonthly { year: i32, month: u32, amount: String },
}
