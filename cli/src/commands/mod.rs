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

mod delete;
mod distribute;
mod edit;
mod new;
mod reporting;

use anyhow::Result;
use indexmap::IndexMap;
use savingfunds_core::model::{Account, FundGroup};

use crate::settings::{CliArgs, Command};

/// State produced by `init` and threaded through every other command.
pub struct State {
    pub accounts: IndexMap<String, Account>,
    pub root: FundGroup,
}

/// Executes one command against `state`. Returns `true` if the model was
/// mutated and should be persisted (subject to `--dry-run`).
pub fn dispatch(args: &CliArgs, state: &mut State) -> Result<bool> {
    match args.command.clone() {
        Command::Init { .. } => unreachable!("init is handled before a file is loaded"),

        Command::NewAccount { key, name } => {
            new::new_account(&mut state.accounts, key, name)?;
            Ok(true)
        }
        Command::NewFundGroup { parent, key, name } => {
            new::new_fund_group(&mut state.root, parent, key, name)?;
            Ok(true)
        }
        Command::NewFixedEndFund { parent, key, name, account_key, target, target_date } => {
            new::new_fixed_end_fund(&mut state.root, &mut state.accounts, parent, key, name, account_key, target, target_date)?;
            Ok(true)
        }
        Command::NewOpenEndFund { parent, key, name, account_key, target, days } => {
            new::new_open_end_fund(&mut state.root, &mut state.accounts, parent, key, name, account_key, target, days)?;
            Ok(true)
        }
        Command::NewManualFund { parent, key, name, account_key } => {
            new::new_manual_fund(&mut state.root, &mut state.accounts, parent, key, name, account_key)?;
            Ok(true)
        }

        Command::SetBalance { key, amount } => {
            edit::set_balance(&mut state.root, &key, &amount)?;
            Ok(true)
        }
        Command::ChangeTarget { key, amount } => {
            edit::change_target(&mut state.root, &key, &amount)?;
            Ok(true)
        }
        Command::ChangeTargetDate { key, date } => {
            edit::change_target_date(&mut state.root, &key, date)?;
            Ok(true)
        }
        Command::ChangeSavingDays { key, days } => {
            edit::change_saving_days(&mut state.root, &key, days)?;
            Ok(true)
        }
        Command::ChangeName { key, name } => {
            edit::change_name(&mut state.root, &key, name)?;
            Ok(true)
        }
        Command::ChangeMonthlyFactor { key, factor } => {
            edit::change_monthly_factor(&mut state.root, &key, &factor)?;
            Ok(true)
        }
        Command::Deposit { key, amount } => {
            edit::deposit(&mut state.root, &key, &amount)?;
            Ok(true)
        }
        Command::Withdraw { key, amount } => {
            edit::withdraw(&mut state.root, &key, &amount)?;
            Ok(true)
        }

        Command::RemoveFund { key } => {
            delete::remove_fund(&mut state.root, &mut state.accounts, &key)?;
            Ok(true)
        }
        Command::RemoveAccount { key } => {
            delete::remove_account(&mut state.accounts, &key)?;
            Ok(true)
        }

        Command::ListAccounts => {
            reporting::list_accounts(&state.accounts);
            Ok(false)
        }
        Command::ListFunds => {
            reporting::list_funds(&state.root);
            Ok(false)
        }
        Command::FundsTable => {
            reporting::funds_table(&state.root);
            Ok(false)
        }
        Command::FundDetails { key } => {
            reporting::fund_details(&state.root, &key)?;
            Ok(false)
        }
        Command::AccountDetails { key } => {
            reporting::account_details(&state.accounts, &state.root, &key)?;
            Ok(false)
        }
        Command::TotalDailySavingRate { when } => {
            reporting::total_daily_saving_rate(&state.root, when);
            Ok(false)
        }
        Command::MonthlyAmount { year, month } => {
            reporting::monthly_amount(&state.root, year, month)?;
            Ok(false)
        }

        Command::DistributeExtra { when, amount } => {
            distribute::distribute_extra(&mut state.root, when, &amount)?;
            Ok(true)
        }
        Command::DistributeInterest { when, account_key, amount } => {
            distribute::distribute_interest(&state.accounts, &mut state.root, when, &account_key, &amount)?;
            Ok(true)
        }
        Command::DistributeMonthly { year, month, amount } => {
            distribute::distribute_monthly(&mut state.root, year, month, &amount)?;
            Ok(true)
        }
    }
}
