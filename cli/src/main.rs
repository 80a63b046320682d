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

mod commands;
mod reporting;
mod settings;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use savingfunds_core::model::{Account, FundGroup};
use savingfunds_core::persist;

use commands::State;
use settings::{CliArgs, Command};

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    std::process::exit(match run_cli() {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            1
        }
    });
}

fn run_cli() -> Result<()> {
    let args = CliArgs::parse();

    if let Command::Init { account_key, account_name, group_key, group_name } = args.command.clone() {
        return init(&args, account_key, account_name, group_key, group_name);
    }

    if !args.file.exists() {
        bail!("no savings-fund file at {}; run `savingfunds init` first", args.file.display());
    }

    let (accounts, root) = persist::load(&args.file).with_context(|| format!("loading {}", args.file.display()))?;
    let mut state = State { accounts, root };

    let mutated = commands::dispatch(&args, &mut state)?;

    if mutated && !args.dry_run {
        persist::save(&args.file, &state.accounts, &state.root).with_context(|| format!("saving {}", args.file.display()))?;
    }

    Ok(())
}

/// `init` bootstraps a brand-new file from scratch: one account and one
/// top-level fund group, discarding whatever (if anything) was there before.
fn init(args: &CliArgs, account_key: String, account_name: String, group_key: String, group_name: String) -> Result<()> {
    let mut accounts: IndexMap<String, Account> = IndexMap::new();
    accounts.insert(account_key.clone(), Account::new(account_key, account_name));

    let group = FundGroup::new(group_key, group_name);
    let root = FundGroup::wrap_forest(vec![group]);

    if !args.dry_run {
        persist::save(&args.file, &accounts, &root).with_context(|| format!("saving {}", args.file.display()))?;
    }

    println!("initialized {}", args.file.display());
    Ok(())
}
