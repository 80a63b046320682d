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

use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;

use super::error::PersistError;
use super::model::{AccountDto, FileDto, FundDto};
use crate::model::{Account, Fund, FundGroup};

/// Serializes `accounts`/`root` and rewrites the whole file at `path`
/// atomically: the new contents are written to a temp file in the same
/// directory, then renamed over the target, so a crash mid-write never
/// leaves a truncated file behind.
pub fn save(path: &Path, accounts: &IndexMap<String, Account>, root: &FundGroup) -> Result<(), PersistError> {
    let dto = FileDto {
        accounts: accounts.values().map(|a| AccountDto { key: a.key.clone(), name: a.name.clone() }).collect(),
        funds: root.clone().unwrap_forest().into_iter().map(fund_group_to_dto).collect(),
    };

    let text = serde_yaml::to_string(&dto)?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

fn fund_group_to_dto(group: FundGroup) -> FundDto {
    FundDto::Group {
        key: group.key,
        name: group.name,
        monthly_factor: group.monthly_factor,
        funds: group.funds.into_values().map(fund_to_dto).collect(),
    }
}

fn fund_to_dto(fund: Fund) -> FundDto {
    match fund {
        Fund::Fixed(f) => FundDto::Fixed {
            key: f.key,
            name: f.name,
            account: f.account,
            balance: f.balance,
            target: f.target,
            target_date: f.target_date,
        },
        Fund::Open(f) => {
            FundDto::Open { key: f.key, name: f.name, account: f.account, balance: f.balance, target: f.target, days: f.days }
        }
        Fund::Manual(f) => FundDto::Manual { key: f.key, name: f.name, account: f.account, balance: f.balance },
        Fund::Group(g) => fund_group_to_dto(g),
    }
}
