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

//! On-disk shape of a savings-fund file: two top-level keys, `accounts` and
//! `funds`, the latter a list of fund-group trees.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileDto {
    pub accounts: Vec<AccountDto>,
    pub funds: Vec<FundDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountDto {
    pub key: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FundDto {
    #[serde(rename = "fixed")]
    Fixed {
        key: String,
        name: String,
        account: String,
        balance: Money,
        target: Money,
        target_date: NaiveDate,
    },
    #[serde(rename = "open")]
    Open {
        key: String,
        name: String,
        account: String,
        balance: Money,
        target: Money,
        days: i64,
    },
    #[serde(rename = "manual")]
    Manual { key: String, name: String, account: String, balance: Money },
    #[serde(rename = "group")]
    Group {
        key: String,
        name: String,
        funds: Vec<FundDto>,
        #[serde(rename = "monthly-factor")]
        monthly_factor: Money,
    },
}
