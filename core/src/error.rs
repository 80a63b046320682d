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

//! The error taxonomy surfaced at every command boundary. Each variant maps
//! to exactly one of the kinds this tool's CLI reports with a single-line
//! message and exit code 1.

use crate::money::ParseMoneyError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("'{0}' is not a valid decimal amount")]
    ParseAmount(String),

    #[error("'{0}' is not a valid ISO-8601 date (expected YYYY-MM-DD)")]
    ParseDate(String),

    #[error("{what} must be positive")]
    NonPositive { what: &'static str },

    #[error("there is no fund with key '{0}'")]
    FundNotFound(String),

    #[error("there is no account with key '{0}'")]
    AccountNotFound(String),

    #[error("there already exists a fund with key '{0}'")]
    DuplicateFundKey(String),

    #[error("there already exists an account with key '{0}'")]
    DuplicateAccountKey(String),

    #[error("no fund group with key '{0}' found")]
    GroupNotFound(String),

    #[error("fund '{key}' does not support this operation (wrong variant: {reason})")]
    WrongVariant { key: String, reason: &'static str },

    #[error("the amount ({amount}) is more than the balance ({balance}); you cannot overdraw funds")]
    Overdraw { amount: String, balance: String },

    #[error("fund group '{0}' is not empty")]
    NonEmptyGroupRemoval(String),

    #[error("account '{0}' still has registered funds")]
    NonEmptyAccountRemoval(String),

    #[error("'{0}' is a reserved key and cannot be used for a fund, group, or account")]
    ReservedKey(String),
}

impl From<ParseMoneyError> for CoreError {
    fn from(e: ParseMoneyError) -> Self {
        CoreError::ParseAmount(e.0)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
