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

//! Reading and writing the on-disk savings-fund file: a textual tree format
//! with an `accounts` list and a `funds` forest of fund groups.

mod error;
mod load;
mod model;
mod save;

pub use error::PersistError;
pub use load::load;
pub use model::{AccountDto, FileDto, FundDto};
pub use save::save;
