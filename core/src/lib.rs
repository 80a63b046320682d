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

//! Core allocation engine for a personal savings plan: a tree of funds
//! rooted in fund groups, each leaf fund attached to an account, and the
//! three distribution algorithms that split incoming money across the tree.

pub mod allocation;
pub mod distribute;
pub mod error;
pub mod model;
pub mod money;
pub mod persist;

pub use allocation::Allocation;
pub use error::{CoreError, CoreResult};
pub use model::{Account, Fund, FixedEndFund, FundGroup, ManualFund, OpenEndFund};
pub use money::Money;
