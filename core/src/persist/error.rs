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

use crate::error::CoreError;

/// Errors from reading, parsing, validating, or writing a savings-fund file.
/// Kept distinct from [`CoreError`]: the core's own operations never touch a
/// filesystem, so its error taxonomy has no room for I/O or format failures.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not read or write the savings-fund file: {0}")]
    Io(#[from] std::io::Error),

    #[error("the savings-fund file is not valid: {0}")]
    Format(#[from] serde_yaml::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("could not finish writing the savings-fund file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
