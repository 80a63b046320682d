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

use assert_cmd::Command;
use predicates::str::contains;

fn cmd(file: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("savingfunds").unwrap();
    cmd.arg("--file").arg(file);
    cmd
}

#[test]
fn init_creates_a_file_with_one_account_and_one_group() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("funds.yaml");

    cmd(&file).args(["init", "checking", "Checking", "main", "Main"]).assert().success();

    assert!(file.exists());
    cmd(&file).arg("list-accounts").assert().success().stdout(contains("checking"));
    cmd(&file).arg("list-funds").assert().success().stdout(contains("main"));
}

#[test]
fn commands_before_init_fail_with_a_helpful_message() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("funds.yaml");

    cmd(&file).arg("list-accounts").assert().failure().stderr(contains("run `savingfunds init`"));
}

#[test]
fn new_fund_and_distribute_extra_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("funds.yaml");

    cmd(&file).args(["init", "checking", "Checking", "main", "Main"]).assert().success();
    cmd(&file)
        .args(["new-open-end-fund", "main", "emergency", "Emergency", "checking", "300.00", "30"])
        .assert()
        .success();

    cmd(&file).args(["distribute-extra", "30.00"]).assert().success().stdout(contains("emergency: 30.00"));

    cmd(&file).arg("fund-details").arg("emergency").assert().success().stdout(contains("balance: 30.00"));
}

#[test]
fn dry_run_does_not_persist_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("funds.yaml");

    cmd(&file).args(["init", "checking", "Checking", "main", "Main"]).assert().success();
    cmd(&file)
        .args(["new-open-end-fund", "main", "emergency", "Emergency", "checking", "300.00", "30"])
        .assert()
        .success();

    cmd(&file).arg("--dry-run").args(["deposit", "emergency", "50.00"]).assert().success();

    cmd(&file).arg("fund-details").arg("emergency").assert().success().stdout(contains("balance: 0.00"));
}

#[test]
fn removing_a_nonempty_group_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("funds.yaml");

    cmd(&file).args(["init", "checking", "Checking", "main", "Main"]).assert().success();
    cmd(&file)
        .args(["new-open-end-fund", "main", "emergency", "Emergency", "checking", "300.00", "30"])
        .assert()
        .success();

    cmd(&file).args(["remove-fund", "main"]).assert().failure();
}
