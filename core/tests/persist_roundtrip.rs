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

use chrono::NaiveDate;
use indexmap::IndexMap;
use savingfunds_core::model::{Account, FixedEndFund, Fund, FundGroup, ManualFund, OpenEndFund};
use savingfunds_core::money::Money;
use savingfunds_core::persist::{load, save};

fn m(s: &str) -> Money {
    Money::parse(s).unwrap()
}

#[test]
fn load_after_save_reproduces_balances_targets_and_shape() {
    let mut accounts: IndexMap<String, Account> = IndexMap::new();
    for key in ["checking", "savings", "brokerage"] {
        accounts.insert(key.into(), Account::new(key, key));
    }

    let mut group = FundGroup::new("main", "Main");
    group.funds.insert(
        "fixed1".into(),
        Fund::Fixed(FixedEndFund {
            key: "fixed1".into(),
            name: "Vacation".into(),
            account: "checking".into(),
            balance: m("120.00"),
            target: m("2000.00"),
            target_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        }),
    );
    group.funds.insert(
        "open1".into(),
        Fund::Open(OpenEndFund {
            key: "open1".into(),
            name: "Emergency".into(),
            account: "savings".into(),
            balance: m("500.00"),
            target: m("1000.00"),
            days: 60,
        }),
    );
    group.funds.insert(
        "manual1".into(),
        Fund::Manual(ManualFund {
            key: "manual1".into(),
            name: "Dividends".into(),
            account: "brokerage".into(),
            balance: m("75.00"),
        }),
    );
    accounts.get_mut("checking").unwrap().funds.insert("fixed1".into());
    accounts.get_mut("savings").unwrap().funds.insert("open1".into());
    accounts.get_mut("brokerage").unwrap().funds.insert("manual1".into());

    let root = FundGroup::wrap_forest(vec![group]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("funds.yaml");
    save(&path, &accounts, &root).unwrap();

    let (loaded_accounts, loaded_root) = load(&path).unwrap();

    assert_eq!(loaded_accounts.keys().collect::<Vec<_>>(), accounts.keys().collect::<Vec<_>>());

    let original_groups = root.clone().unwrap_forest();
    let loaded_groups = loaded_root.unwrap_forest();
    assert_eq!(original_groups.len(), loaded_groups.len());
    assert_eq!(original_groups[0].key, loaded_groups[0].key);
    assert_eq!(original_groups[0].balance(), loaded_groups[0].balance());
    assert_eq!(original_groups[0].target(), loaded_groups[0].target());

    for key in ["fixed1", "open1", "manual1"] {
        let before = original_groups[0].get_fund_by_key(key).unwrap();
        let after = loaded_groups[0].get_fund_by_key(key).unwrap();
        assert_eq!(before.balance(), after.balance());
        assert_eq!(before.target(), after.target());
        assert_eq!(before.account_key(), after.account_key());
    }
}
