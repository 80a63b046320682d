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

//! Extra-amount distribution: split a lump sum across a group's children
//! proportionally to daily saving rate, clamped by remaining-to-target.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::allocation::Allocation;
use crate::model::{Fund, FundGroup};
use crate::money::Money;

/// Splits `amount` across the direct and nested children of `group`,
/// applying the allocation to leaf balances as it goes. Returns the
/// per-child breakdown and the unused remainder.
///
/// A child group's own nested shortfall (it couldn't absorb its full
/// share) is *not* surfaced in the returned remainder: it stays folded
/// into that child's reported amount. Only the top-level leftover —
/// money no direct child had any daily saving rate to claim — comes back
/// as `remainder`.
pub fn distribute_extra(
    group: &mut FundGroup,
    on_date: NaiveDate,
    amount: Money,
) -> (IndexMap<String, Allocation>, Money) {
    let keys: Vec<String> = group.funds.keys().cloned().collect();

    let rates: IndexMap<String, Money> = keys
        .iter()
        .map(|k| {
            let rate = group.funds.get(k).expect("key from own map").daily_saving_rate(on_date);
            (k.clone(), rate)
        })
        .collect();
    let total_rate: Money = rates.values().cloned().sum();

    if total_rate.is_zero() {
        let zeros = keys.into_iter().map(|k| (k, Allocation::Leaf(Money::zero()))).collect();
        return (zeros, amount);
    }

    let mut result = IndexMap::with_capacity(keys.len());
    let mut distributed = Money::zero();

    for key in keys {
        let rate = rates.get(&key).expect("computed above").clone();
        let raw = amount.clone() * rate / total_rate.clone();
        let remainder_to_save = group.funds.get(&key).expect("key from own map").remainder_to_save();
        let alloc_amt = Money::min(raw, remainder_to_save);
        distributed = distributed + alloc_amt.clone();

        let fund = group.funds.get_mut(&key).expect("key from own map");
        let entry = if let Fund::Group(g) = fund {
            let (sub_map, _sub_remainder) = distribute_extra(g, on_date, alloc_amt.clone());
            Allocation::Node(alloc_amt, sub_map)
        } else {
            if let Some(balance) = fund.balance_mut() {
                *balance = balance.clone() + alloc_amt.clone();
            }
            Allocation::Leaf(alloc_amt)
        };
        result.insert(key, entry);
    }

    let remainder = amount - distributed;
    (result, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OpenEndFund;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn m(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn open(key: &str, target: &str, days: i64, balance: &str) -> Fund {
        Fund::Open(OpenEndFund {
            key: key.to_owned(),
            name: key.to_owned(),
            account: "acct".to_owned(),
            balance: m(balance),
            target: m(target),
            days,
        })
    }

    #[test]
    fn splits_proportionally_to_daily_saving_rate() {
        let mut g = FundGroup::new("g", "Group");
        g.funds.insert("a".into(), open("a", "300.00", 30, "0.00"));
        g.funds.insert("b".into(), open("b", "600.00", 30, "0.00"));

        let (amounts, remainder) = distribute_extra(&mut g, d("2025-01-01"), m("30.00"));

        assert_eq!(amounts["a"].amount().to_fixed(2), "10.00");
        assert_eq!(amounts["b"].amount().to_fixed(2), "20.00");
        assert_eq!(remainder, Money::zero());
        assert_eq!(g.funds["a"].balance().to_fixed(2), "10.00");
        assert_eq!(g.funds["b"].balance().to_fixed(2), "20.00");
    }

    #[test]
    fn clamps_by_remainder_to_save_and_reports_leftover() {
        let mut g = FundGroup::new("g", "Group");
        g.funds.insert("a".into(), open("a", "300.00", 30, "295.00"));
        g.funds.insert("b".into(), open("b", "600.00", 30, "0.00"));

        let (amounts, remainder) = distribute_extra(&mut g, d("2025-01-01"), m("30.00"));

        assert_eq!(amounts["a"].amount().to_fixed(2), "5.00");
        assert_eq!(amounts["b"].amount().to_fixed(2), "20.00");
        assert_eq!(remainder.to_fixed(2), "5.00");
    }

    #[test]
    fn zero_total_rate_returns_the_whole_amount_as_remainder() {
        let mut g = FundGroup::new("g", "Group");
        g.funds.insert("m".into(), Fund::Manual(crate::model::ManualFund {
            key: "m".into(),
            name: "m".into(),
            account: "acct".into(),
            balance: m("0.00"),
        }));

        let (amounts, remainder) = distribute_extra(&mut g, d("2025-01-01"), m("50.00"));

        assert_eq!(amounts["m"].amount(), Money::zero());
        assert_eq!(remainder.to_fixed(2), "50.00");
    }
}
