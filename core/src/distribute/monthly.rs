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

//! Monthly distribution: a sequential minimum-fill pass across the root's
//! top-level groups, followed by an upfactor pass that re-splits any
//! leftover money into groups that declare extra absorption room.

use chrono::NaiveDate;
use indexmap::IndexMap;

use super::extra::distribute_extra;
use crate::allocation::Allocation;
use crate::model::{month_bounds, Fund, FundGroup};
use crate::money::Money;

/// `(allocation_tree, remainder, deficit)`. `root`'s direct children must
/// all be fund groups — true of any tree produced by the loader's
/// forest-wrapping, since the persisted format's top level is a list of
/// groups.
pub fn distribute_monthly_toplevel(
    root: &mut FundGroup,
    year: i32,
    month: u32,
    amount: Money,
) -> (IndexMap<String, Allocation>, Money, Money) {
    let keys: Vec<String> = root.funds.keys().cloned().collect();
    let mut result = IndexMap::with_capacity(keys.len());
    let mut remainder = amount;
    let mut deficit_total = Money::zero();

    for key in &keys {
        let group = top_level_group_mut(root, key);
        let (sub_map, new_remainder, deficit) = distribute_monthly_inner(group, year, month, remainder.clone());
        deficit_total = deficit_total + deficit;
        let absorbed = remainder.clone() - new_remainder.clone();
        result.insert(key.clone(), Allocation::Node(absorbed, sub_map));
        remainder = new_remainder;
    }

    if remainder.is_positive() {
        let (first, days) = month_bounds(year, month);
        for key in &keys {
            if !remainder.is_positive() {
                break;
            }
            let group = top_level_group_mut(root, key);
            let room = upfactor_room(group, year, month, first, days);
            if !room.is_positive() {
                continue;
            }
            let dist = Money::min(room, remainder.clone());
            let (extra_map, new_remainder) = distribute_extra(group, first, dist.clone());
            let total_extra = dist.clone() - new_remainder.clone();

            let slot = result.get_mut(key).expect("inserted in pass 1");
            if let Allocation::Node(orig_amount, sub_amounts) = std::mem::replace(slot, Allocation::zero_leaf()) {
                let merged_children = Allocation::sum_merge_maps(sub_amounts, extra_map);
                *slot = Allocation::Node(orig_amount + total_extra, merged_children);
            }

            remainder = remainder - dist + new_remainder;
        }
    }

    (result, remainder, deficit_total)
}

fn top_level_group_mut<'a>(root: &'a mut FundGroup, key: &str) -> &'a mut FundGroup {
    root.funds
        .get_mut(key)
        .and_then(Fund::as_group_mut)
        .expect("top-level fund must be a group; forest-wrapped roots only ever hold groups")
}

/// The inner recursive step, usable on any group (top-level or nested).
fn distribute_monthly_inner(
    group: &mut FundGroup,
    year: i32,
    month: u32,
    amount_in: Money,
) -> (IndexMap<String, Allocation>, Money, Money) {
    let (first, days) = month_bounds(year, month);
    let keys: Vec<String> = group.funds.keys().cloned().collect();

    let mma: Money = group.funds.values().map(|f| f.minimal_monthly_amount(year, month)).sum();
    if mma.is_zero() {
        let zeros = keys.into_iter().map(|k| (k, Allocation::Leaf(Money::zero()))).collect();
        return (zeros, amount_in, Money::zero());
    }

    let deficit = (mma.clone() - amount_in.clone()).clamp_non_negative();
    let ratio = Money::min(Money::from(1), amount_in.clone() / mma);

    let mut result = IndexMap::with_capacity(keys.len());
    let mut distributed = Money::zero();

    for key in keys {
        let nds = group.funds.get(&key).expect("key from own map").ndays_saving(first, days);
        let raw = nds * ratio.clone();
        let remainder_to_save = group.funds.get(&key).expect("key from own map").remainder_to_save();
        let alloc_amt = Money::min(raw, remainder_to_save);
        distributed = distributed + alloc_amt.clone();

        let fund = group.funds.get_mut(&key).expect("key from own map");
        let entry = if let Fund::Group(g) = fund {
            let (sub_map, _r, _d) = distribute_monthly_inner(g, year, month, alloc_amt.clone());
            Allocation::Node(alloc_amt, sub_map)
        } else {
            if let Some(balance) = fund.balance_mut() {
                *balance = balance.clone() + alloc_amt.clone();
            }
            Allocation::Leaf(alloc_amt)
        };
        result.insert(key, entry);
    }

    let remainder = amount_in - distributed;
    (result, remainder, deficit)
}

/// Additional absorption capacity a top-level group can take on beyond its
/// own minimum, scaled by its declared `monthly_factor`.
fn upfactor_room(group: &FundGroup, year: i32, month: u32, first: NaiveDate, days: i64) -> Money {
    let factor = group.monthly_factor.clone();
    let absorbable: Money = group
        .funds
        .values()
        .map(|f| Money::min(f.ndays_saving(first, days) * factor.clone(), f.remainder_to_save()))
        .sum();
    let mma: Money = group.funds.values().map(|f| f.minimal_monthly_amount(year, month)).sum();
    absorbable - mma
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FixedEndFund, SYNTHETIC_ROOT_KEY};

    fn m(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn fixed(key: &str, target: &str, target_date: &str, balance: &str) -> Fund {
        Fund::Fixed(FixedEndFund {
            key: key.to_owned(),
            name: key.to_owned(),
            account: "acct".to_owned(),
            balance: m(balance),
            target: m(target),
            target_date: NaiveDate::parse_from_str(target_date, "%Y-%m-%d").unwrap(),
        })
    }

    fn wrapped_single_fixed_fund(target: &str, target_date: &str) -> FundGroup {
        let mut inner = FundGroup::new("g", "Group");
        inner.funds.insert("f".into(), fixed("f", target, target_date, "0.00"));
        let mut root = FundGroup::new(SYNTHETIC_ROOT_KEY, "");
        root.funds.insert("g".into(), Fund::Group(inner));
        root
    }

    #[test]
    fn exact_minimum_leaves_no_remainder_or_deficit() {
        let mut root = wrapped_single_fixed_fund("1200.00", "2025-12-31");
        let mma = root.funds["g"].minimal_monthly_amount(2025, 1);

        let (_amounts, remainder, deficit) = distribute_monthly_toplevel(&mut root, 2025, 1, mma);

        assert_eq!(remainder, Money::zero());
        assert_eq!(deficit, Money::zero());
    }

    #[test]
    fn half_the_minimum_produces_a_matching_deficit() {
        let mut root = wrapped_single_fixed_fund("1200.00", "2025-12-31");
        let mma = root.funds["g"].minimal_monthly_amount(2025, 1);
        let half = mma.clone() / m("2");

        let (_amounts, remainder, deficit) = distribute_monthly_toplevel(&mut root, 2025, 1, half.clone());

        assert_eq!(remainder, Money::zero());
        assert_eq!(deficit.to_fixed(2), (mma - half).to_fixed(2));
    }

    #[test]
    fn upfactor_pass_absorbs_leftover_into_a_stretched_group() {
        let mut root = FundGroup::new(SYNTHETIC_ROOT_KEY, "");
        let mut stretchy = FundGroup::new("stretchy", "Stretchy");
        stretchy.monthly_factor = m("2");
        stretchy.funds.insert("f".into(), fixed("f", "3000.00", "2025-12-31", "0.00"));
        root.funds.insert("stretchy".into(), Fund::Group(stretchy));

        let mma = root.funds["stretchy"].minimal_monthly_amount(2025, 1);
        let (_amounts, remainder, deficit) = distribute_monthly_toplevel(&mut root, 2025, 1, mma.clone() * m("2"));

        assert_eq!(deficit, Money::zero());
        // The group's factor of 2 gives it exactly enough stretch room to
        // absorb the double contribution, leaving nothing over.
        assert_eq!(remainder, Money::zero());
    }
}
