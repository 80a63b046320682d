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

//! The fund tree: a tagged sum of four variants (three leaves, one inner
//! group node), plus the key-traversal primitives exposed on [`FundGroup`].

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedEndFund {
    pub key: String,
    pub name: String,
    pub account: String,
    pub balance: Money,
    pub target: Money,
    pub target_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenEndFund {
    pub key: String,
    pub name: String,
    pub account: String,
    pub balance: Money,
    pub target: Money,
    pub days: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualFund {
    pub key: String,
    pub name: String,
    pub account: String,
    pub balance: Money,
}

impl ManualFund {
    /// A manual fund has no independent target: it is defined as always
    /// equal to the current balance (it simply holds yield).
    pub fn target(&self) -> Money {
        self.balance.clone()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FundGroup {
    pub key: String,
    pub name: String,
    pub monthly_factor: Money,
    /// Insertion order is load-bearing: it defines both depth-first
    /// traversal order and Pass 1 order of monthly distribution.
    pub funds: IndexMap<String, Fund>,
}

impl FundGroup {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        FundGroup {
            key: key.into(),
            name: name.into(),
            monthly_factor: Money::from(1),
            funds: IndexMap::new(),
        }
    }

    pub fn balance(&self) -> Money {
        self.funds.values().map(Fund::balance).sum()
    }

    pub fn target(&self) -> Money {
        self.funds.values().map(Fund::target).sum()
    }

    /// True if `key` belongs to any node in this subtree, including this
    /// group's own key (the synthetic root excepted: it is never
    /// addressable, so a self-match against it never counts).
    pub fn contains_key(&self, key: &str) -> bool {
        (self.key == key && self.key != super::SYNTHETIC_ROOT_KEY) || self.get_fund_by_key(key).is_some()
    }

    /// Looks a key up among this group's *children*, recursively. This
    /// cannot also match this group's own key: a `Fund` entry is always one
    /// of `self`'s children, and `self` itself has no parent map slot to
    /// borrow a `&Fund` from here. `contains_key` covers that self-match
    /// case; callers that already hold `&FundGroup` and want "is this the
    /// node" should compare `.key` directly instead of going through here.
    pub fn get_fund_by_key(&self, key: &str) -> Option<&Fund> {
        if let Some(found) = self.funds.get(key) {
            return Some(found);
        }
        for child in self.funds.values() {
            if let Fund::Group(g) = child {
                if let Some(found) = g.get_fund_by_key(key) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn get_fund_by_key_mut(&mut self, key: &str) -> Option<&mut Fund> {
        if self.funds.contains_key(key) {
            return self.funds.get_mut(key);
        }
        for child in self.funds.values_mut() {
            if let Fund::Group(g) = child {
                if let Some(found) = g.get_fund_by_key_mut(key) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Inserts `fund` as a child of the first subtree node (depth-first,
    /// including this node itself) whose key equals `group_key`.
    pub fn add_fund_to_group(&mut self, fund: Fund, group_key: &str) -> AddFundOutcome {
        if self.contains_key(fund.key()) {
            return AddFundOutcome::DuplicateKey;
        }
        if self.insert_under(fund, group_key) {
            AddFundOutcome::Added
        } else {
            AddFundOutcome::GroupNotFound
        }
    }

    fn insert_under(&mut self, fund: Fund, group_key: &str) -> bool {
        if self.key == group_key {
            self.funds.insert(fund.key().to_owned(), fund);
            return true;
        }
        for child in self.funds.values_mut() {
            if let Fund::Group(g) = child {
                // `fund` is moved back out on failure so the next sibling can try.
                if g.insert_under(fund.clone(), group_key) {
                    return true;
                }
            }
        }
        false
    }

    /// Removes the node whose key is `key`. Returns `Ok(false)` if no such
    /// node exists in this subtree. Fails if that node is a non-empty group.
    pub fn remove_fund_by_key(&mut self, key: &str) -> CoreResult<bool> {
        if let Some(fund) = self.funds.get(key) {
            if let Fund::Group(g) = fund {
                if !g.funds.is_empty() {
                    return Err(CoreError::NonEmptyGroupRemoval(key.to_owned()));
                }
            }
            self.funds.shift_remove(key);
            return Ok(true);
        }
        for child in self.funds.values_mut() {
            if let Fund::Group(g) = child {
                match g.remove_fund_by_key(key)? {
                    true => return Ok(true),
                    false => continue,
                }
            }
        }
        Ok(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFundOutcome {
    Added,
    DuplicateKey,
    GroupNotFound,
}

/// A node in the fund tree: three leaf variants plus an inner group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fund {
    Fixed(FixedEndFund),
    Open(OpenEndFund),
    Manual(ManualFund),
    Group(FundGroup),
}

impl Fund {
    pub fn key(&self) -> &str {
        match self {
            Fund::Fixed(f) => &f.key,
            Fund::Open(f) => &f.key,
            Fund::Manual(f) => &f.key,
            Fund::Group(g) => &g.key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Fund::Fixed(f) => &f.name,
            Fund::Open(f) => &f.name,
            Fund::Manual(f) => &f.name,
            Fund::Group(g) => &g.name,
        }
    }

    pub fn name_mut(&mut self) -> &mut String {
        match self {
            Fund::Fixed(f) => &mut f.name,
            Fund::Open(f) => &mut f.name,
            Fund::Manual(f) => &mut f.name,
            Fund::Group(g) => &mut g.name,
        }
    }

    pub fn account_key(&self) -> Option<&str> {
        match self {
            Fund::Fixed(f) => Some(&f.account),
            Fund::Open(f) => Some(&f.account),
            Fund::Manual(f) => Some(&f.account),
            Fund::Group(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Fund::Fixed(_) => "fixed",
            Fund::Open(_) => "open",
            Fund::Manual(_) => "manual",
            Fund::Group(_) => "group",
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Fund::Group(_))
    }

    pub fn as_group(&self) -> Option<&FundGroup> {
        match self {
            Fund::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut FundGroup> {
        match self {
            Fund::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn balance(&self) -> Money {
        match self {
            Fund::Fixed(f) => f.balance.clone(),
            Fund::Open(f) => f.balance.clone(),
            Fund::Manual(f) => f.balance.clone(),
            Fund::Group(g) => g.balance(),
        }
    }

    pub fn balance_mut(&mut self) -> Option<&mut Money> {
        match self {
            Fund::Fixed(f) => Some(&mut f.balance),
            Fund::Open(f) => Some(&mut f.balance),
            Fund::Manual(f) => Some(&mut f.balance),
            Fund::Group(_) => None,
        }
    }

    /// A manual fund's target is defined as equal to its balance, so this
    /// always reflects the current state; `target_mut` is only available on
    /// the two fields that can actually be edited independently.
    pub fn target(&self) -> Money {
        match self {
            Fund::Fixed(f) => f.target.clone(),
            Fund::Open(f) => f.target.clone(),
            Fund::Manual(f) => f.target(),
            Fund::Group(g) => g.target(),
        }
    }

    pub fn target_mut(&mut self) -> Option<&mut Money> {
        match self {
            Fund::Fixed(f) => Some(&mut f.target),
            Fund::Open(f) => Some(&mut f.target),
            Fund::Manual(_) | Fund::Group(_) => None,
        }
    }

    pub fn target_date_mut(&mut self) -> Option<&mut NaiveDate> {
        match self {
            Fund::Fixed(f) => Some(&mut f.target_date),
            _ => None,
        }
    }

    pub fn days_mut(&mut self) -> Option<&mut i64> {
        match self {
            Fund::Open(f) => Some(&mut f.days),
            _ => None,
        }
    }

    pub fn monthly_factor_mut(&mut self) -> Option<&mut Money> {
        match self {
            Fund::Group(g) => Some(&mut g.monthly_factor),
            _ => None,
        }
    }

    /// `max(0, target - balance)` for leaves. For a group, the *child-sum*
    /// definition (`max(0, Σtarget - Σbalance)`), not `Σ child.remainder_to_save()`
    /// — the two differ when a child is over-target, and the group form is
    /// the one `ndays_saving` is written against. See DESIGN.md.
    pub fn remainder_to_save(&self) -> Money {
        match self {
            Fund::Fixed(f) => (f.target.clone() - f.balance.clone()).clamp_non_negative(),
            Fund::Open(f) => (f.target.clone() - f.balance.clone()).clamp_non_negative(),
            Fund::Manual(_) => Money::zero(),
            Fund::Group(g) => (g.target() - g.balance()).clamp_non_negative(),
        }
    }

    /// Per-day money flow required to reach this fund's target.
    pub fn daily_saving_rate(&self, on_date: NaiveDate) -> Money {
        match self {
            Fund::Fixed(f) => {
                let days = (f.target_date - on_date).num_days();
                if days <= 0 {
                    self.remainder_to_save()
                } else {
                    self.remainder_to_save().div_days(days)
                }
            }
            // Uses the full target, not the remainder: an open-end fund
            // restarts indefinitely once filled, so its rate never drops to
            // zero just because it happened to hit the target today.
            Fund::Open(f) => f.target.div_days(f.days),
            Fund::Manual(_) => Money::zero(),
            Fund::Group(g) => g.funds.values().map(|c| c.daily_saving_rate(on_date)).sum(),
        }
    }

    pub fn ndays_saving(&self, on_date: NaiveDate, n: i64) -> Money {
        match self {
            Fund::Group(g) => g.funds.values().map(|c| c.ndays_saving(on_date, n)).sum(),
            _ => Money::min(self.daily_saving_rate(on_date).mul_i64(n), self.remainder_to_save()),
        }
    }

    pub fn minimal_monthly_amount(&self, year: i32, month: u32) -> Money {
        let (first, days) = month_bounds(year, month);
        self.ndays_saving(first, days)
    }
}

/// The first day of `(year, month)` and the number of days it spans.
pub fn month_bounds(year: i32, month: u32) -> (NaiveDate, i64) {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid year/month");
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).expect("valid year/month")
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).expect("valid year/month")
    };
    (first, (next_first - first).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::SYNTHETIC_ROOT_KEY;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn open(key: &str, target: &str, days: i64, balance: &str) -> Fund {
        Fund::Open(OpenEndFund {
            key: key.to_owned(),
            name: key.to_owned(),
            account: "acct".to_owned(),
            balance: Money::parse(balance).unwrap(),
            target: Money::parse(target).unwrap(),
            days,
        })
    }

    fn fixed(key: &str, target: &str, target_date: &str, balance: &str) -> Fund {
        Fund::Fixed(FixedEndFund {
            key: key.to_owned(),
            name: key.to_owned(),
            account: "acct".to_owned(),
            balance: Money::parse(balance).unwrap(),
            target: Money::parse(target).unwrap(),
            target_date: d(target_date),
        })
    }

    #[test]
    fn open_end_rate_uses_full_target_not_remainder() {
        let f = open("o", "300.00", 30, "300.00");
        // Fully funded already, but the rate does not drop to zero: it
        // restarts indefinitely.
        assert_eq!(f.daily_saving_rate(d("2025-01-01")).to_fixed(2), "10.00");
        assert_eq!(f.remainder_to_save(), Money::zero());
    }

    #[test]
    fn fixed_end_rate_past_deadline_dumps_the_whole_remainder() {
        let f = fixed("f", "100.00", "2020-01-01", "40.00");
        assert_eq!(f.daily_saving_rate(d("2025-01-01")).to_fixed(2), "60.00");
    }

    #[test]
    fn manual_fund_has_no_rate_or_remainder() {
        let f = Fund::Manual(ManualFund {
            key: "m".into(),
            name: "m".into(),
            account: "acct".into(),
            balance: Money::parse("500.00").unwrap(),
        });
        assert_eq!(f.daily_saving_rate(d("2025-01-01")), Money::zero());
        assert_eq!(f.remainder_to_save(), Money::zero());
        assert_eq!(f.target(), Money::parse("500.00").unwrap());
    }

    #[test]
    fn group_rates_sum_children_and_remainder_is_child_sum() {
        let mut g = FundGroup::new("g", "Group");
        g.funds.insert("a".into(), open("a", "300.00", 30, "0.00"));
        g.funds.insert("b".into(), open("b", "600.00", 30, "0.00"));
        let group_fund = Fund::Group(g);
        assert_eq!(group_fund.daily_saving_rate(d("2025-01-01")).to_fixed(2), "30.00");
        assert_eq!(group_fund.remainder_to_save().to_fixed(2), "900.00");
    }

    #[test]
    fn traversal_finds_nested_keys_depth_first() {
        let mut root = FundGroup::new("root", "Root");
        let mut child = FundGroup::new("child", "Child");
        child.funds.insert("leaf".into(), open("leaf", "10.00", 10, "0.00"));
        root.funds.insert("child".into(), Fund::Group(child));

        assert!(root.contains_key("leaf"));
        assert!(root.contains_key("child"));
        assert!(!root.contains_key("missing"));
        assert_eq!(root.get_fund_by_key("leaf").unwrap().key(), "leaf");
    }

    #[test]
    fn contains_key_matches_a_group_s_own_key_but_never_the_synthetic_root() {
        let root = FundGroup::new("root", "Root");
        assert!(root.contains_key("root"));

        let synthetic = FundGroup::new(SYNTHETIC_ROOT_KEY, "");
        assert!(!synthetic.contains_key(SYNTHETIC_ROOT_KEY));
    }

    #[test]
    fn add_fund_to_group_rejects_duplicates_and_missing_targets() {
        let mut root = FundGroup::new("root", "Root");
        root.funds.insert("a".into(), open("a", "10.00", 10, "0.00"));

        let outcome = root.add_fund_to_group(open("a", "1.00", 1, "0.00"), "root");
        assert_eq!(outcome, AddFundOutcome::DuplicateKey);

        let outcome = root.add_fund_to_group(open("b", "1.00", 1, "0.00"), "nonexistent");
        assert_eq!(outcome, AddFundOutcome::GroupNotFound);

        let outcome = root.add_fund_to_group(open("b", "1.00", 1, "0.00"), "root");
        assert_eq!(outcome, AddFundOutcome::Added);
        assert!(root.contains_key("b"));
    }

    #[test]
    fn remove_fund_by_key_refuses_non_empty_groups() {
        let mut root = FundGroup::new("root", "Root");
        let mut child = FundGroup::new("child", "Child");
        child.funds.insert("leaf".into(), open("leaf", "10.00", 10, "0.00"));
        root.funds.insert("child".into(), Fund::Group(child));

        assert!(root.remove_fund_by_key("child").is_err());
        assert!(root.remove_fund_by_key("leaf").unwrap());
        assert!(root.remove_fund_by_key("child").unwrap());
        assert!(!root.remove_fund_by_key("child").unwrap());
    }
}
