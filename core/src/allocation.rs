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

//! The nested result shape every distribution algorithm returns, and the
//! sum-merge used to fold the upfactor pass into Pass 1 of monthly
//! distribution.

use indexmap::IndexMap;

use crate::money::Money;

/// A leaf carries just its allocated amount; a group node carries the total
/// allocated into its subtree plus the per-child breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Allocation {
    Leaf(Money),
    Node(Money, IndexMap<String, Allocation>),
}

impl Allocation {
    pub fn zero_leaf() -> Allocation {
        Allocation::Leaf(Money::zero())
    }

    pub fn zero_node() -> Allocation {
        Allocation::Node(Money::zero(), IndexMap::new())
    }

    /// The amount allocated at this node, regardless of variant.
    pub fn amount(&self) -> Money {
        match self {
            Allocation::Leaf(m) => m.clone(),
            Allocation::Node(m, _) => m.clone(),
        }
    }

    pub fn children(&self) -> Option<&IndexMap<String, Allocation>> {
        match self {
            Allocation::Leaf(_) => None,
            Allocation::Node(_, children) => Some(children),
        }
    }

    /// Combine two allocations of identical shape: sum leaf values; sum the
    /// top amount at each group node and recursively merge its children.
    pub fn sum_merge(a: Allocation, b: Allocation) -> Allocation {
        match (a, b) {
            (Allocation::Leaf(x), Allocation::Leaf(y)) => Allocation::Leaf(x + y),
            (Allocation::Node(x, xs), Allocation::Node(y, ys)) => {
                let mut merged = IndexMap::with_capacity(xs.len());
                let mut ys = ys;
                for (key, xv) in xs {
                    let merged_child = match ys.shift_remove(&key) {
                        Some(yv) => Allocation::sum_merge(xv, yv),
                        None => xv,
                    };
                    merged.insert(key, merged_child);
                }
                for (key, yv) in ys {
                    merged.insert(key, yv);
                }
                Allocation::Node(x + y, merged)
            }
            // Shape mismatch between a leaf and a group node should never
            // occur: both trees are merged from the same underlying fund
            // tree. Fall back to summing amounts and keeping whichever side
            // carries the nested structure, rather than panicking on
            // malformed input from a future caller.
            (Allocation::Leaf(x), Allocation::Node(y, ys)) => Allocation::Node(x + y, ys),
            (Allocation::Node(x, xs), Allocation::Leaf(y)) => Allocation::Node(x + y, xs),
        }
    }

    /// [`Allocation::sum_merge`] applied entry-wise across two maps, keeping
    /// `a`'s key order and appending any keys only `b` has.
    pub fn sum_merge_maps(
        a: IndexMap<String, Allocation>,
        mut b: IndexMap<String, Allocation>,
    ) -> IndexMap<String, Allocation> {
        let mut merged = IndexMap::with_capacity(a.len());
        for (key, av) in a {
            let entry = match b.shift_remove(&key) {
                Some(bv) => Allocation::sum_merge(av, bv),
                None => av,
            };
            merged.insert(key, entry);
        }
        for (key, bv) in b {
            merged.insert(key, bv);
        }
        merged
    }
}
