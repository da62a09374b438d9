//! Grouping of rows by evaluated key tuples.

use std::collections::HashMap;

use quarry_types::compare::{fingerprint, keys_equal, Fingerprint};
use quarry_types::Value;

/// Groups members by key-tuple equality, keeping groups in order of first
/// appearance and members in insertion order.
///
/// Keys are bucketed by fingerprint and then confirmed with the comparison
/// engine's equality, so no rescans of earlier groups are needed.
#[derive(Debug, Default)]
pub struct Grouper {
    keys: Vec<Vec<Value>>,
    members: Vec<Vec<usize>>,
    buckets: HashMap<Vec<Fingerprint>, Vec<usize>>,
}

impl Grouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `member` under `key` and return the id of its group.
    pub fn insert(&mut self, key: Vec<Value>, member: usize) -> usize {
        let digest: Vec<Fingerprint> = key.iter().map(fingerprint).collect();
        let bucket = self.buckets.entry(digest).or_default();

        if let Some(&group) = bucket.iter().find(|&&g| keys_equal(&self.keys[g], &key)) {
            self.members[group].push(member);
            return group;
        }

        let group = self.keys.len();
        bucket.push(group);
        self.keys.push(key);
        self.members.push(vec![member]);
        group
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Groups as `(key, members)` in order of first appearance.
    pub fn into_groups(self) -> impl Iterator<Item = (Vec<Value>, Vec<usize>)> {
        self.keys.into_iter().zip(self.members)
    }
}

/// First occurrence of each distinct value, in input order.
pub fn distinct_values(values: &[Value]) -> Vec<Value> {
    let mut grouper = Grouper::new();
    for (idx, value) in values.iter().enumerate() {
        grouper.insert(vec![value.clone()], idx);
    }
    grouper
        .into_groups()
        .filter_map(|(mut key, _)| key.pop())
        .collect()
}
