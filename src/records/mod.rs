// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod input;
mod output;

pub use input::{Customer, CustomerRisk, RedisSortedSet, ZSetEntry};
pub use output::{CustomerRiskRow, EmailBirthYear};

/// Newtype wrapper for one output row, cells in column order
///
/// Jobs produce typed records; the sink only needs text cells, with `None`
/// rendered as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row(pub Vec<Option<String>>);

impl Row {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index)?.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.0.iter().map(|cell| cell.as_deref())
    }
}

impl From<Vec<Option<String>>> for Row {
    fn from(cells: Vec<Option<String>>) -> Self {
        Self(cells)
    }
}
