// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use super::{DataType, Field, Schema};

pub const CUSTOMER_RISK: &str = "customer_risk";
pub const REDIS_SORTED_SET: &str = "redis_sorted_set";
pub const CUSTOMER: &str = "customer";

/// Risk score event published on `stedi-events`.
pub fn customer_risk() -> Schema {
    Schema::new(
        CUSTOMER_RISK,
        vec![
            Field::string("customer"),
            Field::string("score"),
            Field::string("riskDate"),
        ],
    )
}

/// Redis change envelope published on `redis-server`.
pub fn redis_sorted_set() -> Schema {
    let entry = DataType::Struct(vec![Field::string("element"), Field::string("score")]);
    Schema::new(
        REDIS_SORTED_SET,
        vec![
            Field::string("key"),
            Field::string("value"),
            Field::string("expiredType"),
            Field::string("expiredValue"),
            Field::string("existType"),
            Field::boolean("ch"),
            Field::boolean("incr"),
            Field::new("zSetEntries", DataType::Array(Box::new(entry))),
        ],
    )
}

/// Customer JSON carried base64-encoded inside a sorted set element.
pub fn customer() -> Schema {
    Schema::new(
        CUSTOMER,
        vec![
            Field::string("customerName"),
            Field::string("email"),
            Field::string("phone"),
            Field::string("birthDay"),
        ],
    )
}

/// Newtype wrapper for the static schema lookup table
#[derive(Debug, Clone)]
pub struct SchemaRegistry(BTreeMap<&'static str, Schema>);

impl SchemaRegistry {
    /// Registry holding every schema the jobs decode with.
    pub fn builtin() -> Self {
        let mut registry = Self(BTreeMap::new());
        for schema in [customer_risk(), redis_sorted_set(), customer()] {
            registry.register(schema);
        }
        registry
    }

    pub fn register(&mut self, schema: Schema) {
        self.0.insert(schema.name(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0.get(name)
    }

    /// Registered schemas in name order
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.0.values()
    }
}
