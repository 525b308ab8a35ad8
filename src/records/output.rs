// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use super::Row;

/// Job A output: customer and score passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRiskRow {
    pub customer: Option<String>,
    pub score: Option<String>,
}

impl CustomerRiskRow {
    pub const COLUMNS: &'static [&'static str] = &["customer", "score"];
}

impl From<CustomerRiskRow> for Row {
    fn from(row: CustomerRiskRow) -> Self {
        Row(vec![row.customer, row.score])
    }
}

/// Job B output. Only built once both inputs are known to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailBirthYear {
    pub email: String,
    pub birth_year: String,
}

impl EmailBirthYear {
    pub const COLUMNS: &'static [&'static str] = &["email", "birthYear"];
}

impl From<EmailBirthYear> for Row {
    fn from(row: EmailBirthYear) -> Self {
        Row(vec![Some(row.email), Some(row.birth_year)])
    }
}
