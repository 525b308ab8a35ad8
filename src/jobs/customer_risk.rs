// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::records::{CustomerRisk, CustomerRiskRow, Row};
use crate::schema::{registry, Schema};
use crate::sources::SourceMessage;
use crate::traits::StreamingJob;

/// Customer risk job - projects customer and score out of each risk event.
///
/// Nothing is filtered: a payload that fails to parse still produces a row,
/// with both cells null.
pub struct CustomerRiskJob {
    schema: Schema,
}

impl CustomerRiskJob {
    pub fn new() -> Self {
        Self {
            schema: registry::customer_risk(),
        }
    }

    pub fn derive(&self, text: Option<&str>) -> CustomerRiskRow {
        let risk: CustomerRisk = self.schema.decode_as(text);
        CustomerRiskRow {
            customer: risk.customer,
            score: risk.score,
        }
    }
}

impl Default for CustomerRiskJob {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingJob for CustomerRiskJob {
    fn name(&self) -> &'static str {
        "customer_risk"
    }

    fn columns(&self) -> &'static [&'static str] {
        CustomerRiskRow::COLUMNS
    }

    fn transform(&self, message: &SourceMessage) -> Option<Row> {
        let text = message.value_text();
        Some(self.derive(text.as_deref()).into())
    }
}
