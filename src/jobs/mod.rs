// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod customer_birth_year;
pub mod customer_risk;
pub mod factory;

pub use customer_birth_year::CustomerBirthYearJob;
pub use customer_risk::CustomerRiskJob;
pub use factory::JobFactory;
