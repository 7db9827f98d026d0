// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: annotations and filtering.

pub mod annotation;
pub mod filter;
