// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Pure helper functions shared across the UI.

pub mod mapping;
pub mod time;
