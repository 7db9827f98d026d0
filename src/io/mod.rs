// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for marker files.

pub mod serialization;
