// Copyright (c) 2025, Courtside Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Courtside application.

pub mod annotation_form;
pub mod controls;
pub mod filter_bar;
pub mod marker_list;
pub mod timeline;
