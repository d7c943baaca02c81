// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod fixtures;
mod reconstruct_roundtrip_tests;
