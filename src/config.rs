// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-loadable configuration: the size bound and penalty weights, bundled so a host application
//! can keep both in a single TOML file instead of wiring them up in code.

use crate::errors::Error;
use crate::penalty::PenaltyWeights;
use serde::{Deserialize, Serialize};

/// Configuration for a single [`crate::chop`] call.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ChopConfig {
    /// The maximum number of sub-programs to produce. `None` (or absent from TOML) means
    /// unbounded: only forced merges run.
    pub bound: Option<usize>,
    /// The per-kind vertex weights and merge threshold. Falls back to
    /// [`PenaltyWeights::default`] for any field missing from the TOML source.
    pub penalty_weights: PenaltyWeights,
}

impl ChopConfig {
    /// Parses a `ChopConfig` from a TOML document, e.g.:
    ///
    /// ```toml
    /// bound = 8
    ///
    /// [penalty_weights]
    /// function = 25
    /// threshold = 40
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, Error> {
        toml::from_str(input).map_err(Error::ConfigParseError)
    }
}
