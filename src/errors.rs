// Copyright (c) The cargo-guppy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contains types that describe errors that `chopper` methods can return.

use std::error;
use std::fmt;

use Error::*;

/// Error type describing the sorts of errors `chopper` can return.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// `bound` was zero or negative; `chop` requires a positive upper bound or `None`.
    InvalidBound(i64),
    /// A member of a kind outside the closed vertex model (a plugin/extension member) was
    /// encountered while building the dependency graph.
    UnsupportedMember(String),
    /// A use site names a member that isn't present in the program at all (for example, a
    /// `MethodSpec` reference to a method that was never declared).
    MissingReference(String),
    /// An internal invariant was violated: the merger lost a vertex, or produced a sub-program
    /// that doesn't cover an important node. This indicates a bug in `chopper` itself.
    InternalError(String),
    /// Could not parse a [`crate::config::ChopConfig`] from TOML.
    ConfigParseError(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBound(bound) => {
                write!(f, "invalid bound {}: bound must be a positive integer", bound)
            }
            UnsupportedMember(node_name) => write!(
                f,
                "member '{}' is not supported; apply chopper post-plugin transform",
                node_name
            ),
            MissingReference(name) => {
                write!(f, "reference to '{}', which is not declared in this program", name)
            }
            InternalError(msg) => write!(f, "internal error in chopper: {}", msg),
            ConfigParseError(err) => write!(f, "error while parsing chopper config: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConfigParseError(err) => Some(err),
            InvalidBound(_) | UnsupportedMember(_) | MissingReference(_) | InternalError(_) => {
                None
            }
        }
    }
}
