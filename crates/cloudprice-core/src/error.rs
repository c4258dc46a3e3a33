// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Error type shared by every engine operation.
//!
//! | Variant                   | Raised when                                           | Policy                   |
//! |---------------------------|-------------------------------------------------------|--------------------------|
//! | [`Error::Validation`]     | caller input is out of range or missing               | recover, show to the user |
//! | [`Error::Data`]           | a catalog entry is malformed (unknown enum, bad price) | fatal at load             |
//! | [`Error::EmptyInput`]     | an aggregate is requested over zero records            | raise, never return NaN   |

use alloc::string::String;
use core::fmt;

/// Errors produced by the catalog loader, query engine, calculator and alert
/// evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied input is out of range or missing.
    Validation(String),
    /// A catalog source entry is outside the accepted data model.
    Data(String),
    /// An aggregate was requested over an empty sequence.
    EmptyInput(String),
}

impl Error {
    /// `true` for errors the caller is expected to surface and recover from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// The message without the kind prefix, suitable for a UI notice.
    pub fn message(&self) -> &str {
        match self {
            Error::Validation(message) | Error::Data(message) | Error::EmptyInput(message) => {
                message
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(message) => write!(f, "validation error: {message}"),
            Error::Data(message)       => write!(f, "catalog data error: {message}"),
            Error::EmptyInput(message) => write!(f, "empty input: {message}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
