// ABOUTME: Error types raised while normalizing raw FoodData Central records
// ABOUTME: Distinguishes unrecognized payload shapes from records missing portion data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Normalization errors.
//!
//! Only [`normalize`](crate::normalize) can fail. The derivation functions
//! (canonicalization, daily values, portion scaling) are total and degrade to
//! defaults instead.

use thiserror::Error;

/// Errors produced by [`normalize`](crate::normalize)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The record's `dataType` or nested fields match no known category pattern
    #[error("Unrecognized {data_type} record shape: {reason}")]
    UnrecognizedShape {
        /// Category the record claimed to be (or `unknown`)
        data_type: String,
        /// What did not match
        reason: String,
    },

    /// A category that must carry `foodPortions` arrived without them
    #[error("{data_type} record has no foodPortions")]
    MissingPortionData {
        /// Category the record claimed to be
        data_type: String,
    },
}

impl NormalizeError {
    /// Create an "unrecognized shape" error
    #[must_use]
    pub fn unrecognized(data_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnrecognizedShape {
            data_type: data_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing portion data" error
    #[must_use]
    pub fn missing_portions(data_type: impl Into<String>) -> Self {
        Self::MissingPortionData {
            data_type: data_type.into(),
        }
    }
}
