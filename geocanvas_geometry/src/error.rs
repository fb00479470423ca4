// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Reasons a `{type, coordinates}` object cannot become a [`crate::Geometry`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// A position held fewer than two numbers.
    #[error("a position needs a longitude and a latitude, found {found} number(s)")]
    ShortPosition {
        /// Number of values found in the position array.
        found: usize,
    },
    /// A position held NaN or an infinity.
    #[error("position contains a non-finite number")]
    NonFinite,
    /// The coordinate nesting depth does not match the geometry type.
    #[error("`{kind}` coordinates must be {expected}")]
    Nesting {
        /// GeoJSON type being decoded.
        kind: &'static str,
        /// Shape the coordinates were expected to have.
        expected: &'static str,
    },
}
