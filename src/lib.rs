/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

pub mod binary;
pub mod error;
pub mod impls;
pub mod machine;
pub mod tables;
pub mod traits;
pub mod utils;

#[cfg(feature = "fuzz")]
pub mod fuzz;

pub use error::{Error, ErrorKind, Result};

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::binary::*;
    pub use crate::error::*;
    pub use crate::impls::*;
    pub use crate::machine::*;
    pub use crate::tables::*;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
