/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Detection of the bit and byte numbering of the host.
//!
//! The orders are probed once, the first time they are needed, and cached in
//! a process-wide [`OnceLock`]; afterwards they are plain immutable values.

use crate::error::{Error, Result};
use std::sync::OnceLock;

/// Which physical bit of a byte is logical bit 0, that is, the first bit
/// read from or written to a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Bits are numbered from the most significant one (`0x80` comes first).
    ///
    /// So `0b1010_1010` reads `true, false, true, ...`. Older media toolkits
    /// with the same order names labelled this sequence the other way round;
    /// code ported from them must swap the two orders.
    MostSignificant,
    /// Bits are numbered from the least significant one (`0x01` comes first).
    LeastSignificant,
    /// Not determined; resolved to the system order where an order is needed.
    Unknown,
}

impl BitOrder {
    /// The other concrete order. [`BitOrder::Unknown`] is resolved first.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self.resolve() {
            BitOrder::MostSignificant => BitOrder::LeastSignificant,
            _ => BitOrder::MostSignificant,
        }
    }

    /// Replaces [`BitOrder::Unknown`] with the system bit order.
    #[must_use]
    pub fn resolve(self) -> Self {
        match self {
            BitOrder::Unknown => system_bit_order(),
            order => order,
        }
    }

    /// The order to use for a field: this order, or its opposite if
    /// `reverse` is true.
    #[inline]
    #[must_use]
    pub fn reversed_if(self, reverse: bool) -> Self {
        if reverse { self.opposite() } else { self.resolve() }
    }
}

/// Which byte of a multi-byte integer is stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
    /// 16-bit halves in little-endian order, bytes within halves big-endian
    /// (`0x01020304` is stored as `03 04 01 02`).
    MiddleBig,
    /// 16-bit halves in big-endian order, bytes within halves little-endian
    /// (`0x01020304` is stored as `02 01 04 03`, the PDP-11 layout).
    MiddleLittle,
    Unknown,
}

const SENTINEL: u32 = 0x0102_0304;

fn probe_byte_order() -> ByteOrder {
    match SENTINEL.to_ne_bytes() {
        [1, 2, 3, 4] => ByteOrder::Big,
        [4, 3, 2, 1] => ByteOrder::Little,
        [3, 4, 1, 2] => ByteOrder::MiddleBig,
        [2, 1, 4, 3] => ByteOrder::MiddleLittle,
        _ => ByteOrder::Unknown,
    }
}

fn probe_bit_order() -> BitOrder {
    // Logical bit 0 is the bit set by storing one in a byte.
    let probe = [1_u8];
    if probe[0] & 0x01 != 0 {
        BitOrder::LeastSignificant
    } else if probe[0] & 0x80 != 0 {
        BitOrder::MostSignificant
    } else {
        BitOrder::Unknown
    }
}

/// Probes the host, returning its bit and byte order.
///
/// Fails with [`Error::Configuration`] if either order cannot be confirmed.
pub fn probe_orders() -> Result<(BitOrder, ByteOrder)> {
    let bit_order = probe_bit_order();
    if bit_order == BitOrder::Unknown {
        return Err(Error::Configuration { what: "bit" });
    }
    let byte_order = probe_byte_order();
    if byte_order == ByteOrder::Unknown {
        return Err(Error::Configuration { what: "byte" });
    }
    Ok((bit_order, byte_order))
}

static SYSTEM_ORDERS: OnceLock<(BitOrder, ByteOrder)> = OnceLock::new();

/// Returns the host orders, probing them on first use.
///
/// # Panics
///
/// If [`probe_orders`] fails: no part of this crate can work on a host whose
/// bit or byte numbering is unknown.
pub fn system_orders() -> (BitOrder, ByteOrder) {
    *SYSTEM_ORDERS.get_or_init(|| match probe_orders() {
        Ok(orders) => orders,
        Err(e) => panic!("{}", e),
    })
}

#[inline]
pub fn system_bit_order() -> BitOrder {
    system_orders().0
}

#[inline]
pub fn system_byte_order() -> ByteOrder {
    system_orders().1
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_probe() {
        let (bit_order, byte_order) = probe_orders().unwrap();
        assert_eq!(bit_order, BitOrder::LeastSignificant);
        if cfg!(target_endian = "little") {
            assert_eq!(byte_order, ByteOrder::Little);
        } else {
            assert_eq!(byte_order, ByteOrder::Big);
        }
        assert_eq!(system_orders(), (bit_order, byte_order));
    }

    #[test]
    fn test_opposite() {
        assert_eq!(
            BitOrder::MostSignificant.opposite(),
            BitOrder::LeastSignificant
        );
        assert_eq!(
            BitOrder::LeastSignificant.opposite(),
            BitOrder::MostSignificant
        );
        assert_eq!(BitOrder::Unknown.resolve(), system_bit_order());
        assert_eq!(
            BitOrder::MostSignificant.reversed_if(false),
            BitOrder::MostSignificant
        );
        assert_eq!(
            BitOrder::MostSignificant.reversed_if(true),
            BitOrder::LeastSignificant
        );
    }
}
