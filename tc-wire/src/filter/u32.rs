//! The `u32` classifier selector: a [`TcU32SelHeader`] followed by `nkeys` [`TcU32Key`]s.

use bytes::{Buf, BufMut, Bytes};

use crate::error::{Error, Result};
use crate::record::{put_pad, Record};
use crate::variable::{decode_variable, encode_variable, CountedHead};

// U32 filter TCA_OPTIONS sub-attributes (from linux/pkt_cls.h)
/// Target class id.
pub const TCA_U32_CLASSID: u16 = 1;
/// Hash table handle.
pub const TCA_U32_HASH: u16 = 2;
/// Link to another hash table.
pub const TCA_U32_LINK: u16 = 3;
/// Hash table divisor.
pub const TCA_U32_DIVISOR: u16 = 4;
/// Selector, a [`TcU32Sel`].
pub const TCA_U32_SEL: u16 = 5;
/// Legacy police attribute.
pub const TCA_U32_POLICE: u16 = 6;
/// Nested actions.
pub const TCA_U32_ACT: u16 = 7;
/// Ingress device name.
pub const TCA_U32_INDEV: u16 = 8;
/// Per-key hit counters.
pub const TCA_U32_PCNT: u16 = 9;
/// Firewall mark match.
pub const TCA_U32_MARK: u16 = 10;

// U32 selector flags (from linux/pkt_cls.h)
/// Marks a u32 filter as terminal, required for the filter to return a classification result.
pub const TC_U32_TERMINAL: u8 = 1;
/// Use the selector's offset fields.
pub const TC_U32_OFFSET: u8 = 2;
/// The offset is read from the packet.
pub const TC_U32_VAROFFSET: u8 = 4;
/// Consume the matched header.
pub const TC_U32_EAT: u8 = 8;

/// The kernel's `tc_u32_key` structure for u32 matching.
///
/// `mask` and `val` are `__be32` and go on the wire in network order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcU32Key {
    /// Mask to apply before comparison.
    pub mask: u32,
    /// Value to compare against.
    pub val: u32,
    /// Offset in packet to start comparison.
    pub off: i32,
    /// Offset mask.
    pub offmask: i32,
}

impl TcU32Key {
    /// Match the 32-bit word at `off` against `val` under `mask`.
    pub const fn new(val: u32, mask: u32, off: i32) -> Self {
        Self { mask, val: val & mask, off, offmask: 0 }
    }
}

impl Record for TcU32Key {
    const SIZE: usize = 16;
    const NAME: &'static str = "tc_u32_key";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32(self.mask);
        dst.put_u32(self.val);
        dst.put_i32_ne(self.off);
        dst.put_i32_ne(self.offmask);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            mask: src.get_u32(),
            val: src.get_u32(),
            off: src.get_i32_ne(),
            offmask: src.get_i32_ne(),
        }
    }
}

/// The fixed head of the kernel's `tc_u32_sel` structure.
///
/// ```c
/// struct tc_u32_sel {
///     unsigned char flags;
///     unsigned char offshift;
///     unsigned char nkeys;
///
///     __be16 offmask;
///     __u16 off;
///     short offoff;
///
///     short hoff;
///     __be32 hmask;
///     struct tc_u32_key keys[];
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcU32SelHeader {
    /// `TC_U32_*` flags.
    pub flags: u8,
    /// Offset shift.
    pub offshift: u8,
    /// Number of keys that follow.
    pub nkeys: u8,
    /// Offset mask, network order on the wire.
    pub offmask: u16,
    /// Fixed offset.
    pub off: u16,
    /// Offset of the variable offset field.
    pub offoff: i16,
    /// Hash offset.
    pub hoff: i16,
    /// Hash mask, network order on the wire.
    pub hmask: u32,
}

impl Record for TcU32SelHeader {
    const SIZE: usize = 16;
    const NAME: &'static str = "tc_u32_sel";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.flags);
        dst.put_u8(self.offshift);
        dst.put_u8(self.nkeys);
        put_pad(dst, 1);
        dst.put_u16(self.offmask);
        dst.put_u16_ne(self.off);
        dst.put_i16_ne(self.offoff);
        dst.put_i16_ne(self.hoff);
        dst.put_u32(self.hmask);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        let flags = src.get_u8();
        let offshift = src.get_u8();
        let nkeys = src.get_u8();
        src.advance(1);
        Self {
            flags,
            offshift,
            nkeys,
            offmask: src.get_u16(),
            off: src.get_u16_ne(),
            offoff: src.get_i16_ne(),
            hoff: src.get_i16_ne(),
            hmask: src.get_u32(),
        }
    }
}

impl CountedHead for TcU32SelHeader {
    const MAX_COUNT: usize = u8::MAX as usize;

    fn count(&self) -> usize {
        self.nkeys as usize
    }

    fn set_count(&mut self, count: usize) {
        self.nkeys = count as u8;
    }
}

/// A complete u32 selector, the payload of [`TCA_U32_SEL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TcU32Sel {
    /// Fixed head; `nkeys` is rewritten from `keys` on encode.
    pub header: TcU32SelHeader,
    /// Match keys.
    pub keys: Vec<TcU32Key>,
}

impl TcU32Sel {
    /// An empty, non-terminal selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal selector with a single `match u32 0 0` key, which matches every packet.
    ///
    /// Used to route unclassified traffic (ARP, non-IP) to a default class with the `u32`
    /// classifier, which unlike `matchall` is built into nearly every kernel.
    pub fn catch_all() -> Self {
        Self {
            header: TcU32SelHeader { flags: TC_U32_TERMINAL, nkeys: 1, ..Default::default() },
            keys: vec![TcU32Key::default()],
        }
    }

    /// Set or clear [`TC_U32_TERMINAL`].
    pub fn set_terminal(&mut self, terminal: bool) {
        if terminal {
            self.header.flags |= TC_U32_TERMINAL;
        } else {
            self.header.flags &= !TC_U32_TERMINAL;
        }
    }

    /// Whether the selector returns a classification result.
    pub const fn is_terminal(&self) -> bool {
        self.header.flags & TC_U32_TERMINAL != 0
    }

    /// Append a key, failing with [`Error::CapacityExceeded`] when `nkeys` would overflow.
    pub fn push_key(&mut self, key: TcU32Key) -> Result<()> {
        if self.keys.len() >= TcU32SelHeader::MAX_COUNT {
            return Err(Error::CapacityExceeded { capacity: TcU32SelHeader::MAX_COUNT });
        }
        self.keys.push(key);
        self.header.set_count(self.keys.len());
        Ok(())
    }

    /// Serialize the head followed by every key.
    pub fn encode(&self) -> Result<Bytes> {
        encode_variable(&self.header, &self.keys, TcU32SelHeader::MAX_COUNT)
    }

    /// Deserialize a selector and exactly the keys its head declares.
    pub fn decode(src: &[u8]) -> Result<Self> {
        let (header, keys) = decode_variable(src, TcU32SelHeader::MAX_COUNT)?;
        Ok(Self { header, keys })
    }
}
