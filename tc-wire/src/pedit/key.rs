//! Pedit keys: the on-wire `tc_pedit_key`, its extended metadata and the caller's edit
//! description before packing.

use bytes::{Buf, BufMut, Bytes};

use crate::error::Error;
use crate::record::Record;

/// Pedit timestamp attribute type.
pub const TCA_PEDIT_TM: u16 = 1;
/// Legacy selector attribute type.
pub const TCA_PEDIT_PARMS: u16 = 2;
/// Padding attribute type.
pub const TCA_PEDIT_PAD: u16 = 3;
/// Extended-mode selector attribute type.
pub const TCA_PEDIT_PARMS_EX: u16 = 4;
/// Nest of per-key extended metadata.
pub const TCA_PEDIT_KEYS_EX: u16 = 5;
/// One key's extended metadata inside [`TCA_PEDIT_KEYS_EX`].
pub const TCA_PEDIT_KEY_EX: u16 = 6;

/// Header type attribute inside [`TCA_PEDIT_KEY_EX`], u16.
pub const TCA_PEDIT_KEY_EX_HTYPE: u16 = 1;
/// Command attribute inside [`TCA_PEDIT_KEY_EX`], u16.
pub const TCA_PEDIT_KEY_EX_CMD: u16 = 2;

/// Header an offset is relative to (`TCA_PEDIT_KEY_EX_HDR_TYPE_*`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HeaderType {
    /// Offsets are relative to the network header. The only type legacy selectors accept.
    #[default]
    Network = 0,
    /// Ethernet header.
    Eth = 1,
    /// IPv4 header.
    Ip4 = 2,
    /// IPv6 header.
    Ip6 = 3,
    /// TCP header.
    Tcp = 4,
    /// UDP header.
    Udp = 5,
}

impl TryFrom<u16> for HeaderType {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Network,
            1 => Self::Eth,
            2 => Self::Ip4,
            3 => Self::Ip6,
            4 => Self::Tcp,
            5 => Self::Udp,
            other => return Err(other),
        })
    }
}

/// What the kernel does with the packed value (`TCA_PEDIT_KEY_EX_CMD_*`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EditCmd {
    /// Overwrite the unmasked bits. The only command legacy selectors accept.
    #[default]
    Set = 0,
    /// Add the value to the field.
    Add = 1,
}

impl TryFrom<u16> for EditCmd {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Set),
            1 => Ok(Self::Add),
            other => Err(other),
        }
    }
}

/// Extended metadata of one key, stored at the same index as the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyEx {
    /// Header the key's offset is relative to.
    pub htype: HeaderType,
    /// Set or add.
    pub cmd: EditCmd,
}

impl KeyEx {
    /// Whether this is the only combination a legacy selector can express.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// `(attribute type, payload)` pairs for one [`TCA_PEDIT_KEY_EX`] nest. Both payloads are
    /// host-order u16.
    pub fn attributes(&self) -> [(u16, Bytes); 2] {
        [
            (TCA_PEDIT_KEY_EX_HTYPE, Bytes::copy_from_slice(&(self.htype as u16).to_ne_bytes())),
            (TCA_PEDIT_KEY_EX_CMD, Bytes::copy_from_slice(&(self.cmd as u16).to_ne_bytes())),
        ]
    }
}

/// The kernel's `tc_pedit_key` structure.
///
/// The kernel applies `word = (word & mask) ^ val` to the 32-bit word at `off`: bits set in
/// `mask` are kept, the others are replaced by `val`. `mask` and `val` are packed as logical
/// integers and go on the wire in network order.
///
/// ```c
/// struct tc_pedit_key {
///     __u32 mask;  /* AND */
///     __u32 val;   /* XOR */
///     __u32 off;   /* offset */
///     __u32 at;
///     __u32 offmask;
///     __u32 shift;
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeditKey {
    /// Bits of the target word to keep.
    pub mask: u32,
    /// Bits to write into the cleared part of the word.
    pub val: u32,
    /// Word offset, a multiple of 4.
    pub off: u32,
    /// Offset of a packet byte holding a variable offset.
    pub at: u32,
    /// Mask applied to the byte at `at`.
    pub offmask: u32,
    /// Shift applied to the masked byte at `at`.
    pub shift: u32,
}

impl Record for PeditKey {
    const SIZE: usize = 24;
    const NAME: &'static str = "tc_pedit_key";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32(self.mask);
        dst.put_u32(self.val);
        dst.put_u32_ne(self.off);
        dst.put_u32_ne(self.at);
        dst.put_u32_ne(self.offmask);
        dst.put_u32_ne(self.shift);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            mask: src.get_u32(),
            val: src.get_u32(),
            off: src.get_u32_ne(),
            at: src.get_u32_ne(),
            offmask: src.get_u32_ne(),
            shift: src.get_u32_ne(),
        }
    }
}

/// Width of the edited field in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Width {
    /// One byte.
    U8 = 1,
    /// Two bytes.
    U16 = 2,
    /// A full word.
    #[default]
    U32 = 4,
}

impl Width {
    /// Width in bytes.
    pub const fn bytes(self) -> u8 {
        self as u8
    }

    /// Largest value and mask a field of this width holds.
    pub const fn max_value(self) -> u32 {
        match self {
            Self::U8 => 0xFF,
            Self::U16 => 0xFFFF,
            Self::U32 => u32::MAX,
        }
    }
}

impl TryFrom<u32> for Width {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::U8),
            2 => Ok(Self::U16),
            4 => Ok(Self::U32),
            other => Err(Error::InvalidWidth(other)),
        }
    }
}

/// One field edit as the caller describes it, before it is packed into a word-aligned
/// [`PeditKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditKey {
    /// Byte offset of the field, relative to `htype`.
    pub offset: u32,
    /// Field width.
    pub width: Width,
    /// New value, right-aligned in the field.
    pub value: u32,
    /// Bits of the field to keep, right-aligned in the field.
    pub mask: u32,
    /// Bits of `value` to apply; the complement is added to the packed mask.
    pub retain: u32,
    /// Header the offset is relative to.
    pub htype: HeaderType,
    /// Set or add.
    pub cmd: EditCmd,
    /// Passed through to [`PeditKey::at`].
    pub at: u32,
    /// Passed through to [`PeditKey::offmask`].
    pub offmask: u32,
    /// Passed through to [`PeditKey::shift`].
    pub shift: u32,
}

impl Default for EditKey {
    fn default() -> Self {
        Self {
            offset: 0,
            width: Width::U32,
            value: 0,
            mask: 0,
            retain: u32::MAX,
            htype: HeaderType::Network,
            cmd: EditCmd::Set,
            at: 0,
            offmask: 0,
            shift: 0,
        }
    }
}

impl EditKey {
    /// A full-word set of `value` at `offset` from the network header.
    pub fn new(offset: u32, value: u32) -> Self {
        Self { offset, value, ..Default::default() }
    }

    /// Set the field width.
    pub const fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    /// Set the kept-bits mask.
    pub const fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    /// Set the retain mask.
    pub const fn with_retain(mut self, retain: u32) -> Self {
        self.retain = retain;
        self
    }

    /// Set the header the offset is relative to.
    pub const fn with_htype(mut self, htype: HeaderType) -> Self {
        self.htype = htype;
        self
    }

    /// Set the command.
    pub const fn with_cmd(mut self, cmd: EditCmd) -> Self {
        self.cmd = cmd;
        self
    }

    /// The extended metadata this key carries.
    pub const fn ex(&self) -> KeyEx {
        KeyEx { htype: self.htype, cmd: self.cmd }
    }
}
