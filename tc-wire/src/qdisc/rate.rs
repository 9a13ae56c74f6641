//! Rate specification shared by TBF, HTB and police.

use bytes::{Buf, BufMut};

use crate::record::Record;

/// Lower bits of `tc_ratespec.linklayer` that hold the link-layer type.
pub const TC_LINKLAYER_MASK: u8 = 0x0F;

/// ATM cell payload size in bytes.
pub const ATM_CELL_PAYLOAD: u32 = 48;

/// ATM cell size on the wire in bytes.
pub const ATM_CELL_SIZE: u32 = 53;

/// Link-layer type stored in the low bits of `tc_ratespec.linklayer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum LinkLayer {
    /// `TC_LINKLAYER_UNAWARE`, the kernel detects it from the rate table.
    #[default]
    Unspec = 0,
    /// `TC_LINKLAYER_ETHERNET`.
    Ethernet = 1,
    /// `TC_LINKLAYER_ATM`, 48-byte cell accounting.
    Atm = 2,
}

impl TryFrom<u8> for LinkLayer {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value & TC_LINKLAYER_MASK {
            0 => Ok(Self::Unspec),
            1 => Ok(Self::Ethernet),
            2 => Ok(Self::Atm),
            other => Err(other),
        }
    }
}

/// The kernel's `tc_ratespec` structure.
///
/// Modern kernels compute transmission times from precomputed `mult`/`shift` values, so the
/// rate table sent next to a rate spec is only used for link-layer detection. `cell_log` is
/// kept for struct compatibility.
///
/// # Kernel Definition
///
/// ```c
/// struct tc_ratespec {
///     unsigned char cell_log;
///     __u8 linklayer;            /* lower 4 bits */
///     unsigned short overhead;
///     short cell_align;
///     unsigned short mpu;
///     __u32 rate;                /* bytes per second */
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcRateSpec {
    /// Log2 of the cell size.
    pub cell_log: u8,
    /// Link-layer type in the low 4 bits.
    pub linklayer: u8,
    /// Per-packet link-layer overhead in bytes.
    pub overhead: u16,
    /// Cell alignment, -1 for Ethernet.
    pub cell_align: i16,
    /// Minimum packet unit.
    pub mpu: u16,
    /// Rate in bytes per second.
    pub rate: u32,
}

impl TcRateSpec {
    /// A rate spec for `rate_bytes_per_sec` with `cell_log` derived from `mtu`.
    pub fn new(rate_bytes_per_sec: u32, mtu: u32) -> Self {
        Self {
            rate: rate_bytes_per_sec,
            cell_log: Self::compute_cell_log(mtu),
            // Standard value from iproute2.
            cell_align: -1,
            ..Default::default()
        }
    }

    /// Set the link-layer type.
    pub const fn with_link_layer(mut self, link_layer: LinkLayer) -> Self {
        self.linklayer = (self.linklayer & !TC_LINKLAYER_MASK) | link_layer as u8;
        self
    }

    /// The link-layer type, `None` if the low bits hold an unknown value.
    pub fn link_layer(&self) -> Option<LinkLayer> {
        LinkLayer::try_from(self.linklayer).ok()
    }

    /// Smallest `cell_log` such that `mtu >> cell_log <= 255`.
    ///
    /// For Ethernet (MTU 1500) this is 3, since `1500 >> 3 = 187`.
    pub const fn compute_cell_log(mtu: u32) -> u8 {
        let mut cell_log = 0u8;
        while (mtu >> cell_log) > 255 {
            cell_log += 1;
        }
        cell_log
    }
}

impl Record for TcRateSpec {
    const SIZE: usize = 12;
    const NAME: &'static str = "tc_ratespec";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.cell_log);
        dst.put_u8(self.linklayer);
        dst.put_u16_ne(self.overhead);
        dst.put_i16_ne(self.cell_align);
        dst.put_u16_ne(self.mpu);
        dst.put_u32_ne(self.rate);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            cell_log: src.get_u8(),
            linklayer: src.get_u8(),
            overhead: src.get_u16_ne(),
            cell_align: src.get_i16_ne(),
            mpu: src.get_u16_ne(),
            rate: src.get_u32_ne(),
        }
    }
}
