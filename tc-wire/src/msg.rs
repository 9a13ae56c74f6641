//! TC message headers: `struct tcmsg` and `struct tcamsg`.

use bytes::{Buf, BufMut};

use crate::handle::TC_H_ROOT;
use crate::record::{put_pad, Record};

/// Top-level TC attribute types (`TCA_*` from `<linux/rtnetlink.h>`).
pub mod attr {
    /// Unspecified.
    pub const TCA_UNSPEC: u16 = 0;
    /// Qdisc, class or filter kind, a NUL-terminated string.
    pub const TCA_KIND: u16 = 1;
    /// Kind-specific options, usually nested.
    pub const TCA_OPTIONS: u16 = 2;
    /// Legacy statistics.
    pub const TCA_STATS: u16 = 3;
    /// Kind-specific extended statistics.
    pub const TCA_XSTATS: u16 = 4;
    /// Rate estimator.
    pub const TCA_RATE: u16 = 5;
    /// Filter count.
    pub const TCA_FCNT: u16 = 6;
    /// Statistics v2, nested.
    pub const TCA_STATS2: u16 = 7;
    /// Size table.
    pub const TCA_STAB: u16 = 8;

    /// Action table, holds one nested attribute per action.
    pub const TCA_ACT_TAB: u16 = 1;

    /// Action attributes inside each `TCA_ACT_TAB` entry.
    pub const TCA_ACT_UNSPEC: u16 = 0;
    /// Action kind string.
    pub const TCA_ACT_KIND: u16 = 1;
    /// Action-specific options.
    pub const TCA_ACT_OPTIONS: u16 = 2;
    /// Action index.
    pub const TCA_ACT_INDEX: u16 = 3;
    /// Action statistics.
    pub const TCA_ACT_STATS: u16 = 4;

    /// `TCA_STATS2` sub-attributes.
    pub const TCA_STATS_BASIC: u16 = 1;
    /// Rate estimator statistics.
    pub const TCA_STATS_RATE_EST: u16 = 2;
    /// Queue statistics.
    pub const TCA_STATS_QUEUE: u16 = 3;
    /// Application specific statistics.
    pub const TCA_STATS_APP: u16 = 4;
}

/// The kernel's `struct tcmsg`, the fixed header of every qdisc, class and filter message.
///
/// # Kernel Definition
///
/// ```c
/// struct tcmsg {
///     unsigned char tcm_family;
///     unsigned char tcm__pad1;
///     unsigned short tcm__pad2;
///     int tcm_ifindex;
///     __u32 tcm_handle;
///     __u32 tcm_parent;
///     __u32 tcm_info;
/// };
/// ```
///
/// For filters `tcm_info` packs the priority in the upper 16 bits and the protocol, in
/// network byte order, in the lower 16 bits. See [`TcMsg::filter_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcMsg {
    /// Address family, `AF_UNSPEC` for TC.
    pub family: u8,
    /// Interface index.
    pub ifindex: i32,
    /// This object's handle.
    pub handle: u32,
    /// Parent handle.
    pub parent: u32,
    /// Kind-dependent info.
    pub info: u32,
}

impl Default for TcMsg {
    fn default() -> Self {
        Self { family: 0, ifindex: 0, handle: 0, parent: TC_H_ROOT, info: 0 }
    }
}

impl TcMsg {
    /// A header attached to the root of no particular interface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interface index.
    pub const fn with_ifindex(mut self, ifindex: i32) -> Self {
        self.ifindex = ifindex;
        self
    }

    /// Set the handle.
    pub const fn with_handle(mut self, handle: u32) -> Self {
        self.handle = handle;
        self
    }

    /// Set the parent handle.
    pub const fn with_parent(mut self, parent: u32) -> Self {
        self.parent = parent;
        self
    }

    /// Set the raw info field.
    pub const fn with_info(mut self, info: u32) -> Self {
        self.info = info;
        self
    }

    /// The filter `info` word: priority in the upper half, ethertype (network order) in the
    /// lower half.
    pub const fn filter_info(priority: u16, protocol: u16) -> u32 {
        ((priority as u32) << 16) | protocol.to_be() as u32
    }
}

impl Record for TcMsg {
    const SIZE: usize = 20;
    const NAME: &'static str = "tcmsg";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.family);
        put_pad(dst, 3);
        dst.put_i32_ne(self.ifindex);
        dst.put_u32_ne(self.handle);
        dst.put_u32_ne(self.parent);
        dst.put_u32_ne(self.info);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        let family = src.get_u8();
        src.advance(3);
        Self {
            family,
            ifindex: src.get_i32_ne(),
            handle: src.get_u32_ne(),
            parent: src.get_u32_ne(),
            info: src.get_u32_ne(),
        }
    }
}

/// The kernel's `struct tcamsg`, the fixed header of action messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcActionMsg {
    /// Address family.
    pub family: u8,
}

impl Record for TcActionMsg {
    const SIZE: usize = 4;
    const NAME: &'static str = "tcamsg";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.family);
        put_pad(dst, 3);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        let family = src.get_u8();
        src.advance(3);
        Self { family }
    }
}
