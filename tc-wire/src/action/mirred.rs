//! Mirror/redirect (`mirred`) action parameters.

use bytes::{Buf, BufMut};

use super::gen::{verdict, TcGen};
use crate::record::Record;

/// Mirred action kind id.
pub const TCA_ACT_MIRRED: u16 = 8;
/// Mirred timestamp attribute type.
pub const TCA_MIRRED_TM: u16 = 1;
/// Mirred parameters attribute type.
pub const TCA_MIRRED_PARMS: u16 = 2;

/// Redirect to the egress of the target device.
pub const TCA_EGRESS_REDIR: i32 = 1;
/// Mirror to the egress of the target device.
pub const TCA_EGRESS_MIRROR: i32 = 2;
/// Redirect to the ingress of the target device.
pub const TCA_INGRESS_REDIR: i32 = 3;
/// Mirror to the ingress of the target device.
pub const TCA_INGRESS_MIRROR: i32 = 4;

/// The kernel's `tc_mirred` structure.
///
/// ```c
/// struct tc_mirred {
///     tc_gen;
///     int eaction;   /* one of IN/EGRESS_MIRROR/REDIR */
///     __u32 ifindex; /* ifindex of egress port */
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcMirred {
    /// Generic action header.
    pub gen: TcGen,
    /// Mirror or redirect, ingress or egress.
    pub eaction: i32,
    /// Target interface index.
    pub ifindex: u32,
}

impl TcMirred {
    /// Redirect to the egress of `ifindex`, stealing the packet.
    pub const fn egress_redirect(ifindex: u32) -> Self {
        Self { gen: TcGen::new(verdict::TC_ACT_STOLEN), eaction: TCA_EGRESS_REDIR, ifindex }
    }

    /// Mirror to the egress of `ifindex` and let the original continue.
    pub const fn egress_mirror(ifindex: u32) -> Self {
        Self { gen: TcGen::new(verdict::TC_ACT_PIPE), eaction: TCA_EGRESS_MIRROR, ifindex }
    }
}

impl Record for TcMirred {
    const SIZE: usize = TcGen::SIZE + 8;
    const NAME: &'static str = "tc_mirred";

    fn put<B: BufMut>(&self, dst: &mut B) {
        self.gen.put(dst);
        dst.put_i32_ne(self.eaction);
        dst.put_u32_ne(self.ifindex);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self { gen: TcGen::get(src), eaction: src.get_i32_ne(), ifindex: src.get_u32_ne() }
    }
}
