//! The generic action header shared by every action's parameter structure.

use bytes::{Buf, BufMut};

use crate::record::Record;

/// Action verdicts (`TC_ACT_*` from `<linux/pkt_cls.h>`).
pub mod verdict {
    /// Use the default configured verdict.
    pub const TC_ACT_UNSPEC: i32 = -1;
    /// Continue with the packet.
    pub const TC_ACT_OK: i32 = 0;
    /// Reclassify the packet.
    pub const TC_ACT_RECLASSIFY: i32 = 1;
    /// Drop the packet.
    pub const TC_ACT_SHOT: i32 = 2;
    /// Pass the packet to the next action in the chain.
    pub const TC_ACT_PIPE: i32 = 3;
    /// Packet was consumed by the action.
    pub const TC_ACT_STOLEN: i32 = 4;
    /// Packet was queued by the action.
    pub const TC_ACT_QUEUED: i32 = 5;
    /// Repeat the action.
    pub const TC_ACT_REPEAT: i32 = 6;
    /// Packet was redirected.
    pub const TC_ACT_REDIRECT: i32 = 7;
    /// Packet was trapped to the CPU.
    pub const TC_ACT_TRAP: i32 = 8;
}

/// Generic action kind id.
pub const TCA_ACT_GACT: u16 = 5;
/// Generic action timestamp attribute type.
pub const TCA_GACT_TM: u16 = 1;
/// Generic action parameters attribute type.
pub const TCA_GACT_PARMS: u16 = 2;
/// Generic action probability attribute type.
pub const TCA_GACT_PROB: u16 = 3;

/// BPF action kind id.
pub const TCA_ACT_BPF: u16 = 13;
/// BPF action timestamp attribute type.
pub const TCA_ACT_BPF_TM: u16 = 1;
/// BPF action parameters attribute type.
pub const TCA_ACT_BPF_PARMS: u16 = 2;
/// BPF action classic program length attribute type.
pub const TCA_ACT_BPF_OPS_LEN: u16 = 3;
/// BPF action classic program attribute type.
pub const TCA_ACT_BPF_OPS: u16 = 4;
/// BPF action program fd attribute type.
pub const TCA_ACT_BPF_FD: u16 = 5;
/// BPF action program name attribute type.
pub const TCA_ACT_BPF_NAME: u16 = 6;

/// The kernel's `tc_gen` fields, embedded at the start of every action's parameters.
///
/// ```c
/// #define tc_gen \
///     __u32 index;   \
///     __u32 capab;   \
///     int action;    \
///     int refcnt;    \
///     int bindcnt
/// ```
///
/// The generic (`gact`) and `bpf` actions send this structure alone as their parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcGen {
    /// Action index, 0 lets the kernel allocate one.
    pub index: u32,
    /// Capabilities.
    pub capab: u32,
    /// Verdict, one of [`verdict`].
    pub action: i32,
    /// Reference count, reported by the kernel.
    pub refcnt: i32,
    /// Bind count, reported by the kernel.
    pub bindcnt: i32,
}

impl TcGen {
    /// A header with the given verdict.
    pub const fn new(action: i32) -> Self {
        Self { index: 0, capab: 0, action, refcnt: 0, bindcnt: 0 }
    }

    /// Set the action index.
    pub const fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }
}

impl Record for TcGen {
    const SIZE: usize = 20;
    const NAME: &'static str = "tc_gen";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.index);
        dst.put_u32_ne(self.capab);
        dst.put_i32_ne(self.action);
        dst.put_i32_ne(self.refcnt);
        dst.put_i32_ne(self.bindcnt);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            index: src.get_u32_ne(),
            capab: src.get_u32_ne(),
            action: src.get_i32_ne(),
            refcnt: src.get_i32_ne(),
            bindcnt: src.get_i32_ne(),
        }
    }
}
