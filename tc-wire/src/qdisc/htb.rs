//! HTB (Hierarchical Token Bucket) qdisc and class parameters.

use bytes::{Buf, BufMut};

use super::rate::TcRateSpec;
use crate::record::Record;

/// HTB class parameters attribute type.
pub const TCA_HTB_PARMS: u16 = 1;
/// HTB qdisc initialization attribute type.
pub const TCA_HTB_INIT: u16 = 2;
/// HTB ceil rate table attribute type.
pub const TCA_HTB_CTAB: u16 = 3;
/// HTB rate table attribute type.
pub const TCA_HTB_RTAB: u16 = 4;
/// Direct queue length attribute type.
pub const TCA_HTB_DIRECT_QLEN: u16 = 5;
/// 64-bit rate attribute type.
pub const TCA_HTB_RATE64: u16 = 6;
/// 64-bit ceil attribute type.
pub const TCA_HTB_CEIL64: u16 = 7;

/// HTB protocol version.
pub const HTB_VERSION: u32 = 3;

/// Default rate-to-quantum divisor, `quantum = rate / rate2quantum`.
pub const HTB_RATE2QUANTUM: u32 = 10;

/// The kernel's `tc_htb_glob` structure, sent in `TCA_HTB_INIT` when creating the qdisc.
///
/// ```c
/// struct tc_htb_glob {
///     __u32 version;
///     __u32 rate2quantum;
///     __u32 defcls;       /* default class number */
///     __u32 debug;
///     __u32 direct_pkts;  /* stats only */
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcHtbGlob {
    /// HTB version.
    pub version: u32,
    /// Rate-to-quantum divisor.
    pub rate2quantum: u32,
    /// Minor number of the class that takes unclassified traffic.
    pub defcls: u32,
    /// Debug flags.
    pub debug: u32,
    /// Packets sent directly, read-only.
    pub direct_pkts: u32,
}

impl Default for TcHtbGlob {
    fn default() -> Self {
        Self {
            version: HTB_VERSION,
            rate2quantum: HTB_RATE2QUANTUM,
            defcls: 1,
            debug: 0,
            direct_pkts: 0,
        }
    }
}

impl TcHtbGlob {
    /// Set the default class minor number.
    pub const fn with_default_class(mut self, defcls: u32) -> Self {
        self.defcls = defcls;
        self
    }
}

impl Record for TcHtbGlob {
    const SIZE: usize = 20;
    const NAME: &'static str = "tc_htb_glob";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.version);
        dst.put_u32_ne(self.rate2quantum);
        dst.put_u32_ne(self.defcls);
        dst.put_u32_ne(self.debug);
        dst.put_u32_ne(self.direct_pkts);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            version: src.get_u32_ne(),
            rate2quantum: src.get_u32_ne(),
            defcls: src.get_u32_ne(),
            debug: src.get_u32_ne(),
            direct_pkts: src.get_u32_ne(),
        }
    }
}

/// The kernel's `tc_htb_opt` structure, the per-class parameters in `TCA_HTB_PARMS`.
///
/// ```c
/// struct tc_htb_opt {
///     struct tc_ratespec rate;
///     struct tc_ratespec ceil;
///     __u32 buffer;
///     __u32 cbuffer;
///     __u32 quantum;
///     __u32 level;    /* out only */
///     __u32 prio;
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcHtbOpt {
    /// Guaranteed rate.
    pub rate: TcRateSpec,
    /// Ceiling rate.
    pub ceil: TcRateSpec,
    /// Burst size in ticks.
    pub buffer: u32,
    /// Ceil burst size in ticks.
    pub cbuffer: u32,
    /// Quantum for deficit round-robin, 0 lets the kernel derive it.
    pub quantum: u32,
    /// Class level, reported by the kernel.
    pub level: u32,
    /// Priority, 0 is highest.
    pub prio: u32,
}

impl Record for TcHtbOpt {
    const SIZE: usize = 2 * TcRateSpec::SIZE + 20;
    const NAME: &'static str = "tc_htb_opt";

    fn put<B: BufMut>(&self, dst: &mut B) {
        self.rate.put(dst);
        self.ceil.put(dst);
        dst.put_u32_ne(self.buffer);
        dst.put_u32_ne(self.cbuffer);
        dst.put_u32_ne(self.quantum);
        dst.put_u32_ne(self.level);
        dst.put_u32_ne(self.prio);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            rate: TcRateSpec::get(src),
            ceil: TcRateSpec::get(src),
            buffer: src.get_u32_ne(),
            cbuffer: src.get_u32_ne(),
            quantum: src.get_u32_ne(),
            level: src.get_u32_ne(),
            prio: src.get_u32_ne(),
        }
    }
}
