//! Police action parameters.

use bytes::{Buf, BufMut};

use crate::qdisc::rate::TcRateSpec;
use crate::record::Record;

/// Police parameters attribute type (`tc_police`).
pub const TCA_POLICE_TBF: u16 = 1;
/// Rate table attribute type.
pub const TCA_POLICE_RATE: u16 = 2;
/// Peak rate table attribute type.
pub const TCA_POLICE_PEAKRATE: u16 = 3;
/// Average rate attribute type.
pub const TCA_POLICE_AVRATE: u16 = 4;
/// Result (conform action) attribute type.
pub const TCA_POLICE_RESULT: u16 = 5;

/// The kernel's `tc_police` structure.
///
/// Unlike other actions, police does not start with `tc_gen`: the generic fields are split
/// around the rate specs.
///
/// ```c
/// struct tc_police {
///     __u32 index;
///     int action;
///     __u32 limit;
///     __u32 burst;
///     __u32 mtu;
///     struct tc_ratespec rate;
///     struct tc_ratespec peakrate;
///     int refcnt;
///     int bindcnt;
///     __u32 capab;
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcPolice {
    /// Action index.
    pub index: u32,
    /// Exceed verdict.
    pub action: i32,
    /// Queue limit in bytes.
    pub limit: u32,
    /// Burst in ticks.
    pub burst: u32,
    /// Maximum packet size.
    pub mtu: u32,
    /// Policed rate.
    pub rate: TcRateSpec,
    /// Peak rate.
    pub peakrate: TcRateSpec,
    /// Reference count, reported by the kernel.
    pub refcnt: i32,
    /// Bind count, reported by the kernel.
    pub bindcnt: i32,
    /// Capabilities.
    pub capab: u32,
}

impl Record for TcPolice {
    const SIZE: usize = 2 * TcRateSpec::SIZE + 32;
    const NAME: &'static str = "tc_police";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.index);
        dst.put_i32_ne(self.action);
        dst.put_u32_ne(self.limit);
        dst.put_u32_ne(self.burst);
        dst.put_u32_ne(self.mtu);
        self.rate.put(dst);
        self.peakrate.put(dst);
        dst.put_i32_ne(self.refcnt);
        dst.put_i32_ne(self.bindcnt);
        dst.put_u32_ne(self.capab);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            index: src.get_u32_ne(),
            action: src.get_i32_ne(),
            limit: src.get_u32_ne(),
            burst: src.get_u32_ne(),
            mtu: src.get_u32_ne(),
            rate: TcRateSpec::get(src),
            peakrate: TcRateSpec::get(src),
            refcnt: src.get_i32_ne(),
            bindcnt: src.get_i32_ne(),
            capab: src.get_u32_ne(),
        }
    }
}
