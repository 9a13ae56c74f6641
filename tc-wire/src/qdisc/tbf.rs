//! Token Bucket Filter (TBF) qdisc parameters.
//!
//! TBF implements a rate limiter: tokens accumulate at `rate`, each byte sent consumes one,
//! `buffer` bounds how many can accumulate and `limit` bounds the bytes queued waiting for
//! tokens.

use bytes::{Buf, BufMut};

use super::rate::TcRateSpec;
use crate::clock::PschedClock;
use crate::record::Record;

/// TBF parameters attribute type.
pub const TCA_TBF_PARMS: u16 = 1;
/// TBF rate table attribute type.
pub const TCA_TBF_RTAB: u16 = 2;
/// TBF peak rate table attribute type.
pub const TCA_TBF_PTAB: u16 = 3;
/// 64-bit rate attribute type.
pub const TCA_TBF_RATE64: u16 = 4;
/// 64-bit peak rate attribute type.
pub const TCA_TBF_PRATE64: u16 = 5;
/// Burst size in bytes.
pub const TCA_TBF_BURST: u16 = 6;
/// Peak burst size in bytes.
pub const TCA_TBF_PBURST: u16 = 7;

/// The kernel's `tc_tbf_qopt` structure.
///
/// ```c
/// struct tc_tbf_qopt {
///     struct tc_ratespec rate;
///     struct tc_ratespec peakrate;
///     __u32 limit;     /* bytes */
///     __u32 buffer;    /* ticks */
///     __u32 mtu;
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcTbfQopt {
    /// The rate limit.
    pub rate: TcRateSpec,
    /// Peak rate, zeroed when unused.
    pub peakrate: TcRateSpec,
    /// Maximum bytes queued waiting for tokens.
    pub limit: u32,
    /// Burst size in scheduler ticks.
    pub buffer: u32,
    /// Maximum transmission unit.
    pub mtu: u32,
}

impl TcTbfQopt {
    /// Parameters for a `rate` limit with a `burst` and queue `limit` in bytes.
    pub fn new(
        clock: &PschedClock,
        rate_bytes_per_sec: u32,
        burst_bytes: u32,
        limit_bytes: u32,
        mtu: u32,
    ) -> Self {
        Self {
            rate: TcRateSpec::new(rate_bytes_per_sec, mtu),
            peakrate: TcRateSpec::default(),
            limit: limit_bytes,
            buffer: clock.burst_to_ticks(burst_bytes, rate_bytes_per_sec),
            mtu,
        }
    }
}

impl Record for TcTbfQopt {
    const SIZE: usize = 2 * TcRateSpec::SIZE + 12;
    const NAME: &'static str = "tc_tbf_qopt";

    fn put<B: BufMut>(&self, dst: &mut B) {
        self.rate.put(dst);
        self.peakrate.put(dst);
        dst.put_u32_ne(self.limit);
        dst.put_u32_ne(self.buffer);
        dst.put_u32_ne(self.mtu);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            rate: TcRateSpec::get(src),
            peakrate: TcRateSpec::get(src),
            limit: src.get_u32_ne(),
            buffer: src.get_u32_ne(),
            mtu: src.get_u32_ne(),
        }
    }
}
