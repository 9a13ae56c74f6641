//! Netem (network emulator) qdisc parameters.
//!
//! `tc_netem_qopt` is sent as the head of `TCA_OPTIONS`; the correlation, reorder and
//! corrupt structures follow as nested attributes.

use bytes::{Buf, BufMut};

use crate::clock::PschedClock;
use crate::record::Record;

/// Correlation attribute type.
pub const TCA_NETEM_CORR: u16 = 1;
/// Delay distribution table attribute type.
pub const TCA_NETEM_DELAY_DIST: u16 = 2;
/// Reorder attribute type.
pub const TCA_NETEM_REORDER: u16 = 3;
/// Corruption attribute type.
pub const TCA_NETEM_CORRUPT: u16 = 4;
/// Loss model attribute type.
pub const TCA_NETEM_LOSS: u16 = 5;
/// Rate attribute type.
pub const TCA_NETEM_RATE: u16 = 6;
/// ECN marking attribute type.
pub const TCA_NETEM_ECN: u16 = 7;
/// 64-bit rate attribute type.
pub const TCA_NETEM_RATE64: u16 = 8;

/// Netem's default queue limit in packets.
pub const DEFAULT_NETEM_LIMIT: u32 = 1_000;

/// Convert a percentage (0-100) to the kernel's probability scale, where
/// [`u32::MAX`] is 100%.
pub fn probability(percent: f64) -> u32 {
    (percent.clamp(0.0, 100.0) / 100.0 * u32::MAX as f64) as u32
}

/// The kernel's `tc_netem_qopt` structure.
///
/// ```c
/// struct tc_netem_qopt {
///     __u32 latency;   /* added delay (ticks) */
///     __u32 limit;     /* fifo limit (packets) */
///     __u32 loss;      /* random packet loss (0=none ~0=100%) */
///     __u32 gap;       /* re-ordering gap (0 for none) */
///     __u32 duplicate; /* random packet dup (0=none ~0=100%) */
///     __u32 jitter;    /* random jitter in latency (ticks) */
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcNetemQopt {
    /// Latency in scheduler ticks.
    pub latency: u32,
    /// Maximum packets in queue.
    pub limit: u32,
    /// Loss probability, scaled to the u32 range.
    pub loss: u32,
    /// Reordering gap.
    pub gap: u32,
    /// Duplication probability, scaled to the u32 range.
    pub duplicate: u32,
    /// Jitter in scheduler ticks.
    pub jitter: u32,
}

impl Default for TcNetemQopt {
    fn default() -> Self {
        Self { latency: 0, limit: DEFAULT_NETEM_LIMIT, loss: 0, gap: 0, duplicate: 0, jitter: 0 }
    }
}

impl TcNetemQopt {
    /// Set latency and jitter from microseconds.
    pub fn with_delay(mut self, clock: &PschedClock, latency_usec: u32, jitter_usec: u32) -> Self {
        self.latency = clock.usec_to_ticks(latency_usec);
        self.jitter = clock.usec_to_ticks(jitter_usec);
        self
    }

    /// Set the loss probability from a percentage.
    pub fn with_loss(mut self, percent: f64) -> Self {
        self.loss = probability(percent);
        self
    }

    /// Set the duplication probability from a percentage.
    pub fn with_duplicate(mut self, percent: f64) -> Self {
        self.duplicate = probability(percent);
        self
    }
}

impl Record for TcNetemQopt {
    const SIZE: usize = 24;
    const NAME: &'static str = "tc_netem_qopt";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.latency);
        dst.put_u32_ne(self.limit);
        dst.put_u32_ne(self.loss);
        dst.put_u32_ne(self.gap);
        dst.put_u32_ne(self.duplicate);
        dst.put_u32_ne(self.jitter);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            latency: src.get_u32_ne(),
            limit: src.get_u32_ne(),
            loss: src.get_u32_ne(),
            gap: src.get_u32_ne(),
            duplicate: src.get_u32_ne(),
            jitter: src.get_u32_ne(),
        }
    }
}

/// The kernel's `tc_netem_corr` structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcNetemCorr {
    /// Delay correlation.
    pub delay_corr: u32,
    /// Packet loss correlation.
    pub loss_corr: u32,
    /// Duplicate correlation.
    pub dup_corr: u32,
}

impl Record for TcNetemCorr {
    const SIZE: usize = 12;
    const NAME: &'static str = "tc_netem_corr";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.delay_corr);
        dst.put_u32_ne(self.loss_corr);
        dst.put_u32_ne(self.dup_corr);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            delay_corr: src.get_u32_ne(),
            loss_corr: src.get_u32_ne(),
            dup_corr: src.get_u32_ne(),
        }
    }
}

/// The kernel's `tc_netem_reorder` structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcNetemReorder {
    /// Reorder probability.
    pub probability: u32,
    /// Reorder correlation.
    pub correlation: u32,
}

impl Record for TcNetemReorder {
    const SIZE: usize = 8;
    const NAME: &'static str = "tc_netem_reorder";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.probability);
        dst.put_u32_ne(self.correlation);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self { probability: src.get_u32_ne(), correlation: src.get_u32_ne() }
    }
}

/// The kernel's `tc_netem_corrupt` structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcNetemCorrupt {
    /// Corruption probability.
    pub probability: u32,
    /// Corruption correlation.
    pub correlation: u32,
}

impl Record for TcNetemCorrupt {
    const SIZE: usize = 8;
    const NAME: &'static str = "tc_netem_corrupt";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.probability);
        dst.put_u32_ne(self.correlation);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self { probability: src.get_u32_ne(), correlation: src.get_u32_ne() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::{assert_bytes_round_trip, assert_rejects_short, assert_round_trip};

    #[test]
    fn test_probability() {
        assert_eq!(probability(0.0), 0);
        assert_eq!(probability(100.0), u32::MAX);
        assert_eq!(probability(250.0), u32::MAX);
        assert_eq!(probability(50.0), u32::MAX / 2);
    }

    #[test]
    fn test_netem_qopt() {
        let clock = PschedClock::new(1.0);
        let qopt = TcNetemQopt::default().with_delay(&clock, 100_000, 10_000).with_loss(1.0);
        assert_eq!(qopt.latency, 100_000);
        assert_eq!(qopt.jitter, 10_000);
        assert_eq!(qopt.limit, DEFAULT_NETEM_LIMIT);

        let bytes = qopt.encode();
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], &100_000u32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &1_000u32.to_ne_bytes());
        assert_eq!(&bytes[20..24], &10_000u32.to_ne_bytes());

        assert_round_trip(&qopt);
    }

    #[test]
    fn test_netem_records() {
        assert_round_trip(&TcNetemCorr { delay_corr: 1, loss_corr: 2, dup_corr: 3 });
        assert_round_trip(&TcNetemReorder { probability: u32::MAX, correlation: 7 });
        assert_round_trip(&TcNetemCorrupt { probability: 9, correlation: 0 });

        assert_bytes_round_trip::<TcNetemQopt>(&[]);
        assert_bytes_round_trip::<TcNetemCorr>(&[]);
        assert_bytes_round_trip::<TcNetemReorder>(&[]);
        assert_bytes_round_trip::<TcNetemCorrupt>(&[]);

        assert_rejects_short::<TcNetemQopt>();
        assert_rejects_short::<TcNetemCorr>();
        assert_rejects_short::<TcNetemReorder>();
        assert_rejects_short::<TcNetemCorrupt>();
    }
}
