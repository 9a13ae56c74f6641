//! Packet scheduler time base.
//!
//! Netem latency/jitter and TBF/HTB buffers are expressed in scheduler ticks. The kernel
//! exposes the tick rate in `/proc/net/psched` as four hex words: `t2us us2t clock
//! resolution`. The ratio of the first two is the number of ticks per microsecond.
//!
//! Reading the file is up to the caller; this module only interprets its contents.
//! Adapted from `iproute2/tc/tc_core.c`.

use crate::error::{Error, Result};

/// Path the kernel exposes the scheduler time base at.
pub const PSCHED_PATH: &str = "/proc/net/psched";

/// Ticks-per-microsecond conversion for one kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PschedClock {
    tick_in_usec: f64,
}

impl Default for PschedClock {
    /// One tick per microsecond.
    fn default() -> Self {
        Self { tick_in_usec: 1.0 }
    }
}

impl PschedClock {
    /// Build a clock from an explicit ticks-per-microsecond ratio.
    pub const fn new(tick_in_usec: f64) -> Self {
        Self { tick_in_usec }
    }

    /// Parse the contents of [`PSCHED_PATH`].
    pub fn parse(contents: &str) -> Result<Self> {
        let mut iter = contents.split_whitespace();
        let t2us = parse_hex_word(iter.next(), contents)?;
        let us2t = parse_hex_word(iter.next(), contents)?;
        if us2t == 0 {
            return Err(malformed(contents));
        }

        // Number of ticks within a microsecond.
        let tick_in_usec = t2us as f64 / us2t as f64;

        tracing::debug!(t2us, us2t, tick_in_usec, "parsed {PSCHED_PATH}");

        Ok(Self { tick_in_usec })
    }

    /// Ticks per microsecond.
    pub const fn tick_in_usec(&self) -> f64 {
        self.tick_in_usec
    }

    /// Convert microseconds to scheduler ticks.
    pub fn usec_to_ticks(&self, usec: u32) -> u32 {
        (usec as f64 * self.tick_in_usec) as u32
    }

    /// Convert scheduler ticks to microseconds.
    pub fn ticks_to_usec(&self, ticks: u32) -> u32 {
        (ticks as f64 / self.tick_in_usec).round() as u32
    }

    /// Burst size in ticks for a given rate, the `buffer` field of TBF and HTB.
    ///
    /// `buffer_ticks = burst_bytes * tick_in_usec * 1_000_000 / rate_bytes_per_sec`
    pub fn burst_to_ticks(&self, burst_bytes: u32, rate_bytes_per_sec: u32) -> u32 {
        if rate_bytes_per_sec == 0 {
            return 0;
        }
        (burst_bytes as f64 * self.tick_in_usec * 1_000_000.0 / rate_bytes_per_sec as f64) as u32
    }
}

fn parse_hex_word(word: Option<&str>, contents: &str) -> Result<u32> {
    word.and_then(|w| u32::from_str_radix(w, 16).ok()).ok_or_else(|| malformed(contents))
}

fn malformed(contents: &str) -> Error {
    Error::MalformedLiteral { kind: "psched", literal: contents.trim().to_string() }
}
