//! PRIO qdisc parameters.

use bytes::{Buf, BufMut};

use crate::record::Record;

/// Highest logical priority, the priomap has `TC_PRIO_MAX + 1` entries.
pub const TC_PRIO_MAX: usize = 15;

/// `TCA_PRIO_MQ`, nested after the `tc_prio_qopt` in `TCA_OPTIONS`.
pub const TCA_PRIO_MQ: u16 = 1;

/// Number of bands `tc qdisc add ... prio` creates by default.
pub const DEFAULT_PRIORITY_BANDS: i32 = 3;

/// The priomap `tc` installs by default.
pub const DEFAULT_PRIORITY_MAP: [u8; TC_PRIO_MAX + 1] =
    [1, 2, 2, 2, 1, 2, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1];

/// The kernel's `tc_prio_qopt` structure.
///
/// ```c
/// struct tc_prio_qopt {
///     int bands;
///     __u8 priomap[TC_PRIO_MAX+1];
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcPrioMap {
    /// Number of bands.
    pub bands: i32,
    /// Logical priority to band.
    pub priomap: [u8; TC_PRIO_MAX + 1],
}

impl Default for TcPrioMap {
    fn default() -> Self {
        Self { bands: DEFAULT_PRIORITY_BANDS, priomap: DEFAULT_PRIORITY_MAP }
    }
}

impl Record for TcPrioMap {
    const SIZE: usize = 20;
    const NAME: &'static str = "tc_prio_qopt";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_i32_ne(self.bands);
        dst.put_slice(&self.priomap);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        let bands = src.get_i32_ne();
        let mut priomap = [0u8; TC_PRIO_MAX + 1];
        src.copy_to_slice(&mut priomap);
        Self { bands, priomap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::{assert_bytes_round_trip, assert_rejects_short, assert_round_trip};

    #[test]
    fn test_prio_map() {
        let map = TcPrioMap::default();
        let bytes = map.encode();
        assert_eq!(bytes.len(), 20);
        assert_eq!(&bytes[0..4], &3i32.to_ne_bytes());
        assert_eq!(&bytes[4..], &DEFAULT_PRIORITY_MAP);

        assert_round_trip(&map);
        assert_bytes_round_trip::<TcPrioMap>(&[]);
        assert_rejects_short::<TcPrioMap>();
    }
}
