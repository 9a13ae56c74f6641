//! Variable-length record codec.
//!
//! Some kernel structures end in a zero-length array (`struct tc_u32_key keys[0]`) whose
//! element count lives in a scalar field of the fixed head. On the wire the head is followed
//! directly by that many fixed-size sub-records.
//!
//! ```text
//! ┌───────────────────────────┬──────────┬──────────┬─────┬──────────┐
//! │  head (count = n)         │  sub 0   │  sub 1   │ ... │  sub n-1 │
//! └───────────────────────────┴──────────┴──────────┴─────┴──────────┘
//!   H::SIZE                     S::SIZE each
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};
use crate::record::{ensure_len, Record};

/// A fixed record head carrying the element count of the array that follows it.
pub trait CountedHead: Record {
    /// Largest count the head's count field can express.
    const MAX_COUNT: usize;

    /// The declared number of trailing sub-records.
    fn count(&self) -> usize;

    /// Set the declared number of trailing sub-records.
    ///
    /// Only called with `count <= Self::MAX_COUNT`.
    fn set_count(&mut self, count: usize);
}

/// Total serialized size of a head with `count` trailing sub-records.
pub const fn variable_len<H: CountedHead, S: Record>(count: usize) -> usize {
    H::SIZE + count * S::SIZE
}

/// Write `head` with its count set to `subs.len()`, followed by every sub-record.
///
/// Fails with [`Error::CapacityExceeded`] when `subs` holds more entries than `capacity` or
/// than the head's count field can express.
pub fn encode_variable<H, S>(head: &H, subs: &[S], capacity: usize) -> Result<Bytes>
where
    H: CountedHead + Clone,
    S: Record,
{
    let capacity = capacity.min(H::MAX_COUNT);
    if subs.len() > capacity {
        return Err(Error::CapacityExceeded { capacity });
    }

    let mut head = head.clone();
    head.set_count(subs.len());

    let mut buf = BytesMut::with_capacity(variable_len::<H, S>(subs.len()));
    put_variable(&mut buf, &head, subs);
    Ok(buf.freeze())
}

/// Write a head and its sub-records without checks; the head's count must already match.
pub(crate) fn put_variable<B: BufMut, H: Record, S: Record>(dst: &mut B, head: &H, subs: &[S]) {
    head.put(dst);
    for sub in subs {
        sub.put(dst);
    }
}

/// Read a head and exactly as many sub-records as it declares.
///
/// Fails with [`Error::Truncated`] if the head, or any declared sub-record, does not fit in
/// `src`, and with [`Error::CapacityExceeded`] if the declared count is above `capacity`.
pub fn decode_variable<H, S>(src: &[u8], capacity: usize) -> Result<(H, Vec<S>)>
where
    H: CountedHead,
    S: Record,
{
    let head = H::decode(src)?;
    let count = head.count();
    let capacity = capacity.min(H::MAX_COUNT);
    if count > capacity {
        return Err(Error::CapacityExceeded { capacity });
    }

    let mut rest = &src[H::SIZE..];
    ensure_len(S::NAME, count * S::SIZE, rest.len())?;

    let mut subs = Vec::with_capacity(count);
    for _ in 0..count {
        subs.push(S::get(&mut rest));
    }

    Ok((head, subs))
}

#[cfg(test)]
mod tests {
    use bytes::Buf;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Head {
        n: u8,
        tag: u8,
    }

    impl Record for Head {
        const SIZE: usize = 2;
        const NAME: &'static str = "head";

        fn put<B: BufMut>(&self, dst: &mut B) {
            dst.put_u8(self.n);
            dst.put_u8(self.tag);
        }

        fn get<B: Buf>(src: &mut B) -> Self {
            Self { n: src.get_u8(), tag: src.get_u8() }
        }
    }

    impl CountedHead for Head {
        const MAX_COUNT: usize = 3;

        fn count(&self) -> usize {
            self.n as usize
        }

        fn set_count(&mut self, count: usize) {
            self.n = count as u8;
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Word(u32);

    impl Record for Word {
        const SIZE: usize = 4;
        const NAME: &'static str = "word";

        fn put<B: BufMut>(&self, dst: &mut B) {
            dst.put_u32(self.0);
        }

        fn get<B: Buf>(src: &mut B) -> Self {
            Self(src.get_u32())
        }
    }

    #[test]
    fn test_count_is_written_from_subs() {
        let head = Head { n: 0, tag: 7 };
        let bytes = encode_variable(&head, &[Word(1), Word(2)], 3).unwrap();
        assert_eq!(bytes.as_ref(), &[2, 7, 0, 0, 0, 1, 0, 0, 0, 2]);
        assert_eq!(bytes.len(), variable_len::<Head, Word>(2));

        let (decoded, subs): (Head, Vec<Word>) = decode_variable(&bytes, 3).unwrap();
        assert_eq!(decoded, Head { n: 2, tag: 7 });
        assert_eq!(subs, vec![Word(1), Word(2)]);
    }

    #[test]
    fn test_capacity() {
        let head = Head { n: 0, tag: 0 };
        let subs = [Word(0); 3];
        assert_eq!(encode_variable(&head, &subs, 2), Err(Error::CapacityExceeded { capacity: 2 }));
        // The count field bounds the capacity even when the caller allows more.
        let subs = [Word(0); 4];
        assert_eq!(
            encode_variable(&head, &subs, 100),
            Err(Error::CapacityExceeded { capacity: 3 })
        );
    }

    #[test]
    fn test_declared_keys_missing() {
        let raw = [2u8, 0, 0, 0, 0, 1, 0, 0];
        let err = decode_variable::<Head, Word>(&raw, 3).unwrap_err();
        assert_eq!(err, Error::Truncated { record: "word", expected: 8, actual: 6 });

        let err = decode_variable::<Head, Word>(&[1], 3).unwrap_err();
        assert_eq!(err, Error::Truncated { record: "head", expected: 2, actual: 1 });
    }

    #[test]
    fn test_declared_count_above_capacity() {
        let raw = [3u8, 0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3];
        let err = decode_variable::<Head, Word>(&raw, 2).unwrap_err();
        assert_eq!(err, Error::CapacityExceeded { capacity: 2 });
    }
}
