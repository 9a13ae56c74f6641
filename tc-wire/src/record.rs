//! Fixed-layout record codec.
//!
//! Every structure the kernel exchanges in a TC attribute has a fixed size and a field order
//! dictated by `<linux/pkt_sched.h>`, `<linux/pkt_cls.h>` and `<linux/tc_act/*.h>`. Records
//! are written and read field by field; nothing here relies on the Rust memory layout of the
//! types, so padding and alignment follow the kernel ABI rather than `repr(Rust)`.
//!
//! Host-order fields use the `*_ne` accessors of [`bytes`], which produce the same bytes the
//! kernel keeps in memory on the build target. Fields the kernel declares `__be16`/`__be32`
//! use the plain big-endian accessors.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};

/// A kernel structure with a fixed serialized size.
pub trait Record: Sized {
    /// Serialized size in bytes.
    const SIZE: usize;

    /// Kernel name of the structure, used in error messages.
    const NAME: &'static str;

    /// Write exactly [`Self::SIZE`] bytes to `dst`.
    fn put<B: BufMut>(&self, dst: &mut B);

    /// Read exactly [`Self::SIZE`] bytes from `src`.
    ///
    /// Callers must make sure `src` holds at least [`Self::SIZE`] bytes; [`Record::decode`]
    /// does this before delegating here.
    fn get<B: Buf>(src: &mut B) -> Self;

    /// Serialize into a new buffer of exactly [`Self::SIZE`] bytes.
    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        self.put(&mut buf);
        debug_assert_eq!(buf.len(), Self::SIZE, "{} wrote a wrong number of bytes", Self::NAME);
        buf.freeze()
    }

    /// Deserialize from the start of `src`. Trailing bytes are ignored.
    fn decode(src: &[u8]) -> Result<Self> {
        ensure_len(Self::NAME, Self::SIZE, src.len())?;
        let mut head = &src[..Self::SIZE];
        Ok(Self::get(&mut head))
    }
}

/// Serialize any fixed-layout record.
pub fn encode_record<R: Record>(record: &R) -> Bytes {
    record.encode()
}

/// Deserialize any fixed-layout record from the start of `src`.
pub fn decode_record<R: Record>(src: &[u8]) -> Result<R> {
    R::decode(src)
}

/// Fail with [`Error::Truncated`] unless `actual >= expected`.
pub(crate) fn ensure_len(record: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual < expected {
        return Err(Error::Truncated { record, expected, actual });
    }
    Ok(())
}

/// Write `n` zero bytes of padding.
pub(crate) fn put_pad<B: BufMut>(dst: &mut B, n: usize) {
    dst.put_bytes(0, n);
}
