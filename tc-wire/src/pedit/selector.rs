//! The pedit selector: `tc_pedit_sel` head, up to [`MAX_PEDIT_KEYS`] packed keys and their
//! extended metadata.

use bytes::{Buf, BufMut, Bytes};

use super::key::{KeyEx, PeditKey, TCA_PEDIT_PARMS, TCA_PEDIT_PARMS_EX};
use crate::action::gen::TcGen;
use crate::error::{Error, Result};
use crate::record::{put_pad, Record};
use crate::variable::{decode_variable, encode_variable, CountedHead};

/// Most keys one pedit action carries (`MAX_OFFS`).
pub const MAX_PEDIT_KEYS: usize = 128;

/// The fixed head of the kernel's `tc_pedit_sel` structure.
///
/// ```c
/// struct tc_pedit_sel {
///     tc_gen;
///     unsigned char nkeys;
///     unsigned char flags;
///     struct tc_pedit_key keys[0];
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeditHeader {
    /// Generic action header.
    pub gen: TcGen,
    /// Number of keys that follow.
    pub nkeys: u8,
    /// Selector flags.
    pub flags: u8,
}

impl Record for PeditHeader {
    const SIZE: usize = TcGen::SIZE + 4;
    const NAME: &'static str = "tc_pedit_sel";

    fn put<B: BufMut>(&self, dst: &mut B) {
        self.gen.put(dst);
        dst.put_u8(self.nkeys);
        dst.put_u8(self.flags);
        put_pad(dst, 2);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        let gen = TcGen::get(src);
        let nkeys = src.get_u8();
        let flags = src.get_u8();
        src.advance(2);
        Self { gen, nkeys, flags }
    }
}

impl CountedHead for PeditHeader {
    const MAX_COUNT: usize = u8::MAX as usize;

    fn count(&self) -> usize {
        self.nkeys as usize
    }

    fn set_count(&mut self, count: usize) {
        self.nkeys = count as u8;
    }
}

/// Accumulates the keys of one pedit action.
///
/// Keys are only appended through [`PeditSelector::push`] and [`PeditSelector::push_keys`],
/// which validate every key before storing any, so a rejected call leaves the selector
/// untouched. In extended mode each key's [`KeyEx`] is stored at the key's index; legacy
/// selectors keep no extended metadata and reject keys that need it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeditSelector {
    gen: TcGen,
    flags: u8,
    keys: Vec<PeditKey>,
    keys_ex: Vec<KeyEx>,
    extended: bool,
}

impl PeditSelector {
    /// An empty legacy selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty extended-mode selector.
    pub fn extended() -> Self {
        Self { extended: true, ..Self::default() }
    }

    /// Switch between legacy and extended mode, keeping `keys_ex` parallel to `keys`.
    ///
    /// Enabling gives every stored key default metadata. Disabling fails with
    /// [`Error::ExtendedModeRequired`] if a stored key carries a header type or command a
    /// legacy selector cannot express; the selector is unchanged on error.
    pub fn set_extended(&mut self, extended: bool) -> Result<()> {
        if extended == self.extended {
            return Ok(());
        }

        if extended {
            self.keys_ex = vec![KeyEx::default(); self.keys.len()];
        } else {
            if let Some(ex) = self.keys_ex.iter().find(|ex| !ex.is_default()) {
                return Err(Error::ExtendedModeRequired {
                    htype: ex.htype as u16,
                    cmd: ex.cmd as u16,
                });
            }
            self.keys_ex.clear();
        }
        self.extended = extended;

        Ok(())
    }

    /// Set the verdict returned after the packet is edited.
    pub const fn with_action(mut self, action: i32) -> Self {
        self.gen.action = action;
        self
    }

    /// Set the action index.
    pub const fn with_index(mut self, index: u32) -> Self {
        self.gen.index = index;
        self
    }

    /// Set the selector flags.
    pub const fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Generic action header.
    pub const fn gen(&self) -> &TcGen {
        &self.gen
    }

    /// Selector flags.
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Whether keys may carry a header type and command.
    pub const fn is_extended(&self) -> bool {
        self.extended
    }

    /// Packed keys in insertion order.
    pub fn keys(&self) -> &[PeditKey] {
        &self.keys
    }

    /// Extended metadata, one entry per key in extended mode, empty otherwise.
    ///
    /// Emitted by the message assembler as [`TCA_PEDIT_KEYS_EX`](super::key::TCA_PEDIT_KEYS_EX).
    pub fn keys_ex(&self) -> &[KeyEx] {
        &self.keys_ex
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key has been added.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Attribute type the encoded selector is sent under.
    pub const fn parms_attr(&self) -> u16 {
        if self.extended {
            TCA_PEDIT_PARMS_EX
        } else {
            TCA_PEDIT_PARMS
        }
    }

    /// Append one packed key.
    pub fn push(&mut self, key: PeditKey, ex: KeyEx) -> Result<()> {
        self.push_keys(&[(key, ex)])
    }

    /// Append packed keys, all or none.
    ///
    /// Fails with [`Error::CapacityExceeded`] if the keys do not all fit, with
    /// [`Error::Misaligned`] if a key's offset is not a word boundary and with
    /// [`Error::ExtendedModeRequired`] if a legacy selector gets a non-default [`KeyEx`].
    pub fn push_keys(&mut self, keys: &[(PeditKey, KeyEx)]) -> Result<()> {
        if self.keys.len() + keys.len() > MAX_PEDIT_KEYS {
            return Err(Error::CapacityExceeded { capacity: MAX_PEDIT_KEYS });
        }

        for (key, ex) in keys {
            if key.off % 4 != 0 {
                return Err(Error::Misaligned { offset: key.off, width: 4 });
            }
            if !self.extended && !ex.is_default() {
                return Err(Error::ExtendedModeRequired {
                    htype: ex.htype as u16,
                    cmd: ex.cmd as u16,
                });
            }
        }

        for (key, ex) in keys {
            self.keys.push(*key);
            if self.extended {
                self.keys_ex.push(*ex);
            }
        }

        Ok(())
    }

    /// Serialize the head followed by every key, `24 + 24 * nkeys` bytes.
    pub fn encode(&self) -> Result<Bytes> {
        let header = PeditHeader { gen: self.gen, nkeys: 0, flags: self.flags };
        let bytes = encode_variable(&header, &self.keys, MAX_PEDIT_KEYS)?;
        tracing::debug!(
            nkeys = self.keys.len(),
            extended = self.extended,
            len = bytes.len(),
            "encoded pedit selector"
        );
        Ok(bytes)
    }

    /// Deserialize a selector and the keys its head declares.
    ///
    /// The result is a legacy selector: extended metadata travels in a separate attribute.
    pub fn decode(src: &[u8]) -> Result<Self> {
        let (header, keys) = decode_variable::<PeditHeader, PeditKey>(src, MAX_PEDIT_KEYS)?;
        Ok(Self {
            gen: header.gen,
            flags: header.flags,
            keys,
            keys_ex: Vec::new(),
            extended: false,
        })
    }
}
