//! Packs sub-word field edits into word-aligned [`PeditKey`]s.
//!
//! The kernel edits whole 32-bit words. A 1- or 2-byte field at `offset` is moved into the
//! word at `offset & !3`: value and kept-bits mask are shifted into the field's lane and the
//! rest of the word is marked as kept with a hole mask. Lanes are numbered from the most
//! significant byte because packed words go on the wire in network order.
//!
//! ```text
//! offset % 4    0           1           2           3
//! width 1    00FFFFFF    FF00FFFF    FFFF00FF    FFFFFF00
//! width 2    0000FFFF    FF0000FF    FFFF0000    (crosses word)
//! ```

use super::key::{EditKey, PeditKey, Width};
use super::selector::PeditSelector;
use crate::error::{Error, Result};

/// Hole masks for 2-byte fields, indexed by `offset % 4`.
const HOLES_U16: [u32; 3] = [0x0000_FFFF, 0xFF00_00FF, 0xFFFF_0000];

/// Hole masks for 1-byte fields, indexed by `offset % 4`.
const HOLES_U8: [u32; 4] = [0x00FF_FFFF, 0xFF00_FFFF, 0xFFFF_00FF, 0xFFFF_FF00];

/// Pack `key` according to its width and append it to `sel`.
///
/// Range is checked first ([`Error::OutOfRange`]), then alignment ([`Error::Misaligned`]),
/// then the selector's capacity and mode. Nothing is appended on error.
pub fn pack_key(sel: &mut PeditSelector, key: &EditKey) -> Result<()> {
    let packed = pack(key)?;
    sel.push(packed, key.ex())
}

/// Write a 6-byte hardware address at `key.offset` as two keys.
///
/// A word-aligned address is written as a full word followed by the upper half of the next
/// word. An address at `offset % 4 == 2` is written as the lower half of its word followed by
/// the full next word, which covers `offset..offset + 6`. Any other offset fails with
/// [`Error::Misaligned`]. `key.value`, `key.mask`, `key.width` and `key.retain` are
/// ignored; both keys are validated before either is appended.
pub fn pack_mac(sel: &mut PeditSelector, key: &EditKey, mac: [u8; 6]) -> Result<()> {
    let base = EditKey { mask: 0, retain: u32::MAX, ..*key };

    let (first, second) = match key.offset & 3 {
        0 => (
            EditKey {
                width: Width::U32,
                value: u32::from_be_bytes([mac[0], mac[1], mac[2], mac[3]]),
                ..base
            },
            EditKey {
                offset: next_word(key)?,
                width: Width::U16,
                value: u16::from_be_bytes([mac[4], mac[5]]).into(),
                ..base
            },
        ),
        2 => (
            EditKey {
                width: Width::U16,
                value: u16::from_be_bytes([mac[0], mac[1]]).into(),
                ..base
            },
            EditKey {
                offset: next_word(key)?,
                width: Width::U32,
                value: u32::from_be_bytes([mac[2], mac[3], mac[4], mac[5]]),
                ..base
            },
        ),
        _ => return Err(Error::Misaligned { offset: key.offset, width: 6 }),
    };

    let ex = key.ex();
    sel.push_keys(&[(pack(&first)?, ex), (pack(&second)?, ex)])
}

/// Offset of the word after the one holding `key.offset`.
fn next_word(key: &EditKey) -> Result<u32> {
    (key.offset & !3).checked_add(4).ok_or(Error::Misaligned { offset: key.offset, width: 6 })
}

/// Pack one edit into a word-aligned key without touching any selector.
pub fn pack(key: &EditKey) -> Result<PeditKey> {
    let packed = match key.width {
        Width::U32 => pack_word(key)?,
        Width::U16 => pack_lane(key, Width::U16)?,
        Width::U8 => pack_lane(key, Width::U8)?,
    };

    tracing::trace!(
        offset = key.offset,
        width = key.width.bytes(),
        off = packed.off,
        val = format_args!("{:#010x}", packed.val),
        mask = format_args!("{:#010x}", packed.mask),
        "packed pedit key"
    );

    Ok(packed)
}

fn pack_word(key: &EditKey) -> Result<PeditKey> {
    if key.offset % 4 != 0 {
        return Err(Error::Misaligned { offset: key.offset, width: 4 });
    }

    Ok(PeditKey {
        mask: key.mask | !key.retain,
        val: key.value & key.retain,
        off: key.offset,
        at: key.at,
        offmask: key.offmask,
        shift: key.shift,
    })
}

fn pack_lane(key: &EditKey, width: Width) -> Result<PeditKey> {
    let max = width.max_value();
    if key.value > max || key.mask > max {
        return Err(Error::OutOfRange { value: key.value, mask: key.mask, width: width.bytes() });
    }

    let index = key.offset & 3;
    let (stride, hole) = match width {
        Width::U16 if index == 3 => {
            return Err(Error::Misaligned { offset: key.offset, width: 2 });
        }
        Width::U16 => (8 * (2 - index), HOLES_U16[index as usize]),
        _ => (8 * (3 - index), HOLES_U8[index as usize]),
    };

    Ok(PeditKey {
        mask: ((key.mask | !key.retain) << stride) | hole,
        val: (key.value & key.retain) << stride,
        off: key.offset & !3,
        at: key.at,
        offmask: key.offmask,
        shift: key.shift,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedit::key::{EditCmd, HeaderType};
    use crate::pedit::selector::MAX_PEDIT_KEYS;
    use crate::record::Record;

    fn lane(offset: u32, width: Width, value: u32) -> EditKey {
        EditKey::new(offset, value).with_width(width)
    }

    #[test]
    fn test_word_scenario() {
        let mut sel = PeditSelector::new();
        pack_key(&mut sel, &EditKey::new(0, 0xAABB_CCDD)).unwrap();

        assert_eq!(sel.len(), 1);
        let bytes = sel.keys()[0].encode();
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_word_keeps_offset() {
        for offset in [0, 4, 8, 64, 1020] {
            let packed = pack(&EditKey::new(offset, 1)).unwrap();
            assert_eq!(packed.off, offset);
        }
        for offset in [1, 2, 3, 6] {
            assert_eq!(
                pack(&EditKey::new(offset, 1)),
                Err(Error::Misaligned { offset, width: 4 })
            );
        }
    }

    #[test]
    fn test_word_retain() {
        let key = EditKey::new(4, 0x1234_5678).with_mask(0x0000_0001).with_retain(0xFFFF_0000);
        let packed = pack(&key).unwrap();
        assert_eq!(packed.val, 0x1234_0000);
        assert_eq!(packed.mask, 0x0000_FFFF);
    }

    #[test]
    fn test_u16_lanes() {
        let packed = pack(&lane(0, Width::U16, 0xBEEF)).unwrap();
        assert_eq!((packed.off, packed.val, packed.mask), (0, 0xBEEF_0000, 0x0000_FFFF));

        let packed = pack(&lane(5, Width::U16, 0xBEEF)).unwrap();
        assert_eq!((packed.off, packed.val, packed.mask), (4, 0x00BE_EF00, 0xFF00_00FF));

        let packed = pack(&lane(2, Width::U16, 0xBEEF)).unwrap();
        assert_eq!((packed.off, packed.val, packed.mask), (0, 0x0000_BEEF, 0xFFFF_0000));

        assert_eq!(pack(&lane(3, Width::U16, 1)), Err(Error::Misaligned { offset: 3, width: 2 }));
    }

    #[test]
    fn test_u16_retain_complement() {
        let key = lane(2, Width::U16, 0xABCD).with_retain(0x00FF);
        let packed = pack(&key).unwrap();
        assert_eq!(packed.val, 0x0000_00CD);
        assert_eq!(packed.mask, 0xFFFF_FF00 | 0xFFFF_0000);
    }

    #[test]
    fn test_u8_lanes() {
        let holes = [0x00FF_FFFF, 0xFF00_FFFF, 0xFFFF_00FF, 0xFFFF_FF00];
        for (index, hole) in holes.into_iter().enumerate() {
            let offset = 8 + index as u32;
            let packed = pack(&lane(offset, Width::U8, 0x45)).unwrap();
            assert_eq!(packed.off, 8);
            assert_eq!(packed.mask, hole);
            assert_eq!(packed.val, 0x45u32 << (8 * (3 - index)));
        }
    }

    #[test]
    fn test_range() {
        assert_eq!(
            pack(&lane(0, Width::U8, 0x100)),
            Err(Error::OutOfRange { value: 0x100, mask: 0, width: 1 })
        );
        assert_eq!(
            pack(&lane(0, Width::U16, 0x1_0000)),
            Err(Error::OutOfRange { value: 0x1_0000, mask: 0, width: 2 })
        );
        assert_eq!(
            pack(&lane(0, Width::U8, 1).with_mask(0x1FF)),
            Err(Error::OutOfRange { value: 1, mask: 0x1FF, width: 1 })
        );
        // Range wins over alignment.
        assert!(matches!(pack(&lane(3, Width::U16, 0x1_0000)), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_mac_word_aligned() {
        let mac = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
        let mut sel = PeditSelector::new();
        pack_mac(&mut sel, &EditKey::new(0, 0), mac).unwrap();

        assert_eq!(sel.len(), 2);
        let keys = sel.keys();
        assert_eq!((keys[0].off, keys[0].val, keys[0].mask), (0, 0x0011_2233, 0));
        assert_eq!((keys[1].off, keys[1].val, keys[1].mask), (4, 0x4455_0000, 0x0000_FFFF));
    }

    #[test]
    fn test_mac_half_aligned() {
        let mac = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
        let mut sel = PeditSelector::new();
        pack_mac(&mut sel, &EditKey::new(6, 0), mac).unwrap();

        // Bytes 6..8 of the word at 4, then the whole word at 8.
        let keys = sel.keys();
        assert_eq!((keys[0].off, keys[0].val, keys[0].mask), (4, 0x0000_0011, 0xFFFF_0000));
        assert_eq!((keys[1].off, keys[1].val, keys[1].mask), (8, 0x2233_4455, 0));
    }

    #[test]
    fn test_mac_odd_offset() {
        let mut sel = PeditSelector::new();
        for offset in [1, 3, 5] {
            assert_eq!(
                pack_mac(&mut sel, &EditKey::new(offset, 0), [0; 6]),
                Err(Error::Misaligned { offset, width: 6 })
            );
        }
        assert!(sel.is_empty());
    }

    #[test]
    fn test_mac_needs_room_for_both() {
        let mut sel = PeditSelector::new();
        for _ in 0..MAX_PEDIT_KEYS - 1 {
            pack_key(&mut sel, &EditKey::new(0, 0)).unwrap();
        }
        assert_eq!(
            pack_mac(&mut sel, &EditKey::new(0, 0), [0; 6]),
            Err(Error::CapacityExceeded { capacity: MAX_PEDIT_KEYS })
        );
        assert_eq!(sel.len(), MAX_PEDIT_KEYS - 1);
    }

    #[test]
    fn test_full_selector() {
        let mut sel = PeditSelector::new();
        for i in 0..MAX_PEDIT_KEYS as u32 {
            pack_key(&mut sel, &EditKey::new(i * 4, i)).unwrap();
        }
        assert_eq!(
            pack_key(&mut sel, &EditKey::new(0, 0)),
            Err(Error::CapacityExceeded { capacity: MAX_PEDIT_KEYS })
        );
        assert_eq!(sel.len(), MAX_PEDIT_KEYS);
    }

    #[test]
    fn test_extended_mode() {
        let key = lane(9, Width::U8, 64).with_htype(HeaderType::Ip4);

        let mut legacy = PeditSelector::new();
        assert_eq!(
            pack_key(&mut legacy, &key),
            Err(Error::ExtendedModeRequired { htype: 2, cmd: 0 })
        );
        let add = EditKey::new(0, 1).with_cmd(EditCmd::Add);
        assert_eq!(
            pack_key(&mut legacy, &add),
            Err(Error::ExtendedModeRequired { htype: 0, cmd: 1 })
        );
        assert!(legacy.is_empty());

        let mut extended = PeditSelector::extended();
        pack_key(&mut extended, &key).unwrap();
        pack_key(&mut extended, &add).unwrap();
        assert_eq!(extended.keys()[0].off, 8);
        assert_eq!(extended.keys_ex()[0], key.ex());
        assert_eq!(extended.keys_ex()[1], add.ex());
    }

    #[test]
    fn test_pass_through_fields() {
        let key = EditKey { at: 12, offmask: 0x0F, shift: 2, ..lane(1, Width::U8, 7) };
        let packed = pack(&key).unwrap();
        assert_eq!((packed.at, packed.offmask, packed.shift), (12, 0x0F, 2));
    }
}
