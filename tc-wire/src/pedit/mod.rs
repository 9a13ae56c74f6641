//! The packet editor (`pedit`) action.
//!
//! A pedit action rewrites packet bytes through 32-bit word edits. Callers describe each
//! field edit as an [`EditKey`] (or as a textual [`PeditCommand`]), the [`pack`] functions
//! align it to a word and [`PeditSelector`] collects the results for `TCA_PEDIT_PARMS` or,
//! in extended mode, `TCA_PEDIT_PARMS_EX` plus `TCA_PEDIT_KEYS_EX`.
//!
//! ```
//! use tc_wire::action::verdict::TC_ACT_PIPE;
//! use tc_wire::pedit::{parse_command, EditKey, PeditCommand, PeditSelector, ValueType};
//!
//! let mut sel = PeditSelector::new().with_action(TC_ACT_PIPE);
//!
//! // ip ttl set 64: one byte at offset 8 of the IPv4 header.
//! let cmd = PeditCommand::new("ip ttl", "set", "64");
//! let key = EditKey { offset: 8, ..Default::default() };
//! parse_command(&cmd, 1, ValueType::Int, 0xFF, &mut sel, key).unwrap();
//!
//! assert_eq!(sel.keys()[0].mask, 0x00FF_FFFF);
//! assert_eq!(sel.encode().unwrap().len(), 48);
//! ```

pub mod command;
pub mod key;
pub mod pack;
pub mod selector;

pub use command::{parse_command, parse_mac, PeditCommand, ValueType};
pub use key::{EditCmd, EditKey, HeaderType, KeyEx, PeditKey, Width};
pub use pack::{pack, pack_key, pack_mac};
pub use selector::{PeditHeader, PeditSelector, MAX_PEDIT_KEYS};

/// Pedit action kind id.
pub const TCA_ACT_PEDIT: u16 = 7;
