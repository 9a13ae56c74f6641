//! Binary codec for the Linux Traffic Control (TC) netlink structures.
//!
//! Converts between the fixed-layout structures the kernel expects inside TC attributes and
//! typed values, and packs `pedit` field edits into the word-aligned keys the kernel applies.
//! Attribute framing, sockets and message dispatch are left to the caller.
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`record`]    | [`Record`], the fixed-layout codec every structure implements     |
//! | [`variable`]  | head + counted trailing array (`tc_u32_sel`, `tc_pedit_sel`)      |
//! | [`msg`]       | `tcmsg` / `tcamsg` headers and top-level attribute types          |
//! | [`qdisc`]     | prio, tbf, netem, htb and hfsc parameters                         |
//! | [`action`]    | generic, mirred, tunnel key and police action parameters          |
//! | [`filter`]    | the u32 classifier selector                                       |
//! | [`pedit`]     | pedit keys, selector, key packer and command parser               |
//! | [`handle`]    | major:minor handle helpers                                        |
//! | [`clock`]     | scheduler tick conversion                                         |
//!
//! Host-order fields are written in the target's native byte order, matching the kernel's
//! in-memory layout; fields the kernel declares big-endian are always written big-endian.
//!
//! ```
//! use tc_wire::filter::TcU32Sel;
//! use tc_wire::record::Record;
//! use tc_wire::qdisc::TcHtbGlob;
//!
//! let glob = TcHtbGlob::default();
//! assert_eq!(glob.encode().len(), 20);
//!
//! let sel = TcU32Sel::catch_all().encode().unwrap();
//! assert_eq!(sel.len(), 32);
//! ```

#![doc(issue_tracker_base_url = "https://github.com/chainbound/msg-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod action;
pub mod clock;
pub mod error;
pub mod filter;
pub mod handle;
pub mod msg;
pub mod pedit;
pub mod qdisc;
pub mod record;
pub mod variable;

pub use error::{Error, Result};
pub use record::{decode_record, encode_record, Record};
pub use variable::{decode_variable, encode_variable, CountedHead};
