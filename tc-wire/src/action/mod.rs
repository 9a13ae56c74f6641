//! Action parameter records.
//!
//! Each action is sent as an entry of `TCA_ACT_TAB` with its kind string and a
//! `TCA_ACT_OPTIONS` nest whose `*_PARMS` attribute holds the record below. The packet
//! editor (`pedit`) lives in [`crate::pedit`].

pub mod gen;
pub mod mirred;
pub mod police;
pub mod tunnel_key;

pub use gen::{verdict, TcGen};
pub use mirred::TcMirred;
pub use police::TcPolice;
pub use tunnel_key::{TcTunnelKey, TunnelKeyEncap};
