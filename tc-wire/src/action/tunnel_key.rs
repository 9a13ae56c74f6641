//! Tunnel key (`tunnel_key`) action parameters.
//!
//! The parameters only select set or release; the tunnel metadata itself travels in separate
//! attributes whose payloads are network order (`__be32` addresses, `__be64` key id,
//! `__be16` port), see [`TunnelKeyEncap`].

use std::net::Ipv4Addr;

use bytes::{Buf, BufMut, Bytes};

use super::gen::TcGen;
use crate::record::Record;

/// Tunnel key timestamp attribute type.
pub const TCA_TUNNEL_KEY_TM: u16 = 1;
/// Tunnel key parameters attribute type.
pub const TCA_TUNNEL_KEY_PARMS: u16 = 2;
/// Encapsulation IPv4 source, be32.
pub const TCA_TUNNEL_KEY_ENC_IPV4_SRC: u16 = 3;
/// Encapsulation IPv4 destination, be32.
pub const TCA_TUNNEL_KEY_ENC_IPV4_DST: u16 = 4;
/// Encapsulation IPv6 source, `struct in6_addr`.
pub const TCA_TUNNEL_KEY_ENC_IPV6_SRC: u16 = 5;
/// Encapsulation IPv6 destination, `struct in6_addr`.
pub const TCA_TUNNEL_KEY_ENC_IPV6_DST: u16 = 6;
/// Encapsulation key id, be32.
pub const TCA_TUNNEL_KEY_ENC_KEY_ID: u16 = 7;
/// Padding attribute type.
pub const TCA_TUNNEL_KEY_PAD: u16 = 8;
/// Encapsulation UDP destination port, be16.
pub const TCA_TUNNEL_KEY_ENC_DST_PORT: u16 = 9;
/// Disable the UDP checksum, u8.
pub const TCA_TUNNEL_KEY_NO_CSUM: u16 = 10;

/// `t_action` value that sets tunnel metadata.
pub const TCA_TUNNEL_KEY_ACT_SET: i32 = 1;
/// `t_action` value that releases tunnel metadata.
pub const TCA_TUNNEL_KEY_ACT_RELEASE: i32 = 2;

/// The kernel's `tc_tunnel_key` structure.
///
/// ```c
/// struct tc_tunnel_key {
///     tc_gen;
///     int t_action;
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcTunnelKey {
    /// Generic action header.
    pub gen: TcGen,
    /// Set or release.
    pub t_action: i32,
}

impl Record for TcTunnelKey {
    const SIZE: usize = TcGen::SIZE + 4;
    const NAME: &'static str = "tc_tunnel_key";

    fn put<B: BufMut>(&self, dst: &mut B) {
        self.gen.put(dst);
        dst.put_i32_ne(self.t_action);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self { gen: TcGen::get(src), t_action: src.get_i32_ne() }
    }
}

/// Encapsulation metadata sent next to a [`TcTunnelKey`] set action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelKeyEncap {
    /// Outer source address.
    pub src: Ipv4Addr,
    /// Outer destination address.
    pub dst: Ipv4Addr,
    /// Tunnel key id (VNI). The kernel reads this attribute as a be32.
    pub key_id: u32,
    /// Outer UDP destination port.
    pub dst_port: u16,
}

impl TunnelKeyEncap {
    /// `(attribute type, network-order payload)` pairs for the message assembler.
    pub fn attributes(&self) -> [(u16, Bytes); 4] {
        [
            (TCA_TUNNEL_KEY_ENC_IPV4_SRC, Bytes::copy_from_slice(&self.src.octets())),
            (TCA_TUNNEL_KEY_ENC_IPV4_DST, Bytes::copy_from_slice(&self.dst.octets())),
            (TCA_TUNNEL_KEY_ENC_KEY_ID, Bytes::copy_from_slice(&self.key_id.to_be_bytes())),
            (TCA_TUNNEL_KEY_ENC_DST_PORT, Bytes::copy_from_slice(&self.dst_port.to_be_bytes())),
        ]
    }
}
