//! Turns a textual pedit command (`<field> set|add <value>`) into packed keys.

use std::net::Ipv4Addr;

use super::key::{EditCmd, EditKey, Width};
use super::pack::{pack_key, pack_mac};
use super::selector::PeditSelector;
use crate::error::{Error, Result};

/// A textual edit as written on a `tc ... action pedit munge` command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeditCommand {
    /// Target field identifier, e.g. `ip ttl` or `eth dst`.
    pub key: String,
    /// `set` or `add`.
    pub action: String,
    /// Literal value.
    pub value: String,
}

impl PeditCommand {
    /// Create a new command.
    pub fn new(
        key: impl Into<String>,
        action: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self { key: key.into(), action: action.into(), value: value.into() }
    }
}

/// How the literal of a [`PeditCommand`] is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Dotted-quad IPv4 address; the first octet ends up most significant.
    Ipv4,
    /// Signed or unsigned decimal that fits 32 bits. Negative values wrap.
    Int,
    /// Unsigned decimal up to `u32::MAX`.
    U32,
    /// 6-byte hardware address, packed as two keys regardless of width.
    Mac,
}

impl ValueType {
    /// Name used in [`Error::MalformedLiteral`].
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Int => "int",
            Self::U32 => "u32",
            Self::Mac => "mac",
        }
    }
}

/// Parse `cmd` and pack the resulting edit into `sel`.
///
/// `key` supplies the offset, header type and pass-through fields of the target; its value,
/// width, retain mask and command are taken from the other arguments. The command is `add`
/// if `cmd.action` is `"add"` and `set` otherwise.
///
/// # Errors
///
/// [`Error::MissingField`] for an empty field identifier, [`Error::MalformedLiteral`] when
/// the value does not parse as `value_type`, [`Error::InvalidWidth`] for widths other than
/// 1, 2 or 4 (hardware addresses ignore the width), and any error of [`pack_key`] or
/// [`pack_mac`]. The selector is unchanged on error.
pub fn parse_command(
    cmd: &PeditCommand,
    width: u32,
    value_type: ValueType,
    retain: u32,
    sel: &mut PeditSelector,
    key: EditKey,
) -> Result<()> {
    apply(cmd, width, value_type, retain, sel, key).inspect_err(|e| {
        tracing::debug!(?e, field = %cmd.key, value = %cmd.value, "rejected pedit command")
    })
}

fn apply(
    cmd: &PeditCommand,
    width: u32,
    value_type: ValueType,
    retain: u32,
    sel: &mut PeditSelector,
    key: EditKey,
) -> Result<()> {
    if cmd.key.is_empty() {
        return Err(Error::MissingField);
    }

    let edit_cmd = if cmd.action == "add" { EditCmd::Add } else { EditCmd::Set };
    let mut key = EditKey { cmd: edit_cmd, retain, ..key };

    key.value = match value_type {
        ValueType::Mac => return pack_mac(sel, &key, parse_mac(&cmd.value)?),
        ValueType::Ipv4 => parse_ipv4(&cmd.value)?,
        ValueType::Int => parse_int(&cmd.value)?,
        ValueType::U32 => parse_u32(&cmd.value)?,
    };
    key.width = Width::try_from(width)?;

    pack_key(sel, &key)
}

fn malformed(value_type: ValueType, literal: &str) -> Error {
    Error::MalformedLiteral { kind: value_type.kind(), literal: literal.to_owned() }
}

fn parse_ipv4(literal: &str) -> Result<u32> {
    literal.parse::<Ipv4Addr>().map(u32::from).map_err(|_| malformed(ValueType::Ipv4, literal))
}

fn parse_int(literal: &str) -> Result<u32> {
    let n: i64 = literal.parse().map_err(|_| malformed(ValueType::Int, literal))?;
    u32::try_from(n)
        .or_else(|_| i32::try_from(n).map(|v| v as u32))
        .map_err(|_| malformed(ValueType::Int, literal))
}

fn parse_u32(literal: &str) -> Result<u32> {
    if literal.starts_with('+') {
        return Err(malformed(ValueType::U32, literal));
    }
    literal.parse().map_err(|_| malformed(ValueType::U32, literal))
}

/// Parse a hardware address written as `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff` or
/// `aabb.ccdd.eeff`.
pub fn parse_mac(literal: &str) -> Result<[u8; 6]> {
    if !literal.is_ascii() {
        return Err(malformed(ValueType::Mac, literal));
    }

    let octets: Vec<&str> = if literal.contains('.') {
        let groups: Vec<&str> = literal.split('.').collect();
        if groups.len() != 3 || groups.iter().any(|g| g.len() != 4) {
            return Err(malformed(ValueType::Mac, literal));
        }
        groups.into_iter().flat_map(|g| [&g[..2], &g[2..]]).collect()
    } else if literal.contains('-') {
        literal.split('-').collect()
    } else {
        literal.split(':').collect()
    };

    if octets.len() != 6 {
        return Err(malformed(ValueType::Mac, literal));
    }

    let mut mac = [0u8; 6];
    for (byte, octet) in mac.iter_mut().zip(&octets) {
        if octet.len() != 2 || !octet.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed(ValueType::Mac, literal));
        }
        *byte = u8::from_str_radix(octet, 16).map_err(|_| malformed(ValueType::Mac, literal))?;
    }

    Ok(mac)
}
