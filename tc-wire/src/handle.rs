//! TC handle helpers.
//!
//! TC handles are 32-bit values split into major:minor (16:16 bits). Qdiscs use minor 0,
//! classes use a non-zero minor under their qdisc's major.

/// Unspecified handle, lets the kernel pick one.
pub const TC_H_UNSPEC: u32 = 0;

/// Parent handle of a root qdisc.
pub const TC_H_ROOT: u32 = 0xFFFF_FFFF;

/// Parent handle of the ingress qdisc.
pub const TC_H_INGRESS: u32 = 0xFFFF_FFF1;

/// Parent handle of the clsact qdisc (same value as ingress).
pub const TC_H_CLSACT: u32 = TC_H_INGRESS;

const TC_H_MAJ_MASK: u32 = 0xFFFF_0000;
const TC_H_MIN_MASK: u32 = 0x0000_FFFF;

/// Combine a major and a minor number into a handle.
///
/// ```
/// use tc_wire::handle;
/// assert_eq!(handle::make(1, 12), 0x0001_000C); // 1:12
/// ```
pub const fn make(major: u16, minor: u16) -> u32 {
    ((major as u32) << 16) | minor as u32
}

/// Major number of a handle.
pub const fn major(handle: u32) -> u16 {
    ((handle & TC_H_MAJ_MASK) >> 16) as u16
}

/// Minor number of a handle.
pub const fn minor(handle: u32) -> u16 {
    (handle & TC_H_MIN_MASK) as u16
}

/// Render a handle the way `tc` prints it, `major:minor` in hex.
pub fn display(handle: u32) -> String {
    match handle {
        TC_H_ROOT => "root".to_string(),
        TC_H_INGRESS => "ingress".to_string(),
        TC_H_UNSPEC => "none".to_string(),
        _ => format!("{:x}:{:x}", major(handle), minor(handle)),
    }
}
