//! Classifier records.

pub mod u32;

pub use self::u32::{TcU32Key, TcU32Sel, TcU32SelHeader};
