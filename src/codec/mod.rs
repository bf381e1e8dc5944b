//! Field-name codec used at the JSON boundary.
//!
//! - `naming` - the prefix-stripping snake_case mapping and per-record field tables
//! - `record` - the `WireRecord` trait plus table-checked encode/decode

pub mod naming;
pub mod record;

pub use naming::{wire_name, FieldNameError, FieldTable};
pub use record::{decode, decode_value, encode, encode_to_vec, WireRecord};
