use std::fmt::Write;

pub mod enums;
pub mod field;

pub use enums::FieldEndianness;
pub use field::layout::FieldSpec;
pub use field::{read_field, set_bit, write_field};

/// Widest field the codec reads or writes in one call.
pub const MAX_FIELD_WIDTH: usize = 32;

/// Formats bytes as a hex dump, 16 bytes per line, for trace logging.
pub(crate) fn dump_bytes(buf: &[u8]) -> String {
    let mut out = String::from("0x0000: ");
    let len = buf.len();
    for (i, &byte) in buf.iter().enumerate() {
        let _ = write!(out, "{:02x} ", byte);
        if (i + 1) % 8 == 0 {
            out.push(' ');
        }
        if (i + 1) % 16 == 0 && i < len - 1 {
            let _ = write!(out, "\n0x{:04x}: ", i + 1);
        }
    }
    out
}
