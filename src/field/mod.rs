use std::io;

use crate::FieldEndianness;

mod helpers;
pub mod layout;

use helpers::{check_width, read_with_host, write_with_host};

/// Reads the `bit_width`-bit unsigned field stored at `bit_offset`.
///
/// Bytes of the field that lie past the end of `data` read as zero. The only
/// error is a `bit_width` above 32, reported as `InvalidInput`.
///
/// ```
/// use bitstring::{read_field, FieldEndianness};
///
/// let data = [0x21, 0x43, 0x65];
/// assert_eq!(read_field(&data, 12, 12, FieldEndianness::LittleEndian).unwrap(), 0x654);
/// ```
pub fn read_field(
    data: &[u8],
    bit_offset: usize,
    bit_width: usize,
    endianness: FieldEndianness,
) -> io::Result<u32> {
    check_width(bit_width)?;
    Ok(read_with_host(data, bit_offset, bit_width, endianness, FieldEndianness::NATIVE))
}

/// Stores the low `bit_width` bits of `val` at `bit_offset`, leaving every
/// other bit untouched. Bytes of the field past the end of `data` are skipped.
pub fn write_field(
    data: &mut [u8],
    bit_offset: usize,
    bit_width: usize,
    endianness: FieldEndianness,
    val: u32,
) -> io::Result<()> {
    check_width(bit_width)?;
    write_with_host(data, bit_offset, bit_width, endianness, FieldEndianness::NATIVE, val);
    Ok(())
}

/// Sets a single bit. With `reversed_bits_in_byte` the bit index inside the
/// byte counts from the most significant bit, matching the big-endian field
/// layout. Offsets outside `data` are ignored.
pub fn set_bit(data: &mut [u8], bit_offset: usize, reversed_bits_in_byte: bool) {
    let byte_offset = bit_offset / 8;
    let mut bit_index = bit_offset % 8;
    if reversed_bits_in_byte {
        bit_index ^= 7;
    }

    match data.get_mut(byte_offset) {
        Some(byte) => *byte |= 1 << bit_index,
        None => {
            log::trace!(
                "set_bit - offset: {} outside buffer of {} bytes, ignored",
                bit_offset,
                data.len()
            );
        }
    }
}
