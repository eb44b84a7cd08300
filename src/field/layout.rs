use crate::field::helpers::{read_with_host, write_with_host};
use crate::{FieldEndianness, MAX_FIELD_WIDTH};

/// A field position validated once, so reads and writes through it cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    offset: usize,
    width: usize,
    endianness: FieldEndianness,
}

impl FieldSpec {
    /// Returns `None` when `width` exceeds 32 bits.
    pub const fn new(offset: usize, width: usize, endianness: FieldEndianness) -> Option<Self> {
        if width > MAX_FIELD_WIDTH {
            return None;
        }
        Some(FieldSpec { offset, width, endianness })
    }

    /// Like `new`, but fails const evaluation on an oversized width. Used by `bitfield!`.
    pub const fn declare(offset: usize, width: usize, endianness: FieldEndianness) -> Self {
        match Self::new(offset, width, endianness) {
            Some(spec) => spec,
            None => panic!("bit field wider than 32 bits"),
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn endianness(&self) -> FieldEndianness {
        self.endianness
    }

    pub fn read(&self, data: &[u8]) -> u32 {
        read_with_host(data, self.offset, self.width, self.endianness, FieldEndianness::NATIVE)
    }

    pub fn write(&self, data: &mut [u8], val: u32) {
        write_with_host(data, self.offset, self.width, self.endianness, FieldEndianness::NATIVE, val);
    }
}

/// Generates a getter/setter pair for a bit field inside `self.data`.
///
/// ```
/// use bitstring::{bitfield, FieldEndianness};
///
/// struct Header {
///     data: [u8; 4],
/// }
///
/// impl Header {
///     bitfield!(a, set_a,  0, 13, FieldEndianness::LittleEndian, u16);
///     bitfield!(b, set_b, 13, 15, FieldEndianness::LittleEndian, u16);
/// }
///
/// let mut header = Header { data: [0; 4] };
/// header.set_a(0x321);
/// header.set_b(0x7FFF);
/// assert_eq!(header.a(), 0x321);
/// assert_eq!(header.data, [0x21, 0xE3, 0xFF, 0x0F]);
/// ```
#[macro_export]
macro_rules! bitfield {
    ($getter:ident, $setter:ident, $offset:expr, $width:expr, $endianness:expr, $type:ty) => {
        pub fn $getter(&self) -> $type {
            const FIELD: $crate::FieldSpec = $crate::FieldSpec::declare($offset, $width, $endianness);
            FIELD.read(&self.data) as $type
        }

        pub fn $setter(&mut self, val: $type) {
            const FIELD: $crate::FieldSpec = $crate::FieldSpec::declare($offset, $width, $endianness);
            FIELD.write(&mut self.data, val as u32);
        }
    };
}
