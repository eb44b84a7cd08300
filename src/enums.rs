/// How a field's bits are laid out across bytes in the data. This is a
/// property of the format being decoded, not of the machine doing the decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEndianness {
    /// Field bit 0 sits at the lowest absolute bit index, filling each byte
    /// from its least significant bit upward.
    LittleEndian,
    /// The field's most significant bit sits at the lowest absolute bit
    /// index, filling each byte from its most significant bit downward.
    BigEndian,
}

impl FieldEndianness {
    /// Byte order of the host executing the code.
    pub const NATIVE: FieldEndianness = if cfg!(target_endian = "big") {
        FieldEndianness::BigEndian
    } else {
        FieldEndianness::LittleEndian
    };
}
