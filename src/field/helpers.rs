use std::io;
use std::ops::Range;

use crate::{dump_bytes, FieldEndianness, MAX_FIELD_WIDTH};

/// Scratch register size in bytes. A 32-bit field misaligned by up to 7 bits
/// spans at most 5 bytes, so 8 leaves room for shifting without losing bits.
pub(crate) const SCRATCH_BYTES: usize = 8;

/// The bytes a field touches, plus the shift that aligns the field to bit 0
/// of the scratch register once those bytes are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ByteSpan {
    pub(crate) begin: usize,
    pub(crate) len: usize,
    pub(crate) shift: u32,
}

impl ByteSpan {
    pub(crate) fn new(bit_offset: usize, bit_width: usize, endianness: FieldEndianness) -> Self {
        // Only the offset within the first byte affects the span length and shift.
        let lead_bits = bit_offset % 8;
        let end_bits = lead_bits + bit_width;
        let shift = match endianness {
            FieldEndianness::LittleEndian => lead_bits,
            // BE fields are anchored to their last bit.
            FieldEndianness::BigEndian => (8 - end_bits % 8) % 8,
        };

        ByteSpan {
            begin: bit_offset / 8,
            len: end_bits.div_ceil(8),
            shift: shift as u32,
        }
    }

    /// Byte range of the span that actually exists in a buffer of `data_len` bytes.
    pub(crate) fn clamped(&self, data_len: usize) -> Range<usize> {
        let begin = self.begin.min(data_len);
        let end = self.begin.saturating_add(self.len).min(data_len);
        begin..end
    }
}

pub(crate) fn check_width(bit_width: usize) -> io::Result<()> {
    if bit_width > MAX_FIELD_WIDTH {
        log::debug!(
            "check_width - rejected bit width: {}, max: {}",
            bit_width,
            MAX_FIELD_WIDTH
        );
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("bit width {} exceeds {} bits", bit_width, MAX_FIELD_WIDTH),
        ));
    }
    Ok(())
}

pub(crate) fn field_mask(bit_width: usize) -> u64 {
    (1u64 << bit_width) - 1
}

fn window_range(len: usize, host: FieldEndianness) -> Range<usize> {
    match host {
        FieldEndianness::LittleEndian => 0..len,
        FieldEndianness::BigEndian => SCRATCH_BYTES - len..SCRATCH_BYTES,
    }
}

/// Places the span bytes at the low-order end of a host-ordered scratch
/// register and byte-swaps only that window when the data order differs from
/// the host order, so the register value reads in field order.
pub(crate) fn load_register(span_bytes: &[u8], endianness: FieldEndianness, host: FieldEndianness) -> u64 {
    let mut scratch = [0u8; SCRATCH_BYTES];
    let window = window_range(span_bytes.len(), host);
    scratch[window.clone()].copy_from_slice(span_bytes);
    if endianness != host {
        scratch[window].reverse();
    }

    match host {
        FieldEndianness::LittleEndian => u64::from_le_bytes(scratch),
        FieldEndianness::BigEndian => u64::from_be_bytes(scratch),
    }
}

/// Inverse of `load_register`: writes the register back into `span_bytes` in data order.
pub(crate) fn store_register(
    register: u64,
    span_bytes: &mut [u8],
    endianness: FieldEndianness,
    host: FieldEndianness,
) {
    let mut scratch = match host {
        FieldEndianness::LittleEndian => register.to_le_bytes(),
        FieldEndianness::BigEndian => register.to_be_bytes(),
    };
    let window = window_range(span_bytes.len(), host);
    if endianness != host {
        scratch[window.clone()].reverse();
    }
    span_bytes.copy_from_slice(&scratch[window]);
}

/// Callers validate `bit_width` with `check_width` first.
pub(crate) fn read_with_host(
    data: &[u8],
    bit_offset: usize,
    bit_width: usize,
    endianness: FieldEndianness,
    host: FieldEndianness,
) -> u32 {
    let span = ByteSpan::new(bit_offset, bit_width, endianness);
    // Bytes past the buffer end are never loaded; they read as zero high-order bytes.
    let range = span.clamped(data.len());
    let window = &data[range.clone()];

    let register = load_register(window, endianness, host);
    let val = (register >> span.shift) & field_mask(bit_width);

    log::trace!(
        "read_field - offset: {}, width: {}, {:?}, span: {:?}, range: {:?}, bytes: {}, val: 0x{:x}",
        bit_offset,
        bit_width,
        endianness,
        span,
        range,
        dump_bytes(window),
        val
    );

    val as u32
}

/// Callers validate `bit_width` with `check_width` first.
pub(crate) fn write_with_host(
    data: &mut [u8],
    bit_offset: usize,
    bit_width: usize,
    endianness: FieldEndianness,
    host: FieldEndianness,
    val: u32,
) {
    let span = ByteSpan::new(bit_offset, bit_width, endianness);
    let range = span.clamped(data.len());
    let window = &mut data[range.clone()];

    let cur_val = load_register(window, endianness, host);
    let mask = field_mask(bit_width) << span.shift;
    let new_val = (cur_val & !mask) | ((val as u64 & field_mask(bit_width)) << span.shift);

    log::trace!(
        "write_field - offset: {}, width: {}, {:?}, span: {:?}, range: {:?}, cur_val: 0x{:x}, new_val: 0x{:x}, mask: 0x{:x}",
        bit_offset,
        bit_width,
        endianness,
        span,
        range,
        cur_val,
        new_val,
        mask
    );

    // Only the in-range window is stored; the rest of the register is dropped.
    store_register(new_val, window, endianness, host);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldEndianness::{BigEndian, LittleEndian};

    const HOSTS: [FieldEndianness; 2] = [LittleEndian, BigEndian];

    #[test]
    fn span_covers_misaligned_field() {
        let span = ByteSpan::new(13, 15, LittleEndian);
        assert_eq!(span, ByteSpan { begin: 1, len: 3, shift: 5 });

        let span = ByteSpan::new(13, 15, BigEndian);
        assert_eq!(span, ByteSpan { begin: 1, len: 3, shift: 4 });
    }

    #[test]
    fn span_of_widest_misaligned_field_fits_scratch() {
        let span = ByteSpan::new(7, 32, LittleEndian);
        assert_eq!(span.len, 5);
        assert!(span.len <= SCRATCH_BYTES);
    }

    #[test]
    fn span_clamps_to_buffer() {
        let span = ByteSpan::new(20, 16, LittleEndian);
        assert_eq!(span.clamped(4), 2..4);
        assert_eq!(span.clamped(1), 1..1);

        let far = ByteSpan::new(usize::MAX, 32, BigEndian);
        assert_eq!(far.clamped(16), 16..16);
    }

    #[test]
    fn load_store_inverse_for_both_hosts() {
        let bytes = [0x12, 0x34, 0x56];
        for host in HOSTS {
            for endianness in [LittleEndian, BigEndian] {
                let register = load_register(&bytes, endianness, host);
                let expected = match endianness {
                    LittleEndian => 0x56_3412,
                    BigEndian => 0x12_3456,
                };
                assert_eq!(register, expected, "host {:?}, data {:?}", host, endianness);

                let mut out = [0u8; 3];
                store_register(register, &mut out, endianness, host);
                assert_eq!(out, bytes);
            }
        }
    }

    #[test]
    fn known_constants_decode_on_both_hosts() {
        let le = [0x21, 0x43, 0x65, 0x87, 0xA9, 0xCB];
        let be = [0x32, 0x16, 0x54, 0x98, 0x7C, 0xBA];
        let expected = [0x321, 0x654, 0x987, 0xCBA];

        for host in HOSTS {
            for (i, &val) in expected.iter().enumerate() {
                assert_eq!(read_with_host(&le, i * 12, 12, LittleEndian, host), val);
                assert_eq!(read_with_host(&be, i * 12, 12, BigEndian, host), val);
            }
        }
    }

    #[test]
    fn unaligned_pi_encodes_on_both_hosts() {
        let pi = std::f32::consts::PI.to_bits();
        for host in HOSTS {
            let mut le = [0u8; 5];
            write_with_host(&mut le, 5, 32, LittleEndian, host, pi);
            assert_eq!(le, [0x60, 0xFB, 0x21, 0x09, 0x08]);
            assert_eq!(read_with_host(&le, 5, 32, LittleEndian, host), pi);

            let mut be = [0u8; 5];
            write_with_host(&mut be, 5, 32, BigEndian, host, pi);
            assert_eq!(be, [0x02, 0x02, 0x48, 0x7E, 0xD8]);
            assert_eq!(read_with_host(&be, 5, 32, BigEndian, host), pi);
        }
    }

    #[test]
    fn width_limit() {
        assert!(check_width(0).is_ok());
        assert!(check_width(32).is_ok());
        let err = check_width(33).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn truncated_span_reads_missing_bytes_as_high_zeros() {
        for host in HOSTS {
            assert_eq!(read_with_host(&[0xFF, 0xFF], 12, 8, LittleEndian, host), 0x0F);
            assert_eq!(read_with_host(&[0xFF, 0xFF], 12, 8, BigEndian, host), 0x0F);
            assert_eq!(read_with_host(&[0xAB], 0, 16, BigEndian, host), 0x00AB);
            assert_eq!(read_with_host(&[0xAB], 0, 16, LittleEndian, host), 0x00AB);
        }
    }

    #[test]
    fn truncated_span_writes_only_in_range_bytes() {
        for host in HOSTS {
            for endianness in [LittleEndian, BigEndian] {
                let mut data = [0u8; 2];
                write_with_host(&mut data, 12, 8, endianness, host, 0xAB);
                assert_eq!(data, [0x00, 0xB0], "host {:?}, data {:?}", host, endianness);
            }
        }
    }
}
