//! Minimal IFD walker for vendor maker notes.
//!
//! Only the Sony serial-number tag is read. Offsets inside the maker note are
//! relative to the TIFF header, so the walker operates on the whole TIFF
//! buffer rather than on the maker-note bytes alone.

use super::decode_ascii;

pub const SONY_SERIAL_NUMBER_TAG: u16 = 0x2031;

const SONY_HEADERS: &[&[u8]] = &[b"SONY DSC \0\0\0", b"SONY CAM \0\0\0"];
const SONY_HEADER_LEN: usize = 12;
const IFD_ENTRY_LEN: usize = 12;
const TYPE_ASCII: u16 = 2;

struct TiffBytes<'a> {
    buf: &'a [u8],
    little_endian: bool,
}

impl<'a> TiffBytes<'a> {
    fn slice(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.buf.get(offset..end)
    }

    fn u16_at(&self, offset: usize) -> Option<u16> {
        let bytes: [u8; 2] = self.slice(offset, 2)?.try_into().ok()?;
        Some(if self.little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        })
    }

    fn u32_at(&self, offset: usize) -> Option<u32> {
        let bytes: [u8; 4] = self.slice(offset, 4)?.try_into().ok()?;
        Some(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    /// ASCII value of `tag` in the IFD at `ifd_offset`.
    fn ascii_tag(&self, ifd_offset: usize, tag: u16) -> Option<String> {
        let count = self.u16_at(ifd_offset)? as usize;

        for i in 0..count {
            let entry = ifd_offset + 2 + i * IFD_ENTRY_LEN;
            if self.u16_at(entry)? != tag {
                continue;
            }
            if self.u16_at(entry + 2)? != TYPE_ASCII {
                return None;
            }

            let len = self.u32_at(entry + 4)? as usize;
            let data = if len <= 4 {
                self.slice(entry + 8, len)?
            } else {
                let value_offset = self.u32_at(entry + 8)? as usize;
                self.slice(value_offset, len)?
            };
            return decode_ascii(data);
        }

        None
    }
}

/// Serial number from a Sony maker note starting at `note_offset` in `tiff`.
///
/// The maker note may or may not carry the 12-byte `SONY DSC ` header.
pub fn sony_serial(tiff: &[u8], note_offset: usize, little_endian: bool) -> Option<String> {
    let note = tiff.get(note_offset..)?;
    let ifd_offset = if SONY_HEADERS.iter().any(|header| note.starts_with(header)) {
        note_offset + SONY_HEADER_LEN
    } else {
        note_offset
    };

    TiffBytes {
        buf: tiff,
        little_endian,
    }
    .ascii_tag(ifd_offset, SONY_SERIAL_NUMBER_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IfdBuilder {
        little_endian: bool,
        buf: Vec<u8>,
    }

    impl IfdBuilder {
        fn new(little_endian: bool) -> Self {
            let mut buf = Vec::new();
            if little_endian {
                buf.extend_from_slice(b"II*\0");
            } else {
                buf.extend_from_slice(b"MM\0*");
            }
            let mut builder = Self { little_endian, buf };
            builder.push_u32(8);
            builder
        }

        fn push_u16(&mut self, v: u16) {
            let bytes = if self.little_endian {
                v.to_le_bytes()
            } else {
                v.to_be_bytes()
            };
            self.buf.extend_from_slice(&bytes);
        }

        fn push_u32(&mut self, v: u32) {
            let bytes = if self.little_endian {
                v.to_le_bytes()
            } else {
                v.to_be_bytes()
            };
            self.buf.extend_from_slice(&bytes);
        }

        /// Writes a maker note at the current position and returns its offset.
        fn maker_note(&mut self, header: bool, serial: &[u8]) -> usize {
            let note_offset = self.buf.len();
            if header {
                self.buf.extend_from_slice(b"SONY DSC \0\0\0");
            }
            let ifd_offset = self.buf.len();
            let data_offset = ifd_offset + 2 + 2 * IFD_ENTRY_LEN + 4;

            self.push_u16(2);
            // unrelated SHORT entry
            self.push_u16(0x0102);
            self.push_u16(3);
            self.push_u32(1);
            self.push_u32(0);
            // serial number
            self.push_u16(SONY_SERIAL_NUMBER_TAG);
            self.push_u16(TYPE_ASCII);
            self.push_u32(serial.len() as u32);
            if serial.len() <= 4 {
                let mut inline = serial.to_vec();
                inline.resize(4, 0);
                self.buf.extend_from_slice(&inline);
            } else {
                self.push_u32(data_offset as u32);
            }
            self.push_u32(0);
            if serial.len() > 4 {
                self.buf.extend_from_slice(serial);
            }
            note_offset
        }
    }

    #[test]
    fn test_sony_serial_with_header() {
        let mut builder = IfdBuilder::new(true);
        let offset = builder.maker_note(true, b"5012345\0");
        assert_eq!(
            sony_serial(&builder.buf, offset, true),
            Some("5012345".to_string())
        );
    }

    #[test]
    fn test_sony_serial_without_header_big_endian() {
        let mut builder = IfdBuilder::new(false);
        let offset = builder.maker_note(false, b"00987654\0");
        assert_eq!(
            sony_serial(&builder.buf, offset, false),
            Some("00987654".to_string())
        );
    }

    #[test]
    fn test_sony_serial_inline_value() {
        let mut builder = IfdBuilder::new(true);
        let offset = builder.maker_note(true, b"123\0");
        assert_eq!(sony_serial(&builder.buf, offset, true), Some("123".to_string()));
    }

    #[test]
    fn test_sony_serial_truncated_buffer() {
        let mut builder = IfdBuilder::new(true);
        let offset = builder.maker_note(true, b"5012345\0");
        let truncated = &builder.buf[..builder.buf.len() - 6];
        assert_eq!(sony_serial(truncated, offset, true), None);
        assert_eq!(sony_serial(&builder.buf, builder.buf.len() + 10, true), None);
    }
}
