//! Domain name encoding, including RFC1035 4.1.4 message compression on the
//! decoding side.

use crate::parser::{read_bytes, read_u16, read_u8};
use crate::{MessageError, Result};
use bytes::BufMut;
use tracing::{instrument, trace};

/// RFC1035 - labels are restricted to 63 octets or less.
pub const MAX_LABEL_LEN: usize = 63;

/// RFC1035 - names are restricted to 255 octets or less, including the length
/// octets and the terminating root label.
pub const MAX_NAME_LEN: usize = 255;

/// The top two bits of a length octet mark a compression pointer.
const POINTER_TAG: u8 = 0xc0;

const POINTER_OFFSET_MASK: u16 = 0x3fff;

/// Writes `name` to `buf` as a sequence of length prefixed labels ending with
/// the zero length root label, returning the number of bytes written.
///
/// A single trailing `.` is accepted, so `"example.com."` and `"example.com"`
/// encode identically; `""` and `"."` both encode the root. Nothing is written
/// to `buf` if the name is rejected.
#[instrument(skip(buf))]
pub fn encode_name(name: &str, buf: &mut Vec<u8>) -> Result<usize> {
    let relative = name.strip_suffix('.').unwrap_or(name);
    let labels: Vec<&str> = if relative.is_empty() {
        Vec::new()
    } else {
        relative.split('.').collect()
    };

    let mut encoded_len = 1;
    for label in labels.iter() {
        if label.is_empty() {
            return Err(MessageError::EmptyLabel(name.to_string()));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(MessageError::NameLengthExceeded(
                label.len(),
                label.to_string(),
            ));
        }
        encoded_len += 1 + label.len();
    }
    if encoded_len > MAX_NAME_LEN {
        return Err(MessageError::NameTooLong(encoded_len));
    }

    for label in labels {
        buf.put_u8(label.len() as u8);
        buf.put_slice(label.as_bytes());
    }
    buf.put_u8(0);

    trace!("Wrote {} bytes", encoded_len);

    Ok(encoded_len)
}

/// Reads the name starting at `offset`, returning it in dotted form (without
/// a trailing `.`) together with the offset just past the name.
///
/// When the name ends in a compression pointer the returned offset is the one
/// following the two pointer bytes, regardless of where the name it points to
/// ends.
#[instrument(skip(buf))]
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize)> {
    let mut name = String::new();
    // Encoded length of the labels read so far, terminating zero included.
    let mut encoded_len = 1;
    // Start of the label run being read. Every pointer must target an offset
    // before it, so jumps move strictly backwards and a chain always ends.
    let mut start = offset;
    let mut offset = offset;
    // Offset just past the first pointer, once one has been followed.
    let mut end = None;

    loop {
        let (len, next) = read_u8(buf, offset)?;
        match len {
            0 => return Ok((name, end.unwrap_or(next))),
            len if len & POINTER_TAG == 0 => {
                let (label, next) = read_bytes(buf, next, len as usize)?;
                encoded_len += label.len() + 1;
                if encoded_len > MAX_NAME_LEN {
                    return Err(MessageError::NameTooLong(encoded_len));
                }
                push_label(&mut name, std::str::from_utf8(label)?);
                offset = next;
            }
            len if len & POINTER_TAG == POINTER_TAG => {
                let (pointer, next) = read_u16(buf, offset)?;
                let target = (pointer & POINTER_OFFSET_MASK) as usize;
                trace!("Name pointer at {} to {}", offset, target);
                if target >= start {
                    return Err(MessageError::InvalidPointer { at: offset, target });
                }
                end.get_or_insert(next);
                start = target;
                offset = target;
            }
            len => return Err(MessageError::UnsupportedLabelType(len & POINTER_TAG, offset)),
        }
    }
}

fn push_label(name: &mut String, label: &str) {
    if !name.is_empty() {
        name.push('.');
    }
    name.push_str(label);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::setup;

    #[test]
    fn test_encode_name() {
        setup();
        let mut buf = Vec::new();
        let len = encode_name("example.com", &mut buf).unwrap();

        assert_eq!(len, 13);
        assert_eq!(buf, b"\x07example\x03com\x00");
    }

    #[test]
    fn test_encode_trailing_dot_and_root() {
        setup();
        let mut buf = Vec::new();
        encode_name("example.com.", &mut buf).unwrap();
        assert_eq!(buf, b"\x07example\x03com\x00");

        for root in ["", "."] {
            let mut buf = Vec::new();
            assert_eq!(encode_name(root, &mut buf).unwrap(), 1);
            assert_eq!(buf, [0]);
        }
    }

    #[test]
    fn test_encode_rejects_bad_names() {
        setup();
        let mut buf = vec![0xaa];

        let long_label = "a".repeat(64);
        assert_eq!(
            encode_name(&format!("{}.com", long_label), &mut buf),
            Err(MessageError::NameLengthExceeded(64, long_label))
        );
        assert_eq!(
            encode_name("www..com", &mut buf),
            Err(MessageError::EmptyLabel("www..com".to_string()))
        );

        // Four 63 byte labels need 4 * 64 + 1 bytes.
        let label = "b".repeat(63);
        let too_long = [label.as_str(); 4].join(".");
        assert_eq!(
            encode_name(&too_long, &mut buf),
            Err(MessageError::NameTooLong(257))
        );

        // Rejected names leave the buffer untouched.
        assert_eq!(buf, [0xaa]);
    }

    #[test]
    fn test_encode_limits_are_inclusive() {
        setup();
        let mut buf = Vec::new();
        let label = "c".repeat(63);
        // 3 * 64 + 62 + 1 = 255 bytes.
        let name = format!("{0}.{0}.{0}.{1}", label, "d".repeat(61));
        assert_eq!(encode_name(&name, &mut buf).unwrap(), 255);
        assert_eq!(decode_name(&buf, 0).unwrap(), (name, 255));
    }

    #[test]
    fn test_name_round_trip() {
        setup();
        for name in [
            "a",
            "example.com",
            "www.northeastern.edu",
            "x-1.y_2.z.example.org",
            "",
        ] {
            let mut buf = Vec::new();
            let len = encode_name(name, &mut buf).unwrap();
            assert_eq!(decode_name(&buf, 0).unwrap(), (name.to_string(), len));
        }
    }

    #[test]
    fn test_decode_at_offset() {
        setup();
        let buf: &[u8] = b"\xde\xad\x03www\x06google\x03com\x00\x00\x01";

        assert_eq!(
            decode_name(buf, 2).unwrap(),
            ("www.google.com".to_string(), 18)
        );
        assert_eq!(decode_name(buf, 6).unwrap(), ("google.com".to_string(), 18));
    }

    #[test]
    fn test_decode_pointer() {
        setup();
        let buf: &[u8] = &[
            0, 0, // padding
            7, 101, 120, 97, 109, 112, 108, 101, // example
            3, 99, 111, 109, // com
            0,   // terminator @ 14
            0xc0, 2, // pointer @ 15 to 2
            3, 119, 119, 119, // www @ 17
            0xc0, 2, // pointer @ 21 to 2
            0xff, // trailing data
        ];

        let (literal, after_literal) = decode_name(buf, 2).unwrap();
        assert_eq!(literal, "example.com");
        assert_eq!(after_literal, 15);

        // The cursor lands after the pointer, not after the name it targets.
        assert_eq!(decode_name(buf, 15).unwrap(), (literal.clone(), 17));
        assert_eq!(
            decode_name(buf, 17).unwrap(),
            ("www.example.com".to_string(), 23)
        );
    }

    #[test]
    fn test_decode_pointer_chain() {
        setup();
        let buf: &[u8] = &[
            3, 99, 111, 109, 0, // com @ 0
            7, 101, 120, 97, 109, 112, 108, 101, 0xc0, 0, // example + ptr @ 5
            3, 119, 119, 119, 0xc0, 5, // www + ptr @ 15
        ];

        assert_eq!(
            decode_name(buf, 15).unwrap(),
            ("www.example.com".to_string(), 21)
        );
    }

    #[test]
    fn test_decode_rejects_looping_pointers() {
        setup();
        // Points at itself.
        let buf: &[u8] = &[0xc0, 0];
        assert_eq!(
            decode_name(buf, 0),
            Err(MessageError::InvalidPointer { at: 0, target: 0 })
        );

        // Points forwards.
        let buf: &[u8] = &[3, 119, 119, 119, 0xc0, 6, 0, 0];
        assert_eq!(
            decode_name(buf, 0),
            Err(MessageError::InvalidPointer { at: 4, target: 6 })
        );

        // Two names pointing at each other.
        let buf: &[u8] = &[1, 97, 0xc0, 4, 1, 98, 0xc0, 0];
        assert_eq!(
            decode_name(buf, 4),
            Err(MessageError::InvalidPointer { at: 2, target: 4 })
        );
    }

    #[test]
    fn test_decode_long_pointer_chain() {
        setup();
        // Root at 0, then 8191 pointers each targeting the one before it.
        let mut buf = vec![0u8];
        let mut prev = 0u16;
        while buf.len() + 2 <= 16383 {
            let at = buf.len() as u16;
            buf.extend_from_slice(&(0xc000 | prev).to_be_bytes());
            prev = at;
        }
        assert_eq!(buf.len(), 16383);

        assert_eq!(
            decode_name(&buf, prev as usize).unwrap(),
            (String::new(), buf.len())
        );
    }

    #[test]
    fn test_decode_rejects_name_grown_by_pointers() {
        setup();
        // Each step prepends a 63 byte label and points at the previous step,
        // so the fourth step decodes to more than 255 bytes.
        let mut buf = vec![0u8];
        let mut prev = 0u16;
        for _ in 0..4 {
            let at = buf.len() as u16;
            buf.push(63);
            buf.extend_from_slice(&[b'e'; 63]);
            buf.extend_from_slice(&(0xc000 | prev).to_be_bytes());
            prev = at;
        }

        let third = (prev - 66) as usize;
        let (name, _) = decode_name(&buf, third).unwrap();
        assert_eq!(name.len(), 3 * 63 + 2);
        assert_eq!(
            decode_name(&buf, prev as usize),
            Err(MessageError::NameTooLong(257))
        );
    }

    #[test]
    fn test_decode_reserved_label_type() {
        setup();
        let buf: &[u8] = &[0x41, 0];
        assert_eq!(
            decode_name(buf, 0),
            Err(MessageError::UnsupportedLabelType(0x40, 0))
        );
    }

    #[test]
    fn test_decode_truncated() {
        setup();
        // Label claims 7 bytes, only 3 present.
        let buf: &[u8] = &[7, 101, 120, 97];
        assert_eq!(
            decode_name(buf, 0),
            Err(MessageError::TruncatedMessage { offset: 1, len: 4 })
        );

        // Missing terminator.
        let buf: &[u8] = &[3, 99, 111, 109];
        assert_eq!(
            decode_name(buf, 0),
            Err(MessageError::TruncatedMessage { offset: 4, len: 4 })
        );

        // Half a pointer.
        let buf: &[u8] = &[0, 0xc0];
        assert_eq!(
            decode_name(buf, 1),
            Err(MessageError::TruncatedMessage { offset: 1, len: 2 })
        );
    }

    #[test]
    fn test_decode_invalid_utf8() {
        setup();
        let buf: &[u8] = &[2, 0xff, 0xfe, 0];
        assert!(matches!(
            decode_name(buf, 0),
            Err(MessageError::EncodingError(_))
        ));
    }
}
