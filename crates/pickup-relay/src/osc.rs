//! Minimal OSC 1.0 message encoding.
//!
//! The video wall accepts two addressed parameters (a text line and a layer
//! opacity) as plain OSC messages over UDP. Only string and float32
//! arguments are needed, so the encoder is hand-rolled: padded address,
//! padded type tag string, 4-byte aligned payload, big-endian float.

/// Append a string plus the NUL terminator, padded to a 4-byte boundary.
fn push_padded(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

/// Encode an OSC message carrying a single string argument.
pub fn string_message(address: &str, value: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(address.len() + value.len() + 12);
    push_padded(&mut buf, address);
    push_padded(&mut buf, ",s");
    push_padded(&mut buf, value);
    buf
}

/// Encode an OSC message carrying a single float32 argument.
pub fn float_message(address: &str, value: f32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(address.len() + 12);
    push_padded(&mut buf, address);
    push_padded(&mut buf, ",f");
    buf.extend_from_slice(&value.to_be_bytes());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_message_is_aligned_and_tagged() {
        let msg = string_message("/layer/text", "Max");
        assert_eq!(msg.len() % 4, 0);

        // Address, NUL-terminated and padded
        assert_eq!(&msg[..11], b"/layer/text");
        assert_eq!(msg[11], 0);

        // Type tag block
        assert_eq!(&msg[12..16], b",s\0\0");

        // Argument, padded
        assert_eq!(&msg[16..20], b"Max\0");
    }

    #[test]
    fn float_message_is_big_endian() {
        let msg = float_message("/op", 1.0);
        assert_eq!(msg.len() % 4, 0);
        assert_eq!(&msg[msg.len() - 4..], &1.0_f32.to_be_bytes());
    }

    #[test]
    fn empty_string_still_occupies_a_padded_slot() {
        let msg = string_message("/x", "");
        // "/x\0\0" + ",s\0\0" + "\0\0\0\0"
        assert_eq!(msg.len(), 12);
        assert_eq!(&msg[8..], &[0, 0, 0, 0]);
    }
}
