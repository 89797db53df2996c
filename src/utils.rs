//! Utility functions for buffer parsing and manipulation.

use bytes::{Buf, BytesMut};

/// Receives a buffer and converts it to a vector of whitespace-separated
/// words.
///
/// Runs of spaces, tabs, vertical tabs, form feeds, carriage returns and
/// newlines all count as a single separator. Invalid UTF-8 is replaced rather than rejected.
///
/// # Arguments
/// * `buf` - The buffer to parse. Will be consumed.
///
/// # Example
/// ```
/// use bytes::BytesMut;
/// use lru_kv::buffer_to_array;
///
/// let mut buf = BytesMut::from("SET key  value\r\n");
/// let parts = buffer_to_array(&mut buf);
/// assert_eq!(parts, vec!["SET", "key", "value"]);
/// ```
pub fn buffer_to_array(buf: &mut BytesMut) -> Vec<String> {
    let mut vec = vec![];
    let mut word: Vec<u8> = Vec::new();

    while buf.has_remaining() {
        let byte = buf.get_u8();
        if is_separator(byte) {
            if !word.is_empty() {
                vec.push(String::from_utf8_lossy(&word).into_owned());
                word.clear();
            }
        } else {
            word.push(byte);
        }
    }

    if !word.is_empty() {
        vec.push(String::from_utf8_lossy(&word).into_owned());
    }
    vec
}

// `u8::is_ascii_whitespace` leaves out vertical tab.
fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0B
}
