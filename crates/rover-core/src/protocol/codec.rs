//! Binary codec for the rover teleoperation wire formats.
//!
//! Video direction (bridge → operator), repeated indefinitely:
//! ```text
//! [payload_len:4][payload:payload_len]
//! ```
//!
//! Control direction (operator → bridge), repeated indefinitely:
//! ```text
//! [control:4][rotation:4][x_pan:4][y_pan:4]
//! ```
//!
//! All multi-byte integers are big-endian.  Neither direction carries a
//! version byte or checksum; the formats are fixed for the life of a
//! session.

use thiserror::Error;

use crate::protocol::messages::{ControlRecord, CONTROL_RECORD_SIZE, FRAME_HEADER_SIZE};

/// Errors that can occur during encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the minimum required length.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The frame payload does not fit in the 4-byte length prefix.
    #[error("frame too large: {len} bytes exceeds the u32 length prefix")]
    FrameTooLarge { len: usize },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes the length prefix for a video frame of `payload_len` bytes.
///
/// The prefix commits the sender to exactly `payload_len` payload bytes;
/// callers must write the full payload immediately after it or abandon the
/// connection.
///
/// # Errors
///
/// Returns [`ProtocolError::FrameTooLarge`] if the payload length does not
/// fit in an unsigned 32-bit field.
///
/// # Examples
///
/// ```rust
/// use rover_core::protocol::codec::{decode_frame_header, encode_frame_header};
///
/// let header = encode_frame_header(0x0102_0304).unwrap();
/// assert_eq!(header, [0x01, 0x02, 0x03, 0x04]);
/// assert_eq!(decode_frame_header(&header).unwrap(), 0x0102_0304);
/// ```
pub fn encode_frame_header(payload_len: usize) -> Result<[u8; FRAME_HEADER_SIZE], ProtocolError> {
    let len = u32::try_from(payload_len)
        .map_err(|_| ProtocolError::FrameTooLarge { len: payload_len })?;
    Ok(len.to_be_bytes())
}

/// Decodes the payload length from the first [`FRAME_HEADER_SIZE`] bytes of
/// `bytes`.
///
/// # Errors
///
/// Returns [`ProtocolError::InsufficientData`] if fewer than
/// [`FRAME_HEADER_SIZE`] bytes are available.
pub fn decode_frame_header(bytes: &[u8]) -> Result<u32, ProtocolError> {
    if bytes.len() < FRAME_HEADER_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: FRAME_HEADER_SIZE,
            available: bytes.len(),
        });
    }
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Encodes a [`ControlRecord`] into its 16-byte wire form.
///
/// # Examples
///
/// ```rust
/// use rover_core::protocol::codec::{decode_control_record, encode_control_record};
/// use rover_core::protocol::messages::ControlRecord;
///
/// let rec = ControlRecord { control: 21, rotation: 0, x_pan: -45, y_pan: -45 };
/// let bytes = encode_control_record(&rec);
/// assert_eq!(decode_control_record(&bytes).unwrap(), rec);
/// ```
pub fn encode_control_record(record: &ControlRecord) -> [u8; CONTROL_RECORD_SIZE] {
    let mut buf = [0u8; CONTROL_RECORD_SIZE];
    buf[0..4].copy_from_slice(&record.control.to_be_bytes());
    buf[4..8].copy_from_slice(&record.rotation.to_be_bytes());
    buf[8..12].copy_from_slice(&record.x_pan.to_be_bytes());
    buf[12..16].copy_from_slice(&record.y_pan.to_be_bytes());
    buf
}

/// Decodes one [`ControlRecord`] from the beginning of `bytes`.
///
/// Exactly [`CONTROL_RECORD_SIZE`] bytes are consumed; any trailing bytes
/// belong to the next record and are ignored here.
///
/// # Errors
///
/// Returns [`ProtocolError::InsufficientData`] if fewer than
/// [`CONTROL_RECORD_SIZE`] bytes are available.  No partial record is ever
/// returned.
pub fn decode_control_record(bytes: &[u8]) -> Result<ControlRecord, ProtocolError> {
    if bytes.len() < CONTROL_RECORD_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: CONTROL_RECORD_SIZE,
            available: bytes.len(),
        });
    }
    Ok(ControlRecord {
        control: read_i32(bytes, 0)?,
        rotation: read_i32(bytes, 4)?,
        x_pan: read_i32(bytes, 8)?,
        y_pan: read_i32(bytes, 12)?,
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_i32(buf: &[u8], offset: usize) -> Result<i32, ProtocolError> {
    if buf.len() < offset + 4 {
        return Err(ProtocolError::InsufficientData {
            needed: offset + 4,
            available: buf.len(),
        });
    }
    Ok(i32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
