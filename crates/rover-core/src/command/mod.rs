//! Control-record to actuator-command translation tables.
//!
//! Reference: Android `KeyEvent` key codes (operator app, inbound) and the
//! rover firmware's single-character opcode set (outbound).
//!
//! # What do the numbers mean? (for beginners)
//!
//! The operator app forwards raw Android key codes: the D-pad keys
//! (`KEYCODE_DPAD_UP` = 19 … `KEYCODE_DPAD_RIGHT` = 22) drive the wheels,
//! `KEYCODE_J` = 38 and `KEYCODE_L` = 40 rotate in place, and pan angles
//! come from the app's virtual joystick in degrees.  The firmware on the
//! other side of the serial link speaks printable ASCII: one opcode byte
//! each for drive and rotation, one calibrated position byte per pan servo,
//! then `'\n'`.
//!
//! # How the tables work
//!
//! [`translate`] is a pure function: no state, no I/O, same record in, same
//! command out.  Key codes without a firmware opcode (including
//! `KEYCODE_ESCAPE` = 111, which the operator app emits on release) map to
//! the idle byte `'0'`, leaving the rover stationary.  The mapping is the
//! physical calibration of the vehicle; changing any entry changes how the
//! rover moves.
//!
//! | control (in) | ctl (out)  | meaning        |
//! |--------------|------------|----------------|
//! | 21           | 36 (`'$'`) | turn left      |
//! | 22           | 34 (`'"'`) | turn right     |
//! | 20           | 35 (`'#'`) | reverse        |
//! | 19           | 33 (`'!'`) | forward        |
//! | 0            | 32 (`' '`) | stop           |
//! | other        | 48 (`'0'`) | idle           |
//!
//! | rotation (in) | rot (out)   | meaning           |
//! |---------------|-------------|-------------------|
//! | 40            | 38 (`'&'`)  | rotate clockwise  |
//! | 38            | 39 (`'\''`) | rotate counter    |
//! | 0             | 37 (`'%'`)  | stop rotating     |
//! | other         | 48 (`'0'`)  | idle              |

use crate::protocol::messages::ControlRecord;

/// Idle opcode byte: the state the firmware boots in and falls back to for
/// any key code without a table entry.
pub const IDLE_CODE: u8 = b'0';

/// Line terminator appended after the four command bytes.
pub const COMMAND_TERMINATOR: u8 = b'\n';

/// One translated command for the actuator controller.
///
/// Written to the serial link as five bytes: `ctl`, `rot`, `x`, `y`,
/// [`COMMAND_TERMINATOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommand {
    /// Drive opcode.
    pub ctl: u8,
    /// Rotation opcode.
    pub rot: u8,
    /// Horizontal pan servo position.
    pub x: u8,
    /// Vertical pan servo position.
    pub y: u8,
}

impl ActuatorCommand {
    /// Size of one command on the serial link, terminator included.
    pub const WIRE_SIZE: usize = 5;

    /// Returns the exact byte sequence written to the actuator sink.
    pub fn to_bytes(self) -> [u8; Self::WIRE_SIZE] {
        [self.ctl, self.rot, self.x, self.y, COMMAND_TERMINATOR]
    }
}

/// Translates one control record into an actuator command.
///
/// Pure and deterministic.  See the module docs for the drive and rotation
/// tables; pan angles are banded by `normalize_pan`, halved with
/// truncation toward zero, then offset into each servo's calibrated range
/// (`+40` horizontal, `+131` vertical).  The offset sums
/// are truncated to the low byte, matching the firmware's unsigned-char
/// arithmetic, so out-of-band angles can wrap rather than clamp.
///
/// # Panics
///
/// Never panics; every `i32` input is handled.
pub fn translate(record: ControlRecord) -> ActuatorCommand {
    let ctl = match record.control {
        21 => b'$',
        22 => b'"',
        20 => b'#',
        19 => b'!',
        0 => b' ',
        _ => IDLE_CODE,
    };

    let rot = match record.rotation {
        40 => b'&',
        38 => b'\'',
        0 => b'%',
        _ => IDLE_CODE,
    };

    let x_half = normalize_pan(record.x_pan) / 2;
    let y_half = normalize_pan(record.y_pan) / 2;

    ActuatorCommand {
        ctl,
        rot,
        x: (x_half + 40) as u8,
        y: (y_half + 131) as u8,
    }
}

/// Maps a pan angle into the servo bands used by the operator app.
///
/// Angles in `[-90, 0)` snap to 0 and angles in `[-180, -90)` snap to 180,
/// which is how the app expresses "look ahead" and "look behind".  Anything
/// outside `[-180, 0)` passes through unchanged; the translation stage will
/// wrap such values into a byte, so callers wanting clamped servo positions
/// must validate upstream.
fn normalize_pan(angle: i32) -> i32 {
    if (-90..0).contains(&angle) {
        0
    } else if (-180..-90).contains(&angle) {
        180
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(control: i32, rotation: i32, x_pan: i32, y_pan: i32) -> ControlRecord {
        ControlRecord {
            control,
            rotation,
            x_pan,
            y_pan,
        }
    }

    // ── Drive table ──────────────────────────────────────────────────────────

    #[test]
    fn test_control_table_exact_entries() {
        // Every listed drive code, against the calibration table.
        assert_eq!(translate(record(21, 0, 0, 0)).ctl, 36);
        assert_eq!(translate(record(22, 0, 0, 0)).ctl, 34);
        assert_eq!(translate(record(20, 0, 0, 0)).ctl, 35);
        assert_eq!(translate(record(19, 0, 0, 0)).ctl, 33);
        assert_eq!(translate(record(0, 0, 0, 0)).ctl, 32);
    }

    #[test]
    fn test_control_unlisted_codes_fall_back_to_idle() {
        // 111 is KEYCODE_ESCAPE, emitted by the app on key release; it is
        // deliberately not a firmware opcode.
        assert_eq!(translate(record(111, 0, 0, 0)).ctl, IDLE_CODE);
        assert_eq!(translate(record(23, 0, 0, 0)).ctl, IDLE_CODE);
        assert_eq!(translate(record(-1, 0, 0, 0)).ctl, IDLE_CODE);
        assert_eq!(translate(record(i32::MAX, 0, 0, 0)).ctl, IDLE_CODE);
    }

    // ── Rotation table ───────────────────────────────────────────────────────

    #[test]
    fn test_rotation_table_exact_entries() {
        assert_eq!(translate(record(0, 40, 0, 0)).rot, 38);
        assert_eq!(translate(record(0, 38, 0, 0)).rot, 39);
        assert_eq!(translate(record(0, 0, 0, 0)).rot, 37);
    }

    #[test]
    fn test_rotation_unlisted_codes_fall_back_to_idle() {
        assert_eq!(translate(record(0, 39, 0, 0)).rot, IDLE_CODE);
        assert_eq!(translate(record(0, 111, 0, 0)).rot, IDLE_CODE);
        assert_eq!(translate(record(0, i32::MIN, 0, 0)).rot, IDLE_CODE);
    }

    // ── Pan banding ──────────────────────────────────────────────────────────

    #[test]
    fn test_pan_look_ahead_band_snaps_to_zero() {
        // [-90, 0) snaps to 0, so x = 0/2 + 40 = 40 across the whole band.
        assert_eq!(translate(record(0, 0, -1, 0)).x, 40);
        assert_eq!(translate(record(0, 0, -45, 0)).x, 40);
        assert_eq!(translate(record(0, 0, -90, 0)).x, 40);
    }

    #[test]
    fn test_pan_look_behind_band_snaps_to_180() {
        // [-180, -90) snaps to 180, so x = 180/2 + 40 = 130.
        assert_eq!(translate(record(0, 0, -91, 0)).x, 130);
        assert_eq!(translate(record(0, 0, -135, 0)).x, 130);
        assert_eq!(translate(record(0, 0, -180, 0)).x, 130);
    }

    #[test]
    fn test_pan_outside_bands_passes_through() {
        // 10 is outside [-180, 0): no banding, halve, offset.  10/2 + 40 = 45.
        assert_eq!(translate(record(0, 0, 10, 0)).x, 45);
        // 0 is the band boundary itself and is not banded: 0/2 + 40 = 40.
        assert_eq!(translate(record(0, 0, 0, 0)).x, 40);
        // Positive angles up to the wrap point come through linearly.
        assert_eq!(translate(record(0, 0, 180, 0)).x, 130);
    }

    #[test]
    fn test_pan_below_negative_180_passes_through_and_truncates() {
        // -181 skips both bands; -181/2 truncates toward zero to -90,
        // -90 + 40 = -50, which the byte cast wraps to 206.
        assert_eq!(translate(record(0, 0, -181, 0)).x, 206);
        // Same angle on the vertical axis: -90 + 131 = 41, no wrap needed.
        assert_eq!(translate(record(0, 0, 0, -181)).y, 41);
    }

    #[test]
    fn test_pan_wraps_like_firmware_unsigned_char() {
        // 500/2 + 40 = 290, wraps to 34.
        assert_eq!(translate(record(0, 0, 500, 0)).x, 34);
        // 300/2 + 131 = 281, wraps to 25.
        assert_eq!(translate(record(0, 0, 0, 300)).y, 25);
    }

    #[test]
    fn test_vertical_pan_uses_its_own_offset() {
        // The vertical servo centers at 131 rather than 40.
        assert_eq!(translate(record(0, 0, 0, -45)).y, 131);
        assert_eq!(translate(record(0, 0, 0, -135)).y, 221);
        assert_eq!(translate(record(0, 0, 0, 10)).y, 136);
    }

    // ── Whole-command properties ─────────────────────────────────────────────

    #[test]
    fn test_translate_is_deterministic() {
        let rec = record(21, 40, -45, -135);
        let first = translate(rec);
        let second = translate(rec);
        assert_eq!(first, second);
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn test_to_bytes_appends_terminator() {
        let cmd = translate(record(19, 38, -45, -45));
        let bytes = cmd.to_bytes();
        assert_eq!(bytes.len(), ActuatorCommand::WIRE_SIZE);
        assert_eq!(bytes, [33, 39, 40, 131, b'\n']);
    }

    #[test]
    fn test_idle_record_produces_idle_opcodes() {
        // An unlisted code on both axes leaves both opcodes at '0'.
        let cmd = translate(record(111, 111, 0, 0));
        assert_eq!(cmd.ctl, IDLE_CODE);
        assert_eq!(cmd.rot, IDLE_CODE);
    }
}
