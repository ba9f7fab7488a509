//! Protocol module containing the wire types and the binary codec.

pub mod codec;
pub mod messages;

pub use codec::{
    decode_control_record, decode_frame_header, encode_control_record, encode_frame_header,
    ProtocolError,
};
pub use messages::*;
