//! ThinkGear (NeuroSky) serial protocol decoding.
//!
//! Packets are `AA AA len payload checksum`. The framer syncs on the double
//! `0xAA`, validates the one's complement checksum and hands the payload to
//! the parser, which walks its rows: optional `0x55` extended-code bytes, a
//! row code, an explicit length byte for codes above `0x7F`, then the value.
//!
//! Unknown row codes and rows that overrun the payload are errors for the
//! whole payload. Byte constants live in `layout`, cursor reads in `reader`.

pub mod error;
pub mod framer;
pub mod layout;
pub mod packet;
pub mod parser;
pub mod reader;

pub use error::{DecodeError, FrameError};
pub use framer::{FramerStats, PacketFramer};
pub use packet::{Packet, checksum, encode_packet};
pub use parser::parse_payload;
