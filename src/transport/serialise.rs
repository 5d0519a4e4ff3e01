//! MessagePack encoding for the Forward protocol.

use std::io;

use rmp_serde::Serializer;
use serde::Serialize;

use crate::projector::StructuredRecord;

/// One Forward Message-mode event: `[tag, time, record]`.
///
/// Serialises as a three-element array; the record itself becomes a map
/// keyed in field declaration order. Events are streamed back to back on
/// the socket without any length framing.
#[derive(Serialize)]
struct ForwardEvent<'a>(&'a str, i64, &'a StructuredRecord);

/// Encode one event into its wire bytes.
pub fn encode_event(tag: &str, time: i64, record: &StructuredRecord) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    ForwardEvent(tag, time, record)
        .serialize(&mut Serializer::new(&mut buf).with_struct_map())
        .map_err(io::Error::other)?;
    Ok(buf)
}
