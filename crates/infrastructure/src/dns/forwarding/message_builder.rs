//! DNS Message Builder
//!
//! Constructs upstream query messages in wire format using `hickory-proto`.

use filter_dns_domain::{DnsQuestion, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `question` with a random ID.
    ///
    /// Returns the ID alongside the bytes for response matching.
    pub fn build_query(question: &DnsQuestion) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_ascii(&*question.name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", question.name, e))
        })?;

        let mut query = Query::query(name, RecordType::from(question.query_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .add_query(query);

        let bytes = serialize_message(&message, false)?;
        Ok((id, bytes))
    }
}

/// Serialize a Message to wire format bytes. `canonical` turns off name
/// compression.
pub fn serialize_message(message: &Message, canonical: bool) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    encoder.set_canonical_names(canonical);

    message
        .emit(&mut encoder)
        .map_err(|e| DomainError::MessageEncoding(e.to_string()))?;

    Ok(buf)
}
