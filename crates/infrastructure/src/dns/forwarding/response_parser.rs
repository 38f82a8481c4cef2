use filter_dns_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::Record;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub rcode: ResponseCode,

    pub truncated: bool,

    pub answers: Vec<Record>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decode an upstream reply to the query sent with `expected_id`.
    pub fn parse(
        response_bytes: &[u8],
        expected_id: u16,
        server: &str,
    ) -> Result<DnsResponse, DomainError> {
        let mut message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("{} sent undecodable reply: {}", server, e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} replied with id {} to query {}",
                server,
                message.id(),
                expected_id
            )));
        }

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} sent a query instead of a response",
                server
            )));
        }

        let rcode = message.response_code();
        let truncated = message.truncated();
        let answers = message.take_answers();

        debug!(
            server,
            rcode = ?rcode,
            answers = answers.len(),
            truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            rcode,
            truncated,
            answers,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
