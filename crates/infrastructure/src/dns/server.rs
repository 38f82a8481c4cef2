use crate::dns::forwarding::message_builder::serialize_message;
use filter_dns_application::ports::{QueryEvent, QueryEventSink};
use filter_dns_application::use_cases::HandleDnsQueryUseCase;
use filter_dns_domain::DnsQuestion;
use hickory_proto::op::{Header, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error};

/// Turns inbound DNS messages into replies.
///
/// Every decodable query gets a reply. Failures are reported to the event
/// sink and answered with an empty `NOERROR` reply. Inbound responses are
/// dropped without a reply.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    events: Arc<dyn QueryEventSink>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>, events: Arc<dyn QueryEventSink>) -> Self {
        Self { use_case, events }
    }

    /// `None` when the message is itself a response.
    pub async fn handle_message(&self, request: &Message) -> Option<Message> {
        if request.message_type() == MessageType::Response {
            debug!(id = request.id(), "Dropping inbound response");
            return None;
        }

        let questions: Vec<DnsQuestion> = request.queries().iter().map(question_of).collect();
        let answers = self
            .answers(request.id(), request.op_code(), &questions)
            .await;

        let mut reply = reply_to(request);
        reply.insert_answers(answers);
        Some(reply)
    }

    /// Wire-level entry point for the UDP listener. `None` means nothing
    /// should be sent back.
    pub async fn handle_bytes(&self, request_bytes: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(request_bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = request_bytes.len(), "Dropping undecodable request");
                return None;
            }
        };

        let reply = self.handle_message(&request).await?;

        match serialize_message(&reply, true) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(error = %e, id = reply.id(), "Failed to encode reply");
                None
            }
        }
    }

    async fn answers(&self, id: u16, op_code: OpCode, questions: &[DnsQuestion]) -> Vec<Record> {
        if op_code != OpCode::Query {
            debug!(id, op_code = ?op_code, "Ignoring non-query opcode");
            return Vec::new();
        }

        match self.use_case.execute(questions).await {
            Ok(answers) => answers,
            Err(error) => {
                self.events.record(QueryEvent::QueryFailed { id, error });
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if request.message_type() == MessageType::Response {
            debug!(id = request.id(), client = %request.src(), "Dropping inbound response");
            return ResponseInfo::from(*request.header());
        }

        let questions: Vec<DnsQuestion> = std::iter::once(request.query())
            .map(|query| question_of(query.original()))
            .collect();
        let answers = self
            .answers(request.id(), request.op_code(), &questions)
            .await;

        let header = Header::response_from_request(request.header());
        let response = MessageResponseBuilder::from_message_request(request).build(
            header,
            answers.iter(),
            &[],
            &[],
            &[],
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, client = %request.src(), "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

fn question_of(query: &Query) -> DnsQuestion {
    DnsQuestion::new(query.name().to_ascii(), u16::from(query.query_type()))
}

/// Empty `NOERROR` reply echoing the request's id, opcode, RD/CD flags and
/// questions.
fn reply_to(request: &Message) -> Message {
    let mut reply = Message::new();
    reply
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_checking_disabled(request.checking_disabled())
        .set_response_code(ResponseCode::NoError)
        .add_queries(request.queries().to_vec());
    reply
}
