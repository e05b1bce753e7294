pub mod db_session;
pub mod request_id;

pub use db_session::db_session_middleware;
pub use request_id::{make_span_with_request_id, request_id_middleware, RequestId};
