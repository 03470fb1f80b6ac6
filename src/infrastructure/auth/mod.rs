pub mod middleware;
pub mod request_id;

pub use middleware::session_middleware;
pub use request_id::{request_id_middleware, RequestId};
