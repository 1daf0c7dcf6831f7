pub mod response;

pub use response::{ErrorBody, ErrorCode, GENERIC_ERROR_MESSAGE};
