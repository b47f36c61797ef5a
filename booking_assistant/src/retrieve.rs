pub mod authentication;
pub mod endpoint;
pub mod fetch;
