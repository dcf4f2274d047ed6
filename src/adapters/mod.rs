pub mod ntp_client;
pub mod resolver;
