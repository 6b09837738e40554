pub mod emailjs;
pub mod provider;

pub use emailjs::EmailJsGateway;
pub use provider::{EmailGateway, GatewayError};
