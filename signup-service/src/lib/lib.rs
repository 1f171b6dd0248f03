pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::signup;
pub use outbound::repositories;
