// Application Submission Pipeline: question list, validation, attachment
// encoding, notification rendering and relay delivery.
// All relay calls go through `relay::MailRelay`.

pub mod attachment;
pub mod encoding;
pub mod error;
pub mod handlers;
pub mod notification;
pub mod pipeline;
pub mod questions;
pub mod relay;
pub mod templates;
pub mod validation;
