// Website contact form, delivered through the same mail relay as applications.

pub mod enquiry;
pub mod handlers;
