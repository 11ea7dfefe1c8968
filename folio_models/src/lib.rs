pub mod channel;
pub mod contact;
pub mod form;
mod macros;
pub mod notification;
