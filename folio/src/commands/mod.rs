pub mod channels;
pub mod submit;
