pub use folio_utils_derive::trace_instrument;

mod macros;
