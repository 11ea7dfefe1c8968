use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Wraps a function in a `tracing` span that records its arguments and, at
/// trace level, its return value.
///
/// Arguments for the span (e.g. `skip(self)`) are forwarded to
/// [`tracing::instrument`](https://docs.rs/tracing/latest/tracing/attr.instrument.html).
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let span_args = if meta.is_empty() {
        quote!(ret(level = "trace"))
    } else {
        quote!(ret(level = "trace"), #meta)
    };

    quote! {
        #[::tracing::instrument(#span_args)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!("call");
            #block
        }
    }
    .into()
}
