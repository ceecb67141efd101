// Internal modules
mod header;
mod payload;
#[allow(clippy::module_inception)]
mod token;

// Public API exports
pub use header::TokenHeader;
pub use token::Token;

pub(crate) use payload::Payload;
