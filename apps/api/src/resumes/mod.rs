//! Resume endpoints: parse pasted text, parse an uploaded document, and run
//! the metered AI improvement on top of the parser output.

pub mod extract;
pub mod handlers;
pub mod improve;
