//! XML front-end: parsing, the document tree, and serialization.
//!
//! The validator only ever sees math as a raw string; this module turns it
//! into a navigable tree. The parser is deliberately small and
//! error-tolerant: diagnostics accumulate on the document, and a
//! structurally broken input yields a document with no root rather than a
//! panic or an early return.

mod dom;
mod parser;

pub use dom::{NodeId, XmlAttribute, XmlDocument};
pub use parser::parse;
