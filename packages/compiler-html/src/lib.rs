//! # Pagebuilder HTML Compiler
//!
//! Static export: a pure function from a [`Document`](pagebuilder_document::Document)
//! to a self-contained HTML page. Blocks are visited through the shared
//! [`Visitor`](pagebuilder_common::Visitor), in the same order the live
//! preview uses.

mod compiler;
mod stylesheet;

pub use compiler::{compile_blocks, compile_to_html, escape_html, CompileError, CompileOptions};
pub use stylesheet::STYLESHEET;
