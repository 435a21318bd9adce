//! Incremental, zero-copy YEAST tokenizer for YAML 1.2.
//!
//! The tokenizer labels every byte of its input with a typed token:
//! structural indicators, content text, indentation, classified line breaks,
//! tag and anchor boundaries, document and node boundaries, escape
//! sequences, errors and unparsed recovery regions. Tokens reference ranges
//! of the original source bytes; no decoded string is materialized.
//!
//! A parser runs one grammar production, selected by name (and optional
//! indentation `n`, context `c` and chomping `t` parameters) at open time:
//!
//! ```
//! use yeast::{ByteSource, Code, Parser, Production};
//!
//! let source = ByteSource::from_str("# a comment\n");
//! let mut parser = Parser::new(source, &Production::named("l-comment"))?;
//! loop {
//!     let token = parser.next_token()?;
//!     if token.code == Code::Done {
//!         break;
//!     }
//!     println!("{} {:?}", token.code.as_char(), token.bytes);
//! }
//! # Ok::<(), yeast::YeastError>(())
//! ```
//!
//! Input can come from a slice, an owned buffer, any [`std::io::Read`], a
//! file (memory-mapped when possible) or standard input; see [`ByteSource`].
//! Encodings UTF-8, UTF-16LE/BE and UTF-32LE/BE are detected automatically.

pub mod classify;
pub mod encoding;
pub mod error;
mod machine;
pub mod parser;
mod productions;
pub mod source;
pub mod token;

pub use encoding::Encoding;
pub use error::{YeastError, YeastResult};
pub use parser::{Parser, Production};
pub use source::ByteSource;
pub use token::{Code, CodeType, Token};
