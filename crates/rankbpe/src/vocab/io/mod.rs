//! # Vocabulary IO
//!
//! ## Loading A Rank Table
//!
//! ```rust,no_run
//! use rankbpe::vocab::{RankTable, io::load_base64_rank_table_path};
//!
//! let table: RankTable<u32> = load_base64_rank_table_path("cl100k_base.tiktoken")?;
//! assert!(table.lookup(b"hello").is_some());
//! # Ok::<(), rankbpe::RankBpeError>(())
//! ```

mod base64_vocab;

#[doc(inline)]
pub use base64_vocab::*;
