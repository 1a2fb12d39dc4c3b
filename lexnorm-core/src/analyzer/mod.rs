//! Text analysis stages.
//!
//! Each stage is a small, stateless value that can be shared freely:
//! - **Filter**: ASCII case fold and character filtering
//! - **Tokenizer**: splits filtered text on whitespace runs
//! - **Stopwords**: immutable word list and the membership filter
//! - **Stemmer**: Porter suffix stripping

pub mod filter;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use filter::{CharFilter, FilterMode};
pub use stemmer::PorterStemmer;
pub use stopwords::{NonStopwords, StopwordSet, ENGLISH_V1_LABEL};
pub use tokenizer::{Tokenizer, Tokens};
