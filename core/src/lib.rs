pub mod builder;
pub mod corpus;
pub mod index;
pub mod phrase;
pub mod search;
pub mod tokenizer;

pub use builder::{BuildReport, IndexBuilder, ReadPolicy, SkippedDocument};
pub use corpus::{DocumentRef, DocumentSource, InMemoryCorpus};
pub use index::{IndexStats, PositionalIndex, PostingList};
pub use phrase::{extract_phrase, PhraseExtractor};
pub use search::{evaluate, search, Direction, MatchRecord, ProximityQuery, SearchOutcome};

pub type DocId = u32;
pub type Position = u32;
