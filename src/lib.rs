pub mod ffi;
pub mod model;
pub mod search;
pub mod tree;

pub use model::*;
pub use search::{rank, rank_scored, rank_with, RankError, RankOptions, ScoredRecipe};
pub use tree::{Color, NodeRef, OrderedKeySet};

uniffi::setup_scaffolding!();
