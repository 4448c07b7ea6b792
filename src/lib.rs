pub mod config;
pub mod error;
pub mod logging;
pub mod shared;
pub mod tree;

pub use crate::config::Config;
pub use crate::error::{TreeError, TreeResult};
pub use crate::shared::SharedTree;
pub use crate::tree::{AvlTree, Iter, Key, KeySum, NodeRef, TreeSnapshot};
