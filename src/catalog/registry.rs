//! Block catalog
//!
//! Name-keyed registry of block definitions. Built once before a generation
//! run and read-only afterwards; duplicate names are a setup error.

use crate::catalog::BlockDefinition;
use crate::error::{ForgeError, ForgeResult};
use rustc_hash::FxHashMap;

/// Registry of all block templates available to the generator
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    blocks: Vec<BlockDefinition>,
    name_to_index: FxHashMap<String, usize>,
}

impl BlockCatalog {
    pub fn new() -> Self {
        BlockCatalog::default()
    }

    /// Build a catalog from a list of definitions, rejecting duplicates
    pub fn from_blocks(blocks: impl IntoIterator<Item = BlockDefinition>) -> ForgeResult<Self> {
        let mut catalog = BlockCatalog::new();
        for block in blocks {
            catalog.register(block)?;
        }
        Ok(catalog)
    }

    /// Parse a catalog from a JSON array of block definitions
    pub fn from_json(json: &str) -> ForgeResult<Self> {
        let blocks: Vec<BlockDefinition> = serde_json::from_str(json)?;
        BlockCatalog::from_blocks(blocks)
    }

    /// Register a block, returning its catalog index
    pub fn register(&mut self, block: BlockDefinition) -> ForgeResult<usize> {
        if self.name_to_index.contains_key(&block.name) {
            return Err(ForgeError::DuplicateBlock(block.name));
        }
        let index = self.blocks.len();
        log::debug!("registered block '{}' at index {}", block.name, index);
        self.name_to_index.insert(block.name.clone(), index);
        self.blocks.push(block);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&BlockDefinition> {
        self.blocks.get(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BlockDefinition> {
        self.index_of(name).and_then(|i| self.blocks.get(i))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn all(&self) -> &[BlockDefinition] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
