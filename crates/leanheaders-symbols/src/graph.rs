//! Symbol graph: which files supply which symbols

use crate::{file_name, FileAnalysis, FileId, Supply, SupplyOrigin, SymbolKey};
use indexmap::IndexMap;
use leanheaders_ast::{Requirement, Span};
use serde::Serialize;

/// A supply fact attributed to the file it appears in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplyEntry {
    pub file: FileId,
    pub supply: Supply,
}

/// All supply facts of an analyzed file set
#[derive(Debug, Default, Serialize)]
pub struct SymbolGraph {
    /// File identifiers indexed by [`FileId`]
    files: Vec<String>,

    /// Suppliers per symbol, ordered by preference
    supplies: IndexMap<SymbolKey, Vec<SupplyEntry>>,

    /// Keys per name, for needs that accept several kinds
    by_name: IndexMap<String, Vec<SymbolKey>>,
}

impl SymbolGraph {
    /// Create a new empty symbol graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from analyzed files.
    ///
    /// Every file also supplies itself under its file name, so
    /// `need import file X.h` resolves to `X.h` when it is part of the set.
    pub fn build(analyses: &[FileAnalysis]) -> Self {
        let mut graph = Self::new();
        for analysis in analyses {
            let id = graph.add_file(&analysis.file);
            graph.insert(
                id,
                Supply {
                    symbol: SymbolKey::file(analysis.file_name()),
                    strength: Requirement::Import,
                    origin: SupplyOrigin::File,
                    span: Span::dummy(),
                },
            );
            for supply in &analysis.supplies {
                graph.insert(id, supply.clone());
            }
        }
        graph.sort_suppliers();
        graph
    }

    fn add_file(&mut self, file: &str) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(file.to_string());
        id
    }

    pub fn insert(&mut self, file: FileId, supply: Supply) {
        let key = supply.symbol.clone();
        if !self.supplies.contains_key(&key) {
            self.by_name
                .entry(key.name.clone())
                .or_default()
                .push(key.clone());
        }
        self.supplies
            .entry(key)
            .or_default()
            .push(SupplyEntry { file, supply });
    }

    /// Import-strength facts first, declarations before directives, then
    /// by file name so the choice does not depend on input order
    fn sort_suppliers(&mut self) {
        let files = &self.files;
        for entries in self.supplies.values_mut() {
            entries.sort_by(|a, b| {
                b.supply
                    .strength
                    .cmp(&a.supply.strength)
                    .then(a.supply.origin.cmp(&b.supply.origin))
                    .then_with(|| file_name(&files[a.file.0 as usize]).cmp(file_name(&files[b.file.0 as usize])))
                    .then_with(|| files[a.file.0 as usize].cmp(&files[b.file.0 as usize]))
            });
        }
    }

    /// File identifier of an id
    pub fn file(&self, id: FileId) -> Option<&str> {
        self.files.get(id.0 as usize).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of distinct supplied symbols
    pub fn len(&self) -> usize {
        self.supplies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supplies.is_empty()
    }

    pub fn contains(&self, symbol: &SymbolKey) -> bool {
        self.supplies.contains_key(symbol)
    }

    /// Suppliers of exactly this key
    pub fn get(&self, symbol: &SymbolKey) -> &[SupplyEntry] {
        self.supplies.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Suppliers whose facts a need for `symbol` accepts, kind by kind:
    /// classes, then protocols, then types
    pub fn suppliers<'g>(&'g self, symbol: &SymbolKey) -> impl Iterator<Item = &'g SupplyEntry> + 'g {
        let mut keys: Vec<&SymbolKey> = self
            .by_name
            .get(&symbol.name)
            .map(|keys| keys.iter().filter(|key| symbol.accepts(key)).collect())
            .unwrap_or_default();
        keys.sort();
        keys.into_iter().flat_map(move |key| self.get(key).iter())
    }

    /// Iterate over every supplied symbol with its suppliers
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolKey, &[SupplyEntry])> {
        self.supplies.iter().map(|(key, entries)| (key, entries.as_slice()))
    }
}
