//! Query engine
//!
//! Wires a validated [`QueryConfig`] into the pieces a query needs: the
//! intersection strategy, the statistics serializer, scan sessions, and the
//! optional type metadata cache.

use quarry_core::{Entry, QueryConfig, Range, Result};
use quarry_expr::{ExprArena, NodeId};
use quarry_index::{intersector_for, Intersector, MatchSet, TermLookup};
use quarry_metadata::{FileMetadataLoader, MetadataRefresher, TypeMetadataCache};
use quarry_scan::{
    DocumentSerializer, FinalDocumentIterator, RangeAdvancer, ScanSession, SortedSource,
    StatsCollector,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Configured entry point for evaluating and scanning queries
pub struct QueryEngine {
    config: QueryConfig,
    intersector: Box<dyn Intersector>,
    serializer: DocumentSerializer,
}

impl QueryEngine {
    /// Engine for hierarchical records; fails on an invalid config
    pub fn new(config: QueryConfig) -> Result<Self> {
        Self::build(config, true)
    }

    /// Engine for flat records, intersecting on exact identifiers
    pub fn flat(config: QueryConfig) -> Result<Self> {
        Self::build(config, false)
    }

    /// Engine from a `quarry.toml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(QueryConfig::from_file(path)?)
    }

    fn build(config: QueryConfig, hierarchical: bool) -> Result<Self> {
        config.validate()?;
        let intersector = intersector_for(&config, hierarchical)?;
        let serializer = DocumentSerializer::from_config(&config)?;
        debug!(
            target: "quarry::engine",
            intersector = intersector.name(),
            format = %serializer.format(),
            batch_size = config.batch_size,
            "query engine ready"
        );
        Ok(Self {
            config,
            intersector,
            serializer,
        })
    }

    /// The validated config
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The intersection strategy in use
    pub fn intersector(&self) -> &dyn Intersector {
        self.intersector.as_ref()
    }

    /// The statistics serializer in use
    pub fn serializer(&self) -> DocumentSerializer {
        self.serializer
    }

    /// Evaluate the expression at `root` against `lookup`
    pub fn evaluate(
        &self,
        arena: &ExprArena,
        root: NodeId,
        lookup: &dyn TermLookup,
    ) -> Option<MatchSet> {
        quarry_index::evaluate(arena, root, lookup, self.intersector.as_ref())
    }

    /// Batched scan over `ranges` with the configured batch size
    pub fn session<S: SortedSource, A: RangeAdvancer>(
        &self,
        source: S,
        advancer: A,
        ranges: impl IntoIterator<Item = Range>,
    ) -> ScanSession<S, A> {
        ScanSession::with_advancer(source, advancer, ranges).with_config(&self.config)
    }

    /// Wrap scan results so they end with the trailing statistics entry
    pub fn final_documents<I: Iterator<Item = Entry>>(
        &self,
        results: I,
        seek_range: &Range,
        collector: Arc<dyn StatsCollector>,
    ) -> FinalDocumentIterator<I> {
        FinalDocumentIterator::new(results, seek_range, collector, self.serializer)
    }

    /// Metadata cache over the configured `metadata_dir`, plus its
    /// refresher (not yet started); `Ok(None)` when no directory is
    /// configured.
    pub fn metadata(&self) -> Result<Option<(Arc<TypeMetadataCache>, MetadataRefresher)>> {
        if self.config.metadata_dir.is_none() {
            return Ok(None);
        }
        let loader = FileMetadataLoader::from_config(&self.config)?;
        let cache = Arc::new(TypeMetadataCache::new(Arc::new(loader)));
        let refresher = MetadataRefresher::from_config(Arc::clone(&cache), &self.config);
        Ok(Some((cache, refresher)))
    }
}
