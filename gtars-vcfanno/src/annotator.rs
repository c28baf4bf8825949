//! The annotator: matches query alleles against candidate records from one VCF
//! source and memoizes the result per query.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use log::info;

use crate::cache::{BoundedCache, CacheStats, EvictionPolicy};
use crate::config::AnnotatorConfig;
use crate::consts::DEFAULT_CACHE_CAPACITY;
use crate::errors::{Result, VcfAnnoError};
use crate::extract::extract_value;
use crate::header::VcfHeader;
use crate::matching::match_alleles;
use crate::models::{AnnotationRecord, ContextWindow, FieldDescriptor, VariantRecord};
use crate::registry::FieldRegistry;

/// Everything an annotation result depends on. Compared by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: VariantRecord,
    pub context: ContextWindow,
    pub candidates: Vec<VariantRecord>,
}

/// Mutable per-annotator state: the result cache and its hit/miss counters.
#[derive(Debug)]
struct AnnotationState {
    cache: BoundedCache<CacheKey, Vec<AnnotationRecord>>,
    hits: u64,
    misses: u64,
}

/// Builder for constructing a [`VcfAnnotator`].
///
/// # Examples
///
/// ```rust,no_run
/// use gtars_vcfanno::VcfAnnotator;
/// use std::path::PathBuf;
///
/// # fn main() -> gtars_vcfanno::Result<()> {
/// let annotator = VcfAnnotator::builder()
///     .with_name("gnomAD")
///     .with_version("4.1")
///     .with_source(PathBuf::from("gnomad.sites.vcf.gz"))
///     .finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct VcfAnnotatorBuilder {
    name: Option<String>,
    version: Option<String>,
    source: Option<PathBuf>,
    header: Option<VcfHeader>,
    overrides: HashMap<String, String>,
    cache_capacity: Option<usize>,
    eviction: EvictionPolicy,
}

impl VcfAnnotatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name used to namespace output fields.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the VCF whose header declares the fields.
    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.source = Some(path);
        self
    }

    /// Uses an already-read header instead of reading one from the source path.
    pub fn with_header(mut self, header: VcfHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets replacement defaults, keyed by namespaced field name.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    pub fn with_eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction = policy;
        self
    }

    /// Consumes the builder, reading the source header if none was given.
    pub fn finish(self) -> Result<VcfAnnotator> {
        let name = self.name.ok_or(VcfAnnoError::MissingSetting("name"))?;
        let version = self.version.ok_or(VcfAnnoError::MissingSetting("version"))?;

        let header = match (self.header, &self.source) {
            (Some(header), _) => header,
            (None, Some(path)) => VcfHeader::from_path(path)?,
            (None, None) => return Err(VcfAnnoError::MissingSetting("source")),
        };

        let registry = FieldRegistry::new(&name, &header.info, &self.overrides);
        let capacity = self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY);

        Ok(VcfAnnotator {
            name,
            version,
            source: self.source,
            registry,
            state: AnnotationState {
                cache: BoundedCache::with_policy(capacity, self.eviction),
                hits: 0,
                misses: 0,
            },
        })
    }
}

///
/// Annotates query variants with the INFO values of matching records from one
/// VCF source.
///
/// The output field set is fixed at construction from the source header. A source
/// declaring no INFO fields yields an annotator that never produces anything.
///
/// `annotate` takes `&mut self`: the cache and counters are owned by one annotator
/// and updated without locking. Give each worker thread its own annotator.
///
#[derive(Debug)]
pub struct VcfAnnotator {
    name: String,
    version: String,
    source: Option<PathBuf>,
    registry: FieldRegistry,
    state: AnnotationState,
}

impl VcfAnnotator {
    pub fn builder() -> VcfAnnotatorBuilder {
        VcfAnnotatorBuilder::new()
    }

    pub fn from_header(
        name: &str,
        version: &str,
        header: &VcfHeader,
        overrides: &HashMap<String, String>,
    ) -> Self {
        VcfAnnotator {
            name: name.to_string(),
            version: version.to_string(),
            source: None,
            registry: FieldRegistry::new(name, &header.info, overrides),
            state: AnnotationState {
                cache: BoundedCache::new(DEFAULT_CACHE_CAPACITY),
                hits: 0,
                misses: 0,
            },
        }
    }

    pub fn from_config(config: &AnnotatorConfig) -> Result<Self> {
        VcfAnnotator::builder()
            .with_name(config.name.as_str())
            .with_version(config.version.as_str())
            .with_source(config.source.clone())
            .with_overrides(config.overrides.clone())
            .with_cache_capacity(config.cache_capacity)
            .with_eviction_policy(config.eviction)
            .finish()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Namespaced names of every field this annotator produces, in output order.
    pub fn supported_fields(&self) -> impl Iterator<Item = &str> {
        self.registry.supported_fields()
    }

    pub fn field_descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.registry.descriptor(name)
    }

    /// Renamed `##INFO` lines for merging into an output header.
    pub fn info_header_lines(&self) -> Vec<String> {
        self.registry
            .descriptors()
            .iter()
            .map(FieldDescriptor::to_info_line)
            .collect()
    }

    ///
    /// Annotate every alternate allele of `query` from `candidates`.
    ///
    /// Candidates are expected to be the source records overlapping the query.
    /// Each match between a query allele and a candidate allele produces one
    /// record carrying the candidate's values; query alleles left unmatched get one
    /// record of defaults. Records are ordered by query allele index.
    ///
    /// `gene_annotations` is accepted for callers that also hold gene-model
    /// annotations for the query; it does not affect the result.
    ///
    pub fn annotate(
        &mut self,
        query: &VariantRecord,
        context: &ContextWindow,
        candidates: &[VariantRecord],
        _gene_annotations: Option<&[AnnotationRecord]>,
    ) -> Vec<AnnotationRecord> {
        let key = CacheKey {
            query: query.clone(),
            context: context.clone(),
            candidates: candidates.to_vec(),
        };

        if let Some(cached) = self.state.cache.get(&key).cloned() {
            self.state.hits += 1;
            return cached;
        }

        let annotations = if self.registry.is_empty() {
            Vec::new()
        } else {
            self.match_candidates(query, candidates)
        };

        self.state.misses += 1;
        self.state.cache.put(key, annotations.clone());
        annotations
    }

    /// One record of defaults per alternate allele of `query`, without matching.
    pub fn annotate_defaults(
        &self,
        query: &VariantRecord,
        _context: &ContextWindow,
    ) -> Vec<AnnotationRecord> {
        self.defaults_for(query, &BTreeSet::new())
    }

    ///
    /// One record of defaults for each alternate allele of `query` whose index is
    /// not in `matched`.
    ///
    pub fn defaults_for(
        &self,
        query: &VariantRecord,
        matched: &BTreeSet<usize>,
    ) -> Vec<AnnotationRecord> {
        if self.registry.is_empty() {
            return Vec::new();
        }

        query
            .alternates()
            .iter()
            .enumerate()
            .filter(|(idx, _)| !matched.contains(idx))
            .map(|(idx, allele)| AnnotationRecord {
                allele: allele.clone(),
                alt_index: idx,
                source: self.name.clone(),
                fields: self.registry.defaults(),
            })
            .collect()
    }

    fn match_candidates(
        &self,
        query: &VariantRecord,
        candidates: &[VariantRecord],
    ) -> Vec<AnnotationRecord> {
        let mut annotations = Vec::new();
        let mut matched = BTreeSet::new();

        for candidate in candidates {
            for (query_idx, candidate_idx) in match_alleles(query, candidate) {
                let mut fields = self.registry.defaults();

                for (raw_name, value) in candidate.info() {
                    // values for ids missing from the header are not part of the output
                    let Some(descriptor) = self.registry.descriptor_for_raw(raw_name) else {
                        continue;
                    };
                    let value = extract_value(query, candidate, descriptor, value, candidate_idx);
                    fields.insert(descriptor.name.clone(), value);
                }

                annotations.push(AnnotationRecord {
                    allele: query.alternates()[query_idx].clone(),
                    alt_index: query_idx,
                    source: self.name.clone(),
                    fields,
                });
                matched.insert(query_idx);
            }
        }

        annotations.extend(self.defaults_for(query, &matched));
        annotations.sort_by_key(|annotation| annotation.alt_index);
        annotations
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.state.hits,
            misses: self.state.misses,
            size: self.state.cache.len(),
            capacity: self.state.cache.capacity(),
        }
    }

    fn summary(&self) -> String {
        let stats = self.cache_stats();
        format!(
            "{} {} cache hits/total: {}/{}",
            self.name,
            self.version,
            stats.hits,
            stats.total()
        )
    }

    /// Shut the annotator down, logging its cache hit rate once.
    pub fn close(self) -> CacheStats {
        info!("{}", self.summary());
        self.cache_stats()
    }
}
