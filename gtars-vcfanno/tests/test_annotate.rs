//! End-to-end tests: source VCF header on disk -> annotator -> annotations.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use tempfile::tempdir;

use gtars_vcfanno::{
    Allele, AnnotatorConfig, ContextWindow, EvictionPolicy, FieldCount, VariantRecord,
    VcfAnnoError, VcfAnnotator,
};

#[fixture]
fn path_to_source() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/source.vcf")
}

#[fixture]
fn annotator(path_to_source: PathBuf) -> VcfAnnotator {
    VcfAnnotator::builder()
        .with_name("SRC")
        .with_version("2024.1")
        .with_source(path_to_source)
        .finish()
        .unwrap()
}

fn record(reference: &str, alternates: &[&str]) -> VariantRecord {
    VariantRecord::new(
        "chr1",
        1000,
        1000 + reference.len() as u64 - 1,
        reference,
        alternates.iter().map(|a| Allele::from(*a)).collect(),
    )
}

/// The single record of tests/data/source.vcf.
fn source_record() -> VariantRecord {
    record("A", &["C", "G"])
        .with_field("DP", "20")
        .with_field("AF", vec!["0.1", "0.2"])
        .with_field("AC", vec!["14", "4", "2"])
        .with_field("GP", vec!["0.7", "0.1", "0.05", "0.1", "0.03", "0.02"])
}

#[rstest]
fn test_fields_from_source_header(annotator: VcfAnnotator) {
    let fields: Vec<&str> = annotator.supported_fields().collect();
    assert_eq!(fields, vec!["SRC_AC", "SRC_AF", "SRC_DP", "SRC_GP", "SRC_HOM"]);

    let hom = annotator.field_descriptor("SRC_HOM").unwrap();
    assert_eq!(hom.default, "false");
    assert_eq!(annotator.field_descriptor("SRC_AC").unwrap().count, FieldCount::PerAllele);
}

#[rstest]
fn test_info_header_lines_are_renamed(annotator: VcfAnnotator) {
    let lines = annotator.info_header_lines();

    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[2],
        "##INFO=<ID=SRC_DP,Number=1,Type=Integer,Description=\"Combined depth across samples\">"
    );
}

#[rstest]
fn test_gzipped_source(path_to_source: PathBuf) {
    let dir = tempdir().unwrap();
    let gz_path = dir.path().join("source.vcf.gz");
    {
        let mut encoder = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::default());
        encoder.write_all(&fs::read(&path_to_source).unwrap()).unwrap();
        encoder.finish().unwrap();
    }

    let annotator = VcfAnnotator::builder()
        .with_name("SRC")
        .with_version("1")
        .with_source(gz_path)
        .finish()
        .unwrap();

    assert_eq!(annotator.registry().len(), 5);
}

#[rstest]
fn test_matched_and_unmatched_alleles(mut annotator: VcfAnnotator) {
    // query carries G and T; the source has C and G
    let query = record("A", &["T", "G"]);
    let context = ContextWindow::around(&query);

    let annotations = annotator.annotate(&query, &context, &[source_record()], None);

    assert_eq!(annotations.len(), 2);

    let t = &annotations[0];
    assert_eq!(t.allele, Allele::from("T"));
    assert_eq!(t.fields.values().all(|v| v.is_empty() || v == "false"), true);

    let g = &annotations[1];
    assert_eq!(g.allele, Allele::from("G"));
    assert_eq!(g.alt_index, 1);
    assert_eq!(g.source, "SRC");
    assert_eq!(g.get("SRC_AF"), Some("0.2"));
    assert_eq!(g.get("SRC_AC"), Some("2"));
    assert_eq!(g.get("SRC_DP"), Some("20"));
    assert_eq!(g.get("SRC_GP"), Some("0.7,0.1,0.05,0.1,0.03,0.02"));
    assert_eq!(g.get("SRC_HOM"), Some("false"));
}

#[rstest]
fn test_scalar_copied_to_matching_allele_only(mut annotator: VcfAnnotator) {
    let query = record("A", &["C", "G"]);
    let candidate = record("A", &["C"]).with_field("AF", "0.1");
    let context = ContextWindow::around(&query);

    let annotations = annotator.annotate(&query, &context, &[candidate], None);

    assert_eq!(annotations[0].allele, Allele::from("C"));
    assert_eq!(annotations[0].get("SRC_AF"), Some("0.1"));
    assert_eq!(annotations[1].allele, Allele::from("G"));
    assert_eq!(annotations[1].get("SRC_AF"), Some(""));
}

#[rstest]
fn test_biallelic_list_is_copied_whole(mut annotator: VcfAnnotator) {
    let query = record("A", &["C"]);
    let candidate = record("A", &["C"]).with_field("AF", vec!["0.2", "0.3"]);
    let context = ContextWindow::around(&query);

    let annotations = annotator.annotate(&query, &context, &[candidate], None);

    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].get("SRC_AF"), Some("0.2,0.3"));
}

#[rstest]
fn test_indel_matched_after_trimming(mut annotator: VcfAnnotator) {
    // CTT>CT in the query is written CT>C in the source
    let query = record("CTT", &["CT", "GTT"]);
    let candidate = record("CT", &["C", "CTT"]).with_field("AF", vec!["0.01", "0.02"]);
    let context = ContextWindow::around(&query);

    let annotations = annotator.annotate(&query, &context, &[candidate], None);

    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0].get("SRC_AF"), Some("0.01"));
    assert_eq!(annotations[1].get("SRC_AF"), Some(""));
}

#[rstest]
fn test_overrides_replace_defaults(path_to_source: PathBuf) {
    let overrides = HashMap::from([
        ("SRC_AF".to_string(), "0".to_string()),
        ("OTHER_AF".to_string(), "ignored".to_string()),
    ]);
    let mut annotator = VcfAnnotator::builder()
        .with_name("SRC")
        .with_version("1")
        .with_source(path_to_source)
        .with_overrides(overrides)
        .finish()
        .unwrap();

    let query = record("A", &["T"]);
    let context = ContextWindow::around(&query);
    let annotations = annotator.annotate(&query, &context, &[source_record()], None);

    assert_eq!(annotations[0].get("SRC_AF"), Some("0"));
    assert_eq!(annotations[0].get("OTHER_AF"), None);
}

#[rstest]
fn test_source_without_info_fields_is_a_no_op() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.vcf");
    fs::write(
        &path,
        "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n",
    )
    .unwrap();

    let mut annotator = VcfAnnotator::builder()
        .with_name("EMPTY")
        .with_version("0")
        .with_source(path)
        .finish()
        .unwrap();

    let query = record("A", &["C", "G"]);
    let context = ContextWindow::around(&query);

    assert_eq!(annotator.supported_fields().count(), 0);
    assert_eq!(annotator.annotate(&query, &context, &[source_record()], None).is_empty(), true);
    assert_eq!(annotator.annotate(&query, &context, &[], None).is_empty(), true);
    assert_eq!(annotator.annotate_defaults(&query, &context).is_empty(), true);
}

#[rstest]
fn test_malformed_source_fails_construction() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.vcf");
    fs::write(&path, "chr1\t1000\t.\tA\tC\t.\tPASS\t.\n").unwrap();

    let result = VcfAnnotator::builder()
        .with_name("SRC")
        .with_version("1")
        .with_source(path)
        .finish();
    assert!(matches!(result, Err(VcfAnnoError::InvalidHeader(_))));

    let result = VcfAnnotator::builder()
        .with_name("SRC")
        .with_version("1")
        .with_source(dir.path().join("missing.vcf"))
        .finish();
    assert!(matches!(result, Err(VcfAnnoError::HeaderRead { .. })));
}

#[rstest]
fn test_fifo_cache_evicts_regardless_of_reads(path_to_source: PathBuf) {
    let capacity = 4;
    let mut annotator = VcfAnnotator::builder()
        .with_name("SRC")
        .with_version("1")
        .with_source(path_to_source)
        .with_cache_capacity(capacity)
        .finish()
        .unwrap();

    let queries: Vec<VariantRecord> = ["C", "G", "T", "AC", "AG"]
        .iter()
        .map(|alt| record("A", &[*alt]))
        .collect();
    let candidates = vec![source_record()];

    for (i, query) in queries.iter().enumerate() {
        // keep re-reading the second query
        if i >= 2 {
            annotator.annotate(&queries[1], &ContextWindow::around(&queries[1]), &candidates, None);
        }
        annotator.annotate(query, &ContextWindow::around(query), &candidates, None);
    }
    let before = annotator.cache_stats();
    assert_eq!(before.hits, 3);
    assert_eq!(before.misses, 5);

    // both the first and the frequently read second query were evicted
    annotator.annotate(&queries[0], &ContextWindow::around(&queries[0]), &candidates, None);
    annotator.annotate(&queries[1], &ContextWindow::around(&queries[1]), &candidates, None);
    let after = annotator.cache_stats();
    assert_eq!(after.misses, before.misses + 2);

    let stats = annotator.close();
    assert_eq!(stats.total(), 10);
}

#[rstest]
fn test_lru_from_config(path_to_source: PathBuf) {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("annotator.toml");
    fs::write(
        &config_path,
        format!(
            "name = \"SRC\"\nversion = \"1\"\nsource = \"{}\"\n{}",
            path_to_source.display(),
            "cache_capacity = 4\neviction = \"lru\"\n"
        ),
    )
    .unwrap();

    let config = AnnotatorConfig::from_path(&config_path).unwrap();
    assert_eq!(config.eviction, EvictionPolicy::Lru);
    let mut annotator = VcfAnnotator::from_config(&config).unwrap();

    let queries: Vec<VariantRecord> = ["C", "G", "T", "AC", "AG"]
        .iter()
        .map(|alt| record("A", &[*alt]))
        .collect();
    let candidates = vec![source_record()];

    for (i, query) in queries.iter().enumerate() {
        if i >= 2 {
            annotator.annotate(&queries[1], &ContextWindow::around(&queries[1]), &candidates, None);
        }
        annotator.annotate(query, &ContextWindow::around(query), &candidates, None);
    }

    // reads kept the second query alive
    let before = annotator.cache_stats();
    annotator.annotate(&queries[1], &ContextWindow::around(&queries[1]), &candidates, None);
    assert_eq!(annotator.cache_stats().hits, before.hits + 1);
}

#[rstest]
fn test_context_is_part_of_the_cache_key(mut annotator: VcfAnnotator) {
    let query = record("A", &["C"]);
    let narrow = ContextWindow::around(&query);
    let wide = ContextWindow::new("chr1", 900, 1100);

    annotator.annotate(&query, &narrow, &[source_record()], None);
    annotator.annotate(&query, &wide, &[source_record()], None);
    annotator.annotate(&query, &wide, &[source_record()], None);

    // same interval, but now carrying reference bases
    let with_bases = ContextWindow::new("chr1", 900, 1100).with_bases(vec![b'A'; 200]);
    assert_eq!(with_bases.bases.as_ref().map(Vec::len), Some(200));
    annotator.annotate(&query, &with_bases, &[source_record()], None);

    let stats = annotator.cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 3));
}
