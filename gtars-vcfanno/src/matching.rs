//! Allele correspondence between a query record and one candidate record.

use crate::models::VariantRecord;
use crate::normalize::decompose;

///
/// Find every `(query_alt_index, candidate_alt_index)` whose alleles are the same
/// variant.
///
/// Two biallelic records match only when their reference and sole alternate
/// alleles are identical as given. Otherwise both records are decomposed into
/// trimmed biallelic pairs and every query pair is compared with every candidate
/// pair, so a query allele equal to two candidate alleles yields two entries.
///
/// Loci are not compared; candidates are expected to already overlap the query.
///
pub fn match_alleles(query: &VariantRecord, candidate: &VariantRecord) -> Vec<(usize, usize)> {
    if query.is_biallelic() && candidate.is_biallelic() {
        return if query.reference() == candidate.reference()
            && query.alternates()[0] == candidate.alternates()[0]
        {
            vec![(0, 0)]
        } else {
            Vec::new()
        };
    }

    let query_pairs = decompose(query);
    let candidate_pairs = decompose(candidate);

    let mut matches = Vec::new();
    for (i, query_pair) in query_pairs.iter().enumerate() {
        for (j, candidate_pair) in candidate_pairs.iter().enumerate() {
            if query_pair == candidate_pair {
                matches.push((i, j));
            }
        }
    }

    matches
}
