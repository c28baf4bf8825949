//! Biallelic decomposition and allele trimming.
//!
//! Each alternate allele of a record is paired with the record's reference and the
//! pair is reduced to its minimal VCF representation: shared trailing bases are
//! removed first, then shared leading bases, and one anchor base is always kept
//! in both alleles. Only alleles are looked at; INFO values are never copied.

use crate::models::{Allele, VariantRecord};

/// A reference/alternate pair cut from a (possibly multi-allelic) record.
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct BiallelicPair {
    pub reference: Allele,
    pub alternate: Allele,
}

/// Count the shared suffix of `alleles`, never consuming an allele's last base.
fn trim_right(alleles: &[&[u8]]) -> usize {
    let min_len = alleles.iter().map(|a| a.len()).min().unwrap_or(0);
    let mut trimmed = 0;
    while trimmed + 1 < min_len {
        let ch = alleles[0][alleles[0].len() - 1 - trimmed];
        if alleles.iter().all(|a| a[a.len() - 1 - trimmed] == ch) {
            trimmed += 1;
        } else {
            break;
        }
    }
    trimmed
}

/// Count the shared prefix of `alleles`, never consuming an allele's last base.
fn trim_left(alleles: &[&[u8]]) -> usize {
    let min_len = alleles.iter().map(|a| a.len()).min().unwrap_or(0);
    let mut trimmed = 0;
    while trimmed + 1 < min_len {
        let ch = alleles[0][trimmed];
        if alleles.iter().all(|a| a[trimmed] == ch) {
            trimmed += 1;
        } else {
            break;
        }
    }
    trimmed
}

///
/// Reduce a reference/alternate pair to its minimal representation.
///
/// Symbolic alleles are returned untouched.
///
pub fn trim_pair(reference: &Allele, alternate: &Allele) -> BiallelicPair {
    if reference.is_symbolic() || alternate.is_symbolic() {
        return BiallelicPair {
            reference: reference.clone(),
            alternate: alternate.clone(),
        };
    }

    let ref_bases = reference.as_bytes();
    let alt_bases = alternate.as_bytes();

    let right = trim_right(&[ref_bases, alt_bases]);
    let ref_bases = &ref_bases[..ref_bases.len() - right];
    let alt_bases = &alt_bases[..alt_bases.len() - right];

    let left = trim_left(&[ref_bases, alt_bases]);

    BiallelicPair {
        reference: Allele::from(&ref_bases[left..]),
        alternate: Allele::from(&alt_bases[left..]),
    }
}

///
/// Split a record into one trimmed biallelic pair per alternate allele.
///
/// The pair at position `i` always comes from alternate allele `i`.
///
pub fn decompose(record: &VariantRecord) -> Vec<BiallelicPair> {
    record
        .alternates()
        .iter()
        .map(|alt| trim_pair(record.reference(), alt))
        .collect()
}
