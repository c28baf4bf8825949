use std::collections::BTreeMap;
use std::fmt::{self, Display};

///
/// A single allele: the bases as they appear in the REF or ALT column.
///
/// Equality is byte equality, so `a` and `A` are different alleles.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
pub struct Allele(Vec<u8>);

impl Allele {
    pub fn new(bases: impl Into<Vec<u8>>) -> Self {
        Allele(bases.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    ///
    /// Symbolic alleles (`<DEL>`, `*`, breakends, missing `.`) carry no literal
    /// bases and are never trimmed.
    ///
    pub fn is_symbolic(&self) -> bool {
        match self.0.as_slice() {
            b"*" | b"." => true,
            bases => {
                bases.first() == Some(&b'<') || bases.iter().any(|b| *b == b'[' || *b == b']')
            }
        }
    }
}

impl From<&str> for Allele {
    fn from(value: &str) -> Self {
        Allele(value.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Allele {
    fn from(value: &[u8]) -> Self {
        Allele(value.to_vec())
    }
}

impl Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

///
/// Raw value of an INFO field on a candidate record.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Render as it would appear in the INFO column: lists are comma-joined.
    pub fn joined(&self) -> String {
        match self {
            FieldValue::Scalar(value) => value.clone(),
            FieldValue::List(values) => values.join(","),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

///
/// A variant call: locus, reference allele, ordered alternate alleles and the
/// raw INFO values keyed by their (un-namespaced) id.
///
/// Records are assembled with [`VariantRecord::new`] and [`VariantRecord::with_field`]
/// and are read-only afterwards.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct VariantRecord {
    contig: String,
    start: u64,
    end: u64,
    reference: Allele,
    alternates: Vec<Allele>,
    info: BTreeMap<String, FieldValue>,
}

impl VariantRecord {
    pub fn new(
        contig: impl Into<String>,
        start: u64,
        end: u64,
        reference: impl Into<Allele>,
        alternates: Vec<Allele>,
    ) -> Self {
        VariantRecord {
            contig: contig.into(),
            start,
            end,
            reference: reference.into(),
            alternates,
            info: BTreeMap::new(),
        }
    }

    /// Attach a raw INFO value, replacing any previous value with the same id.
    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.info.insert(id.into(), value.into());
        self
    }

    pub fn contig(&self) -> &str {
        &self.contig
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn reference(&self) -> &Allele {
        &self.reference
    }

    pub fn alternates(&self) -> &[Allele] {
        &self.alternates
    }

    pub fn alternate(&self, index: usize) -> Option<&Allele> {
        self.alternates.get(index)
    }

    pub fn is_biallelic(&self) -> bool {
        self.alternates.len() == 1
    }

    pub fn info(&self) -> &BTreeMap<String, FieldValue> {
        &self.info
    }

    pub fn field(&self, id: &str) -> Option<&FieldValue> {
        self.info.get(id)
    }
}

///
/// The reference interval a query was evaluated in.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct ContextWindow {
    pub contig: String,
    pub start: u64,
    pub end: u64,

    pub bases: Option<Vec<u8>>,
}

impl ContextWindow {
    pub fn new(contig: impl Into<String>, start: u64, end: u64) -> Self {
        ContextWindow {
            contig: contig.into(),
            start,
            end,
            bases: None,
        }
    }

    pub fn with_bases(mut self, bases: impl Into<Vec<u8>>) -> Self {
        self.bases = Some(bases.into());
        self
    }

    /// The window surrounding a record's own span, with no reference bases.
    pub fn around(record: &VariantRecord) -> Self {
        ContextWindow::new(record.contig(), record.start(), record.end())
    }
}
