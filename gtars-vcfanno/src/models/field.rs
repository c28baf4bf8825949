use std::fmt::{self, Display};
use std::str::FromStr;

use crate::consts::{FIELD_DEFAULT, FIELD_NAME_SEPARATOR, FLAG_FIELD_DEFAULT};

/// Declared `Type=` of an INFO field.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum FieldType {
    Integer,
    Float,
    Flag,
    Character,
    String,
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Integer" => Ok(FieldType::Integer),
            "Float" => Ok(FieldType::Float),
            "Flag" => Ok(FieldType::Flag),
            "Character" => Ok(FieldType::Character),
            "String" => Ok(FieldType::String),
            _ => Err(format!("unknown INFO type '{}'", s)),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::Integer => "Integer",
            FieldType::Float => "Float",
            FieldType::Flag => "Flag",
            FieldType::Character => "Character",
            FieldType::String => "String",
        };
        write!(f, "{}", s)
    }
}

///
/// Declared `Number=` of an INFO field, i.e. how many values it carries
/// relative to the alleles of the record.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum FieldCount {
    /// `A`: one value per alternate allele.
    PerAlt,
    /// `R`: one value per allele, reference first.
    PerAllele,
    /// `G`: one value per possible genotype.
    PerGenotype,
    /// A fixed integer count.
    Fixed(u32),
    /// `.`: unbounded.
    Variable,
}

impl FromStr for FieldCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(FieldCount::PerAlt),
            "R" => Ok(FieldCount::PerAllele),
            "G" => Ok(FieldCount::PerGenotype),
            "." => Ok(FieldCount::Variable),
            n => n
                .parse::<u32>()
                .map(FieldCount::Fixed)
                .map_err(|_| format!("invalid INFO number '{}'", n)),
        }
    }
}

impl Display for FieldCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldCount::PerAlt => write!(f, "A"),
            FieldCount::PerAllele => write!(f, "R"),
            FieldCount::PerGenotype => write!(f, "G"),
            FieldCount::Fixed(n) => write!(f, "{}", n),
            FieldCount::Variable => write!(f, "."),
        }
    }
}

/// Output name of a source field: `<source>_<id>`.
pub fn namespaced_name(source_name: &str, raw_name: &str) -> String {
    format!("{}{}{}", source_name, FIELD_NAME_SEPARATOR, raw_name)
}

///
/// Everything the annotator knows about one output field.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FieldDescriptor {
    pub raw_name: String,
    pub name: String,
    pub ty: FieldType,
    pub count: FieldCount,
    pub description: String,
    pub default: String,
}

impl FieldDescriptor {
    pub fn new(
        source_name: &str,
        raw_name: &str,
        ty: FieldType,
        count: FieldCount,
        description: &str,
    ) -> Self {
        let default = match ty {
            FieldType::Flag => FLAG_FIELD_DEFAULT,
            _ => FIELD_DEFAULT,
        };

        FieldDescriptor {
            raw_name: raw_name.to_string(),
            name: namespaced_name(source_name, raw_name),
            ty,
            count,
            description: description.to_string(),
            default: default.to_string(),
        }
    }

    ///
    /// Render the renamed `##INFO` line a downstream writer would merge into its
    /// own header. Count and type are carried over unchanged.
    ///
    pub fn to_info_line(&self) -> String {
        format!(
            "##INFO=<ID={},Number={},Type={},Description=\"{}\">",
            self.name,
            self.count,
            self.ty,
            self.description.replace('"', "\\\"")
        )
    }
}
