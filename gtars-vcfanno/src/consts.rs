/// Number of annotation results memoized per annotator.
pub const DEFAULT_CACHE_CAPACITY: usize = 20;

/// Joins the source name and the raw INFO id into the output field name.
pub const FIELD_NAME_SEPARATOR: &str = "_";

/// Default emitted for `Type=Flag` fields with no match.
pub const FLAG_FIELD_DEFAULT: &str = "false";

/// Default emitted for every other field type with no match.
pub const FIELD_DEFAULT: &str = "";

pub const FILEFORMAT_PREFIX: &str = "##fileformat=";
pub const INFO_PREFIX: &str = "##INFO=<";
pub const COLUMN_HEADER_PREFIX: &str = "#CHROM";
