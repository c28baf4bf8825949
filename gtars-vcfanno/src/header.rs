//! Minimal VCF header reader.
//!
//! Only the meta-information lines are consumed: the `##fileformat` line and every
//! `##INFO` declaration. Reading stops at the `#CHROM` column header, so record
//! lines of the source are never touched.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::consts::{COLUMN_HEADER_PREFIX, FILEFORMAT_PREFIX, INFO_PREFIX};
use crate::errors::{Result, VcfAnnoError};
use crate::models::{FieldCount, FieldType};

/// One `##INFO=<...>` declaration.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InfoDeclaration {
    pub id: String,
    pub number: FieldCount,
    pub ty: FieldType,
    pub description: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VcfHeader {
    pub fileformat: String,
    pub info: Vec<InfoDeclaration>,
}

///
/// Get a reader for either a gzip'd (or bgzip'd) or plain text VCF.
///
fn open_header_reader(path: &Path) -> std::io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = matches!(
        path.extension().and_then(OsStr::to_str),
        Some("gz") | Some("bgz")
    );
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

impl VcfHeader {
    /// Read the header of the VCF at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let to_read_error = |source| VcfAnnoError::HeaderRead {
            path: path.to_path_buf(),
            source,
        };

        let reader = open_header_reader(path).map_err(to_read_error)?;
        VcfHeader::from_reader(reader).map_err(|e| match e {
            VcfAnnoError::Io(source) => to_read_error(source),
            other => other,
        })
    }

    /// Parse a header held in memory.
    pub fn parse(text: &str) -> Result<Self> {
        VcfHeader::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut fileformat: Option<String> = None;
        let mut info = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            let line_number = idx + 1;

            if idx == 0 {
                match line.strip_prefix(FILEFORMAT_PREFIX) {
                    Some(version) if version.starts_with("VCF") => {
                        fileformat = Some(version.to_string());
                        continue;
                    }
                    _ => {
                        return Err(VcfAnnoError::InvalidHeader(
                            "first line is not a ##fileformat=VCF line".to_string(),
                        ));
                    }
                }
            }

            if line.starts_with(COLUMN_HEADER_PREFIX) {
                // fileformat is always set by the first line at this point
                let fileformat = fileformat.unwrap_or_default();
                return Ok(VcfHeader { fileformat, info });
            }

            if line.starts_with(INFO_PREFIX) {
                info.push(parse_info_line(line, line_number)?);
            } else if !line.starts_with("##") && !line.is_empty() {
                return Err(VcfAnnoError::InvalidHeader(format!(
                    "unexpected line {} before the #CHROM column header",
                    line_number
                )));
            }
        }

        Err(VcfAnnoError::InvalidHeader(
            "no #CHROM column header line found".to_string(),
        ))
    }
}

///
/// Split the body of a structured meta line into `key=value` pairs.
///
/// Commas inside double quotes do not separate pairs, and `\"` escapes a quote.
///
fn split_structured(body: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut in_value = false;
    let mut in_quotes = false;
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    value.push(escaped);
                }
            }
            '"' if in_value => in_quotes = !in_quotes,
            '=' if !in_value => in_value = true,
            ',' if !in_quotes => {
                pairs.push((std::mem::take(&mut key), std::mem::take(&mut value)));
                in_value = false;
            }
            c if in_value => value.push(c),
            c => key.push(c),
        }
    }
    if !key.is_empty() {
        pairs.push((key, value));
    }

    pairs
}

fn parse_info_line(line: &str, line_number: usize) -> Result<InfoDeclaration> {
    let malformed = |reason: String| VcfAnnoError::MalformedInfoLine {
        line: line_number,
        reason,
    };

    let body = line
        .strip_prefix(INFO_PREFIX)
        .and_then(|rest| rest.strip_suffix('>'))
        .ok_or_else(|| malformed("INFO line is not enclosed in <...>".to_string()))?;

    let mut id = None;
    let mut number = None;
    let mut ty = None;
    let mut description = String::new();

    for (key, value) in split_structured(body) {
        match key.as_str() {
            "ID" => id = Some(value),
            "Number" => number = Some(value.parse::<FieldCount>().map_err(malformed)?),
            "Type" => ty = Some(value.parse::<FieldType>().map_err(malformed)?),
            "Description" => description = value,
            _ => {}
        }
    }

    let id = id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| malformed("missing ID".to_string()))?;
    let number = number.ok_or_else(|| malformed(format!("missing Number for {}", id)))?;
    let ty = ty.ok_or_else(|| malformed(format!("missing Type for {}", id)))?;

    Ok(InfoDeclaration {
        id,
        number,
        ty,
        description,
    })
}
