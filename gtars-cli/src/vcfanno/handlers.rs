use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

use gtars_vcfanno::{AnnotatorConfig, VcfAnnotator};

const DEFAULT_SOURCE_VERSION: &str = "unknown";

pub fn run_vcfanno(matches: &ArgMatches) -> Result<()> {
    let annotator = match matches.get_one::<String>("config") {
        Some(config) => {
            let config = AnnotatorConfig::from_path(Path::new(config))
                .with_context(|| format!("Failed to load annotator config: {}", config))?;
            VcfAnnotator::from_config(&config)?
        }
        None => {
            let source = matches
                .get_one::<String>("source")
                .ok_or_else(|| anyhow!("Either --config or --source is required"))?;
            let name = matches
                .get_one::<String>("name")
                .ok_or_else(|| anyhow!("--name is required with --source"))?;
            let default_version = DEFAULT_SOURCE_VERSION.to_string();
            let version = matches
                .get_one::<String>("source-version")
                .unwrap_or(&default_version);

            VcfAnnotator::builder()
                .with_name(name.as_str())
                .with_version(version.as_str())
                .with_source(PathBuf::from(source))
                .finish()?
        }
    };

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    if matches.get_flag("defaults") {
        writeln!(writer, "field\tnumber\ttype\tdefault")?;
        for descriptor in annotator.registry().descriptors() {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                descriptor.name, descriptor.count, descriptor.ty, descriptor.default
            )?;
        }
    } else {
        for line in annotator.info_header_lines() {
            writeln!(writer, "{}", line)?;
        }
    }
    writer.flush()?;

    annotator.close();

    Ok(())
}
