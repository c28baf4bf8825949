use clap::{Command, arg};

pub const VCFANNO_CMD: &str = "vcfanno";

pub fn create_vcfanno_cli() -> Command {
    Command::new(VCFANNO_CMD)
        .author("Databio")
        .about("Inspect the annotation fields a VCF source provides.")
        .arg_required_else_help(true)
        .arg(arg!(-c --config <config> "TOML annotator config").required(false))
        .arg(arg!(-s --source <source> "VCF whose header declares the fields").required(false))
        .arg(arg!(-n --name <name> "Source name used to prefix output fields").required(false))
        .arg(arg!(--"source-version" <version> "Version of the source").required(false))
        .arg(arg!(--defaults "Print a field/default table instead of INFO header lines"))
}
