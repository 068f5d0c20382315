//! iv3json CLI
//!
//! Converts an Iv3 workbook to the Iv3 JSON document, writing
//! `{export_name}.json` or printing the document to stdout.

use clap::Parser;
use iv3json::{AmountScale, ConverterBuilder, Iv3Error};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Iv3 Excel → JSON converter
#[derive(Parser, Debug)]
#[command(
    name = "iv3json",
    version,
    about = "Convert an Iv3 workbook to the Iv3 JSON document"
)]
struct Cli {
    /// Input workbook (.xlsx)
    input: PathBuf,

    /// Package used for the financial administration (e.g. Sap, Coda, Key2Financiën)
    #[arg(long, default_value = "")]
    financieel_pakket: String,

    /// Export software (BI software or the package itself, e.g. Cognos, Coda)
    #[arg(long, default_value = "")]
    export_software: String,

    /// Export file name without extension
    #[arg(long, default_value = "Iv3_export_2026")]
    export_name: String,

    /// Mark line-item details as public
    #[arg(long)]
    details_openbaar: bool,

    /// Multiply all amounts by 1000
    #[arg(long)]
    keer_duizend: bool,

    /// Directory for the output file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Write the JSON document to stdout instead of a file
    #[arg(long)]
    stdout: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(Some(path)) => {
            println!(
                "Conversion completed: {} -> {}",
                cli.input.display(),
                path.display()
            );
        }
        Ok(None) => {}
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Option<PathBuf>, Iv3Error> {
    let converter = ConverterBuilder::new()
        .with_financieel_pakket(cli.financieel_pakket.as_str())
        .with_export_software(cli.export_software.as_str())
        .with_export_name(cli.export_name.as_str())
        .with_details_openbaar(cli.details_openbaar)
        .with_amount_scale(AmountScale::from_keer_duizend(cli.keer_duizend))
        .build()?;

    let input = File::open(&cli.input)?;

    // 変換に失敗した場合は出力ファイルを作成しない
    let document = converter.convert(input)?;

    if cli.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        document.write_json(&mut handle)?;
        writeln!(handle)?;
        return Ok(None);
    }

    let path = cli.output_dir.join(converter.output_file_name());
    let mut output = File::create(&path)?;
    document.write_json(&mut output)?;
    Ok(Some(path))
}

fn handle_error(error: Iv3Error) {
    match error {
        Iv3Error::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        Iv3Error::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid Excel workbook or may be corrupted.");
        }
        Iv3Error::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
        }
        Iv3Error::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check the export name and other options.");
        }
        Iv3Error::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::ffi::OsString;

    fn cli_for(input: &std::path::Path, output_dir: &std::path::Path) -> Cli {
        Cli::try_parse_from([
            OsString::from("iv3json"),
            input.as_os_str().to_os_string(),
            OsString::from("--output-dir"),
            output_dir.as_os_str().to_os_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_failed_conversion_leaves_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("kapot.xlsx");
        std::fs::write(&input, b"geen werkmap").unwrap();

        let result = run(&cli_for(&input, dir.path()));

        assert!(matches!(result, Err(Iv3Error::Parse(_))));
        assert!(!dir.path().join("Iv3_export_2026.json").exists());
    }

    #[test]
    fn test_successful_conversion_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("iv3.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("4.Informatie").unwrap();
        worksheet.write_string(0, 1, "Naam").unwrap();
        worksheet.write_string(0, 2, "Gemeente Leiden").unwrap();
        std::fs::write(&input, workbook.save_to_buffer().unwrap()).unwrap();

        let path = run(&cli_for(&input, dir.path())).unwrap().unwrap();

        assert_eq!(path, dir.path().join("Iv3_export_2026.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"overheidsnaam\": \"Gemeente Leiden\""));
    }
}
