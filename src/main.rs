use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use factura_pdf::{InvoiceData, RenderConfig};

/// Render an invoice record (JSON) to a paginated PDF document.
#[derive(Parser)]
#[command(name = "factura-pdf", version, about)]
struct Args {
    /// Invoice record, camelCase wire shape
    input: PathBuf,

    /// Directory the PDF is written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Print a data-URI preview to stdout instead of saving a file
    #[arg(long)]
    preview: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read(&args.input)?;
    let invoice: InvoiceData = serde_json::from_slice(&raw)?;
    let config = RenderConfig::default();

    if args.preview {
        println!("{}", factura_pdf::render_preview(&invoice, &config)?);
    } else {
        let path = factura_pdf::save_invoice(&invoice, &config, &args.out_dir)?;
        println!("{}", path.display());
    }
    Ok(())
}
