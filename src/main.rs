use std::path::PathBuf;

use clap::Parser;
use spline_codegen::{regenerate, Catalog, DirectorySink, GenerateError};

#[derive(Parser)]
#[command(name = "regenerate", about = "Regenerate all spline segment types")]
struct Cli {
    /// Directory the generated sources are written to
    #[arg(long, default_value = "src/segments")]
    out_dir: PathBuf,
    /// Do not write a mod.rs declaring the generated modules
    #[arg(long)]
    no_module_index: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), GenerateError> {
    let catalog = Catalog::standard()?;
    let mut sink = DirectorySink::new(&cli.out_dir)?;
    let written = regenerate(&catalog, &mut sink, !cli.no_module_index)?;
    log::info!("regenerated {} files in {}", written, sink.dir().display());
    Ok(())
}
