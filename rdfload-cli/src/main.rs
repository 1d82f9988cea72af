use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rdfload::{Graph, PublicId, RdfFormat};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[arg(value_name = "PATH")]
    source: PathBuf,

    /// Base IRI for relative references; defaults to the file's location.
    /// Pass `--base ''` to keep relative references exactly as written.
    #[arg(long, value_name = "IRI")]
    base: Option<String>,

    /// Input format (`xml` or `turtle`); guessed when omitted.
    #[arg(long, value_name = "FORMAT")]
    format: Option<RdfFormat>,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut graph = Graph::new();
    if let Err(e) = rdfload::parse(
        &args.source,
        args.format,
        PublicId::from(args.base),
        &mut graph,
    ) {
        eprintln!("Error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    log::info!(
        "loaded {} triples from {}",
        graph.len(),
        args.source.display()
    );

    write_turtle(&graph, std::io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

fn write_turtle(graph: &Graph, out: impl Write) -> std::io::Result<()> {
    let mut writer = oxttl::TurtleSerializer::new().for_writer(out);
    for triple in graph.iter() {
        writer.serialize_triple(triple)?;
    }

    writer.finish()?;
    Ok(())
}
