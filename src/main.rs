// STD Dependencies -----------------------------------------------------------
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::process;

// External Dependencies ------------------------------------------------------
use anyhow::Context;
use clap::ArgMatches;
use huffzip::config::CompressionConfig;
use huffzip::Compressor;
use tracing_subscriber::EnvFilter;

// Modules --------------------------------------------------------------------
mod cli;

// CLI Interface --------------------------------------------------------------
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = cli::app().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("huffzip: {err:#}");
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = match matches.value_of("config") {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            CompressionConfig::from_json(&text).with_context(|| format!("parsing {path}"))?
        }
        None => CompressionConfig::default(),
    };
    let compressor = Compressor::new(config);
    let stats = matches.is_present("stats");

    match matches.subcommand() {
        Some(("encode", sub)) => encode(&compressor, sub, stats),
        Some(("decode", sub)) => decode(&compressor, sub, stats),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn encode(compressor: &Compressor, matches: &ArgMatches, stats: bool) -> anyhow::Result<()> {
    let mut sink = open_sink(matches.value_of("OUTFILE"))?;
    let (len, result) = match matches.value_of("INFILE").filter(|p| *p != "-") {
        Some(path) => {
            let mut file = File::open(path).with_context(|| format!("opening {path}"))?;
            let len = file
                .metadata()
                .with_context(|| format!("reading size of {path}"))?
                .len();
            (len, compressor.compress_stream(&mut file, len, &mut sink))
        }
        // Encoding reads the input twice, so stdin is buffered first.
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data).context("reading stdin")?;
            let len = data.len() as u64;
            (len, compressor.compress_stream(&mut Cursor::new(data), len, &mut sink))
        }
    };
    let summary = result.context("encoding failed")?;
    sink.flush().context("flushing output")?;

    if stats {
        eprintln!(
            "header {} bytes, body {} bytes, total {} bytes, ratio {:.3}",
            summary.header_bytes,
            summary.body_bytes(),
            summary.total_bytes(),
            summary.ratio(len)
        );
    }
    Ok(())
}

fn decode(compressor: &Compressor, matches: &ArgMatches, stats: bool) -> anyhow::Result<()> {
    let mut source: Box<dyn Read> = match matches.value_of("INFILE").filter(|p| *p != "-") {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {path}"))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut sink = open_sink(matches.value_of("OUTFILE"))?;
    let written = compressor
        .decompress_stream(&mut source, &mut sink)
        .context("decoding failed")?;
    sink.flush().context("flushing output")?;

    if stats {
        eprintln!("decoded {written} bytes");
    }
    Ok(())
}

fn open_sink(path: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {path}"))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}
