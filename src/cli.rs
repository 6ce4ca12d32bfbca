use clap::{Arg, Command};

pub fn app() -> Command<'static> {
    Command::new("huffzip")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .global(true)
                .help("JSON configuration file"),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .global(true)
                .help("Print sizes and ratio to stderr"),
        )
        .subcommand(
            Command::new("encode")
                .about("Compress INFILE (or stdin) into OUTFILE (or stdout)")
                .arg(Arg::new("INFILE").index(1).help("Input file, - for stdin"))
                .arg(Arg::new("OUTFILE").index(2).help("Output file")),
        )
        .subcommand(
            Command::new("decode")
                .about("Decompress INFILE (or stdin) into OUTFILE (or stdout)")
                .arg(Arg::new("INFILE").index(1).help("Input file, - for stdin"))
                .arg(Arg::new("OUTFILE").index(2).help("Output file")),
        )
}
