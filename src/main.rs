extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate regex;
extern crate term_grid;

pub mod translator;

use clap::{App, AppSettings, Arg, ArgMatches};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::io::{self, Write};

use translator::ast::Program;
use translator::error::{Error, EXIT_OK};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Invocation {
    Help,
    Translate,
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let args = process_arguments(&argv);
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments: {:?}", argv.iter().skip(1).collect::<Vec<_>>());

    let code = match run(&argv) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            error!("fatal: {}", err);
            err.exit_code()
        },
    };
    std::process::exit(code);
}

fn run(argv: &[String]) -> Result<(), Error> {
    if invocation(argv)? == Invocation::Help {
        println!("{}", usage());
        return Ok(());
    }

    let stdin = io::stdin();
    let program = translator::parser::parse(stdin.lock())?;
    info!("accepted {} instruction(s)", program.len());

    if log_enabled!(log::Level::Debug) {
        debug!("Program listing:\n{}", listing(&program));
    }

    // Nothing reaches stdout until the whole input has been accepted.
    let document = translator::xml::render(&program);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(document.as_bytes())
        .and_then(|_| out.flush())
        .map_err(Error::Output)
}

/// `--help` is only honored as the sole argument. Any other
/// arguments that do not start with `--help` are ignored.
fn invocation(argv: &[String]) -> Result<Invocation, Error> {
    match argv.get(1).map(String::as_str) {
        Some("--help") if argv.len() == 2 => Ok(Invocation::Help),
        Some("--help") => Err(Error::Usage),
        _ => Ok(Invocation::Translate),
    }
}

fn usage() -> String {
    format!("SYNOPSIS: {} [-v]... < FILE", option_env!("CARGO_PKG_NAME").unwrap_or("ipp-parse"))
}

/// Arguments are parsed leniently: a parse failure leaves every
/// option at its default instead of aborting the run.
fn process_arguments(argv: &[String]) -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("ipp-parse"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .setting(AppSettings::DisableHelpFlags)
        .setting(AppSettings::DisableVersion)
        .setting(AppSettings::AllowLeadingHyphen)
        .setting(AppSettings::TrailingVarArg)
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity on STDERR"))
        .arg(Arg::with_name("IGNORED")
            .multiple(true)
            .allow_hyphen_values(true)
            .index(1)
            .help("Extra arguments are accepted and ignored"))
        .get_matches_from_safe(argv)
        .unwrap_or_default()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        // STDOUT carries the document.
        .chain(std::io::stderr())
        .apply().ok();
}

/// An aligned order/opcode/operands table of the accepted program.
fn listing(program: &Program) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(2),
        direction:   Direction::LeftToRight,
    });

    for ins in program.instructions.iter() {
        let operands: Vec<String> = ins.args
            .iter()
            .map(|arg| format!("{}:{}", arg.type_name(), arg.text()))
            .collect();
        grid.add(Cell::from(format!("{:>4}:", ins.order)));
        grid.add(Cell::from(ins.opcode.to_string()));
        grid.add(Cell::from(operands.join(" ")));
    }

    grid.fit_into_columns(3).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::error::EXIT_USAGE;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("ipp-parse")
            .chain(args.iter().cloned())
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_invocation() {
        assert_eq!(invocation(&argv(&[])).unwrap(), Invocation::Translate);
        assert_eq!(invocation(&argv(&["--help"])).unwrap(), Invocation::Help);
        assert_eq!(invocation(&argv(&["extra"])).unwrap(), Invocation::Translate);
        assert_eq!(invocation(&argv(&["-v", "--help"])).unwrap(), Invocation::Translate);
        assert_eq!(invocation(&argv(&["--source=x", "y"])).unwrap(), Invocation::Translate);

        assert_eq!(invocation(&argv(&["--help", "extra"])).unwrap_err().exit_code(), EXIT_USAGE);
        assert_eq!(invocation(&argv(&["--help", "--help"])).unwrap_err().exit_code(), EXIT_USAGE);
    }

    #[test]
    fn test_process_arguments_is_lenient() {
        assert_eq!(process_arguments(&argv(&[])).occurrences_of("verbose"), 0);
        assert_eq!(process_arguments(&argv(&["-v", "-v"])).occurrences_of("verbose"), 2);
        assert_eq!(process_arguments(&argv(&["--unknown", "file"])).occurrences_of("verbose"), 0);
        assert_eq!(process_arguments(&argv(&["--help"])).occurrences_of("verbose"), 0);
    }

    #[test]
    fn test_usage() {
        assert!(usage().starts_with("SYNOPSIS: "));
        assert_eq!(usage().lines().count(), 1);
    }

    #[test]
    fn test_listing() {
        let program = crate::translator::parser::parse(
            ".IPPcode23\nMOVE GF@x int@5\nBREAK\n".as_bytes()
        ).unwrap();
        let table = listing(&program);
        assert!(table.contains("MOVE"));
        assert!(table.contains("var:GF@x int:5"));
        assert!(table.contains("BREAK"));
    }
}
