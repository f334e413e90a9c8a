//! Simple command that prints one or '-n count' ULID strings
//!
//! '-m' prints monotonic ULIDs and '-r' prints them in the readable form.

use std::{env, io, io::Write, process::ExitCode};

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    monotonic: bool,
    readable: bool,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-m] [-r]",
                    program.as_deref().unwrap_or("ulid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count.unwrap_or(1) {
        let ulid = if opts.monotonic {
            ulidx::ulid_monotonic()
        } else {
            ulidx::ulid()
        };
        if opts.readable {
            match ulid.encode_readable() {
                Some(text) => writeln!(buf, "{}", text)?,
                None => {
                    buf.flush()?;
                    eprintln!("Error: timestamp of {} not representable as a date", ulid);
                    return Ok(ExitCode::FAILURE);
                }
            }
        } else {
            writeln!(buf, "{}", ulid)?;
        }
    }

    buf.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-m" => opts.monotonic = true,
            "-r" => opts.readable = true,
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(opts)
}
