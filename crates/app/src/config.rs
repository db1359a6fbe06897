//! Command-line parsing for the bytecoder tools.
//!
//! One binary, one subcommand per lab tool. Arguments are positional like
//! the tools they model; the only flag is `--seed`, and when it is omitted
//! the chosen time-based seed is printed so every run stays reproducible.

use std::path::PathBuf;

/// One fully parsed invocation.
#[derive(Debug, Clone)]
pub enum Command {
    /// Huffman-encode a file using a PMF file as the model
    Encode {
        pmf: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },

    /// Decode a self-describing encoded file
    Decode { input: PathBuf, output: PathBuf },

    /// Sample a synthetic source from a PMF (discrete memoryless source)
    Generate {
        pmf: PathBuf,
        output: PathBuf,
        length: usize,
        seed: Option<u64>,
    },

    /// XOR a noise file onto an input file
    Channel {
        input: PathBuf,
        noise: PathBuf,
        output: PathBuf,
    },

    /// Push a file through a seeded binary symmetric channel
    Bsc {
        input: PathBuf,
        output: PathBuf,
        crossover: f64,
        seed: Option<u64>,
    },

    /// Protect a file with an n-fold repetition code
    RepEncode {
        repeat: usize,
        input: PathBuf,
        output: PathBuf,
    },

    /// Majority-vote decode a repetition-coded file
    RepDecode { input: PathBuf, output: PathBuf },

    /// Measure the byte entropy of a file, optionally appending a CSV line
    Entropy {
        input: PathBuf,
        output_csv: Option<PathBuf>,
    },

    /// Compare two files and report bit/byte error rates
    ErrorRate { sent: PathBuf, received: PathBuf },
}

impl Command {
    /// Parse a command from argv (without the program name).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let Some((name, rest)) = args.split_first() else {
            return Err("missing command".to_string());
        };

        match name.as_str() {
            "encode" => {
                let (positional, _) = split_flags(rest)?;
                let [pmf, input, output] = take_paths(&positional, ["PMF", "INPUT", "OUTPUT"])?;
                Ok(Command::Encode { pmf, input, output })
            }
            "decode" => {
                let (positional, _) = split_flags(rest)?;
                let [input, output] = take_paths(&positional, ["INPUT", "OUTPUT"])?;
                Ok(Command::Decode { input, output })
            }
            "generate" => {
                let (positional, seed) = split_flags(rest)?;
                if positional.len() != 3 {
                    return Err("generate takes PMF OUTPUT LENGTH".to_string());
                }
                let length: usize = positional[2]
                    .parse()
                    .map_err(|_| format!("invalid length: {}", positional[2]))?;
                if length == 0 {
                    return Err("length must be greater than 0".to_string());
                }
                Ok(Command::Generate {
                    pmf: PathBuf::from(&positional[0]),
                    output: PathBuf::from(&positional[1]),
                    length,
                    seed,
                })
            }
            "channel" => {
                let (positional, _) = split_flags(rest)?;
                let [input, noise, output] = take_paths(&positional, ["INPUT", "NOISE", "OUTPUT"])?;
                Ok(Command::Channel {
                    input,
                    noise,
                    output,
                })
            }
            "bsc" => {
                let (positional, seed) = split_flags(rest)?;
                if positional.len() != 3 {
                    return Err("bsc takes INPUT OUTPUT CROSSOVER".to_string());
                }
                let crossover: f64 = positional[2]
                    .parse()
                    .map_err(|_| format!("invalid crossover: {}", positional[2]))?;
                if !(0.0..=1.0).contains(&crossover) {
                    return Err("crossover must be within 0.0..=1.0".to_string());
                }
                Ok(Command::Bsc {
                    input: PathBuf::from(&positional[0]),
                    output: PathBuf::from(&positional[1]),
                    crossover,
                    seed,
                })
            }
            "rep-encode" => {
                let (positional, _) = split_flags(rest)?;
                if positional.len() != 3 {
                    return Err("rep-encode takes REPEAT INPUT OUTPUT".to_string());
                }
                let repeat: usize = positional[0]
                    .parse()
                    .map_err(|_| format!("invalid repeat count: {}", positional[0]))?;
                Ok(Command::RepEncode {
                    repeat,
                    input: PathBuf::from(&positional[1]),
                    output: PathBuf::from(&positional[2]),
                })
            }
            "rep-decode" => {
                let (positional, _) = split_flags(rest)?;
                let [input, output] = take_paths(&positional, ["INPUT", "OUTPUT"])?;
                Ok(Command::RepDecode { input, output })
            }
            "entropy" => {
                let (positional, _) = split_flags(rest)?;
                match positional.len() {
                    1 => Ok(Command::Entropy {
                        input: PathBuf::from(&positional[0]),
                        output_csv: None,
                    }),
                    2 => Ok(Command::Entropy {
                        input: PathBuf::from(&positional[0]),
                        output_csv: Some(PathBuf::from(&positional[1])),
                    }),
                    _ => Err("entropy takes INPUT [OUTPUT_CSV]".to_string()),
                }
            }
            "error-rate" => {
                let (positional, _) = split_flags(rest)?;
                let [sent, received] = take_paths(&positional, ["SENT", "RECEIVED"])?;
                Ok(Command::ErrorRate { sent, received })
            }
            "help" | "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Separate positional arguments from the `--seed` flag.
fn split_flags(args: &[String]) -> Result<(Vec<String>, Option<u64>), String> {
    let mut positional = Vec::new();
    let mut seed = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("--seed requires a number".to_string());
                }
                seed = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid seed: {}", args[i]))?,
                );
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag: {flag}"));
            }
            _ => positional.push(args[i].clone()),
        }
        i += 1;
    }

    Ok((positional, seed))
}

/// Expect exactly N positional path arguments.
fn take_paths<const N: usize>(
    positional: &[String],
    names: [&str; N],
) -> Result<[PathBuf; N], String> {
    if positional.len() != N {
        return Err(format!("expected arguments: {}", names.join(" ")));
    }
    Ok(std::array::from_fn(|i| PathBuf::from(&positional[i])))
}

/// Resolve a seed: explicit, or time-based. Always print it so the run
/// can be repeated.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|t| t.as_millis() as u64)
            .unwrap_or(0)
    });
    println!("Seed: {seed}");
    seed
}

pub fn print_help() {
    println!("bytecoder: lossless source coding and channel simulation tools");
    println!();
    println!("USAGE:");
    println!("    bytecoder <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    encode PMF INPUT OUTPUT          Huffman-encode INPUT using the PMF model");
    println!("    decode INPUT OUTPUT              Decode a self-describing encoded file");
    println!();
    println!("    generate PMF OUTPUT LENGTH       Sample LENGTH bytes from the PMF");
    println!("    channel INPUT NOISE OUTPUT       XOR the NOISE file onto INPUT");
    println!("    bsc INPUT OUTPUT CROSSOVER       Flip each bit with probability CROSSOVER");
    println!();
    println!("    rep-encode REPEAT INPUT OUTPUT   Protect INPUT with a repetition code");
    println!("    rep-decode INPUT OUTPUT          Majority-vote decode a protected file");
    println!();
    println!("    entropy INPUT [OUTPUT_CSV]       Bits/byte of INPUT, optionally appended as CSV");
    println!("    error-rate SENT RECEIVED         Bit and byte error rates between two files");
    println!();
    println!("OPTIONS:");
    println!("    --seed <N>      Seed for generate/bsc randomness (default: time-based)");
    println!("    --help, -h      Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    bytecoder generate pmf.csv source.dat 65536 --seed 42");
    println!("    bytecoder encode pmf.csv source.dat source.huf");
    println!("    bytecoder decode source.huf restored.dat");
    println!("    bytecoder error-rate source.dat restored.dat");
    println!();
}
