//! bytecoder: command-line front end for the source coding lab.
//!
//! All file I/O lives here, at the boundary; the core library only sees
//! byte buffers. Every command prints a short summary of what it did, and
//! every randomized command prints its seed.

mod config;
mod pmf;
mod source_gen;

use bytecoder_core::{
    channel::{apply_noise, BinarySymmetricChannel, ChannelConfig},
    codec,
    huffman::Codebook,
    metrics::{self, CompressionReport},
    repetition, Result,
};
use config::{resolve_seed, Command};
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match Command::from_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run `bytecoder help` for usage");
            std::process::exit(2);
        }
    };

    if let Err(error) = run(command) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Encode { pmf, input, output } => {
            let model = pmf::read_pmf(&pmf)?;
            let source = fs::read(&input)?;

            let codebook = Codebook::from_probabilities(&model)?;
            let encoded = codec::encode(&codebook, &source)?;
            fs::write(&output, &encoded)?;

            let report = CompressionReport {
                raw_bytes: source.len(),
                encoded_bytes: encoded.len(),
            };
            println!("Encoded {} -> {}", input.display(), output.display());
            println!("  Source: {} bytes", source.len());
            println!("  Encoded: {} bytes (codebook of {} symbols)", encoded.len(), codebook.len());
            println!("  Ratio: {:.1}%", report.ratio() * 100.0);
            Ok(())
        }

        Command::Decode { input, output } => {
            let encoded = fs::read(&input)?;
            let decoded = codec::decode(&encoded)?;
            fs::write(&output, &decoded)?;

            println!("Decoded {} -> {}", input.display(), output.display());
            println!("  Encoded: {} bytes", encoded.len());
            println!("  Decoded: {} bytes", decoded.len());
            Ok(())
        }

        Command::Generate {
            pmf,
            output,
            length,
            seed,
        } => {
            let model = pmf::read_pmf(&pmf)?;
            let seed = resolve_seed(seed);

            let message = source_gen::generate_message(&model, length, seed);
            fs::write(&output, &message)?;

            let nonzero = model.iter().filter(|&&p| p > 0.0).count();
            println!("Generated {} ({} bytes, {} symbols in model)", output.display(), length, nonzero);
            Ok(())
        }

        Command::Channel {
            input,
            noise,
            output,
        } => {
            let data = fs::read(&input)?;
            let noise_data = fs::read(&noise)?;
            if noise_data.len() < data.len() {
                eprintln!(
                    "warning: noise file ({} bytes) shorter than input ({} bytes), zero-extending",
                    noise_data.len(),
                    data.len()
                );
            }

            let disturbed = apply_noise(&data, &noise_data);
            fs::write(&output, &disturbed)?;

            let report = metrics::compare(&data, &disturbed);
            println!("Applied {} onto {}", noise.display(), input.display());
            println!("  Flipped bits: {} ({:.4}%)", report.error_bits, report.bit_error_rate() * 100.0);
            Ok(())
        }

        Command::Bsc {
            input,
            output,
            crossover,
            seed,
        } => {
            let data = fs::read(&input)?;
            let seed = resolve_seed(seed);

            let mut channel = BinarySymmetricChannel::new(ChannelConfig { crossover, seed });
            let disturbed = channel.transmit(&data);
            fs::write(&output, &disturbed)?;

            let stats = channel.stats();
            println!("Transmitted {} bytes over BSC(p={crossover})", data.len());
            println!("  Flipped: {} of {} bits ({:.4}%)", stats.bits_flipped, stats.bits_transmitted, stats.observed_rate() * 100.0);
            println!("  Channel capacity: {:.4} bits/use", metrics::bsc_capacity(crossover));
            Ok(())
        }

        Command::RepEncode {
            repeat,
            input,
            output,
        } => {
            let source = fs::read(&input)?;
            let frame = repetition::encode(&source, repeat)?;
            fs::write(&output, &frame)?;

            println!("Repetition-encoded {} -> {}", input.display(), output.display());
            println!("  Source: {} bytes, repeat: {repeat}", source.len());
            println!("  Frame: {} bytes", frame.len());
            Ok(())
        }

        Command::RepDecode { input, output } => {
            let frame = fs::read(&input)?;
            let decoded = repetition::decode(&frame)?;
            fs::write(&output, &decoded)?;

            println!("Repetition-decoded {} -> {}", input.display(), output.display());
            println!("  Frame: {} bytes", frame.len());
            println!("  Decoded: {} bytes", decoded.len());
            Ok(())
        }

        Command::Entropy { input, output_csv } => {
            let data = fs::read(&input)?;
            let entropy = metrics::entropy_bits(&metrics::byte_histogram(&data));

            println!("File: {}", input.display());
            println!("  Length: {} bytes", data.len());
            println!("  Entropy: {entropy:.6} bits/byte");

            if let Some(csv_path) = output_csv {
                append_entropy_csv(&csv_path, &input, entropy, data.len())?;
                println!("  Appended to: {}", csv_path.display());
            }
            Ok(())
        }

        Command::ErrorRate { sent, received } => {
            let sent_data = fs::read(&sent)?;
            let received_data = fs::read(&received)?;
            let report = metrics::compare(&sent_data, &received_data);

            println!("Compared {} against {}", received.display(), sent.display());
            println!("  Bytes: {} total, {} differ ({:.6}%)", report.total_bytes, report.error_bytes, report.byte_error_rate() * 100.0);
            println!("  Bits: {} total, {} differ ({:.6}%)", report.total_bits, report.error_bits, report.bit_error_rate() * 100.0);
            Ok(())
        }
    }
}

/// Append one `"file","entropy","length"` line to a results CSV.
fn append_entropy_csv(csv_path: &Path, input: &Path, entropy: f64, length: usize) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;
    writeln!(file, "\"{}\",\"{entropy:.6}\",\"{length}\"", input.display())?;
    Ok(())
}
