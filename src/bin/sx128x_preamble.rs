//! SX128x preamble packing utility
//! Shows how preamble lengths pack into the mantissa/exponent byte (LoRa)
//! or quantize to a bit count (FLRC, GFSK)

use sx128x_codec::bitwise::{preamble, quantize_flrc, quantize_gfsk, PreambleCodec};
use sx128x_codec::core::CodecConfig;
use sx128x_codec::validation;
use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Lora,
    Flrc,
    Gfsk,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut mode = Mode::Lora;
    let mut config = CodecConfig::default();
    let mut lengths = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--flrc" => mode = Mode::Flrc,
            "--gfsk" => mode = Mode::Gfsk,
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config needs a file argument"))?;
                config = CodecConfig::load(path)?;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(());
            }
            value => lengths.push(value.parse::<u32>()?),
        }
    }

    if lengths.is_empty() {
        lengths = preamble::verification_range().collect();
    }

    match mode {
        Mode::Lora => {
            let codec = PreambleCodec::from_config(&config);
            for p in lengths {
                let messages = validation::validate_preamble(p);
                for warning in validation::warnings_only(&messages) {
                    tracing::debug!("{}", warning);
                }
                let enc = codec.pack(p)?;
                println!("{} <= p={}", enc, p);
            }
        }
        Mode::Flrc | Mode::Gfsk => {
            for p in lengths {
                let requested = u16::try_from(p).unwrap_or(u16::MAX);
                let bits = if mode == Mode::Flrc {
                    quantize_flrc(requested)
                } else {
                    quantize_gfsk(requested)
                };
                println!("param=0x{:02X} preamble={} <- p={}", bits.param(), bits, p);
            }
        }
    }

    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--flrc | --gfsk] [--config <file.json>] [length...]", program);
    eprintln!("\nWithout lengths, prints the verification range");
    eprintln!("(0..31, 100..900, 1000..9000, 10000..490000).");
    eprintln!("\nExamples:");
    eprintln!("  {} 12 17 1000          # LoRa mantissa/exponent packing", program);
    eprintln!("  {} --gfsk 5 13 40      # GFSK preamble bit quantization", program);
}
