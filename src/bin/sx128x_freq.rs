//! SX128x frequency conversion utility
//! Encodes frequencies to register codes and decodes codes back to Hz

use sx128x_codec::bitwise::{FrequencyCodec, RegisterCode};
use sx128x_codec::core::{
    format_mhz, parse_code, parse_frequency, CodecConfig, RangePolicy, STEP_HZ,
};
use sx128x_codec::validation;
use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

/// Requests checked when no arguments are given
const BASELINE_HZ: [f64; 4] = [2400e6, 2450e6, 2500e6, 4_294_967_295.0];

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
    let mut decode_codes = false;
    let mut config = CodecConfig::default();
    let mut values = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--code" | "-c" => decode_codes = true,
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
            _ => values.push(arg.clone()),
        }
    }

    let codec = FrequencyCodec::from_config(&config);
    tracing::debug!("Using {:?}", config);

    println!("step = {} Hz", STEP_HZ);
    println!();

    if decode_codes {
        if values.is_empty() {
            anyhow::bail!("--code needs at least one register code");
        }
        for value in &values {
            let code = RegisterCode::new(parse_code(value)?);
            let hz = codec.decode(code)?;
            println!("code = {}", code);
            println!("freq = {} Hz ({})", hz, format_mhz(hz));
            println!();
        }
        return Ok(());
    }

    let requests = if values.is_empty() {
        BASELINE_HZ.to_vec()
    } else {
        values
            .iter()
            .map(|v| parse_frequency(v))
            .collect::<Result<Vec<_>, _>>()?
    };

    for freq in requests {
        let messages = validation::validate_request(&config, freq);
        for warning in validation::warnings_only(&messages) {
            tracing::warn!("{}", warning);
        }
        if validation::has_errors(&messages) {
            let errors = validation::errors_only(&messages).join("; ");
            if codec.policy() == RangePolicy::Reject {
                anyhow::bail!(errors);
            }
            tracing::warn!("{} (applying {:?} policy)", errors, codec.policy());
        }

        let setting = codec.tune_f64(freq)?;

        println!("freq = {} Hz", setting.requested_hz);
        print!("code = {}", setting.code);
        match setting.code.to_be_bytes() {
            Ok(bytes) => println!("  bytes = {:02X?}", bytes),
            Err(e) => {
                println!();
                tracing::warn!("{}", e);
            }
        }
        println!(
            "freq = {} Hz ({}), error {:+} Hz",
            setting.actual_hz,
            format_mhz(setting.actual_hz),
            setting.error_hz()
        );
        println!();
    }

    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--config <file.json>] [frequency...]", program);
    eprintln!("       {} [--config <file.json>] --code <code...>", program);
    eprintln!("\nExamples:");
    eprintln!("  {}                      # Baseline requests", program);
    eprintln!("  {} 2.45GHz 2402MHz      # Encode frequencies", program);
    eprintln!("  {} --code 0xB89D8A      # Decode a register code", program);
    eprintln!("\nSet RUST_LOG=debug for conversion details.");
}
