//! Fin Flutter command-line runner
//!
//! Usage: fin-flutter [config.json] [--json] [--envelope out.csv]
//!
//! Without a configuration file the built-in carbon fibre reference fin is analyzed.

use anyhow::{bail, Context};

use fin_flutter::prelude::*;

struct Args {
    config: Option<String>,
    json: bool,
    envelope_csv: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        json: false,
        envelope_csv: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--envelope" => {
                let path = iter.next().context("--envelope requires an output path")?;
                args.envelope_csv = Some(path);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path => {
                if args.config.replace(path.to_string()).is_some() {
                    bail!("only one configuration file may be given");
                }
            }
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => FinConfig::from_json_file(path).with_context(|| format!("failed to load {path}"))?,
        None => FinConfig::default(),
    };
    let model = FinModel::new(config).context("invalid fin configuration")?;

    let report = model.analyze()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("=== Fin Flutter Analysis ===\n");
        println!("{report}");
    }

    if let Some(path) = &args.envelope_csv {
        let envelope = model.envelope()?;
        envelope
            .write_csv(path)
            .with_context(|| format!("failed to write {path}"))?;
        match envelope.min_flutter_speed() {
            Some((altitude, speed)) => {
                eprintln!("Envelope written to {path}: minimum flutter speed {speed:.2} m/s at {altitude} m")
            }
            None => eprintln!("Envelope written to {path}: no flutter found at any altitude"),
        }
    }

    Ok(())
}
