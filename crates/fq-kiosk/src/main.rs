//! fq-kiosk - Headless kiosk driver
//!
//! Usage: `fq-kiosk <script.json> [--bank bank.json] [--config drag.json] [--seed N]`
//!
//! Replays a gesture script against one question and prints the resulting
//! report as JSON on stdout. Logs go to stderr, filtered by `RUST_LOG`.

mod replay;
mod script;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use fq_drag::DragConfig;
use fq_quiz::{Question, builtin_bank, load_bank};

use crate::replay::Replay;
use crate::script::Script;

#[derive(Debug, PartialEq)]
struct Args {
    script: PathBuf,
    bank: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut script = None;
    let mut bank = None;
    let mut config = None;
    let mut seed = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bank" => bank = Some(PathBuf::from(value(&mut args, "--bank")?)),
            "--config" => config = Some(PathBuf::from(value(&mut args, "--config")?)),
            "--seed" => {
                let raw = value(&mut args, "--seed")?;
                seed = Some(raw.parse::<u64>().with_context(|| format!("Invalid seed: {}", raw))?);
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ if script.is_some() => bail!("Unexpected argument: {}", arg),
            _ => script = Some(PathBuf::from(&arg)),
        }
    }

    let Some(script) = script else {
        bail!("Usage: fq-kiosk <script.json> [--bank path] [--config path] [--seed N]");
    };

    Ok(Args {
        script,
        bank,
        config,
        seed,
    })
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next()
        .with_context(|| format!("{} needs a value", flag))
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_questions(path: Option<&Path>) -> anyhow::Result<Vec<Question>> {
    match path {
        Some(path) => load_bank(&read(path)?)
            .with_context(|| format!("Invalid question bank {}", path.display())),
        None => Ok(builtin_bank()?),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DragConfig> {
    match path {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("Invalid drag config {}", path.display())),
        None => Ok(DragConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let bank = load_questions(args.bank.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let script: Script = serde_json::from_str(&read(&args.script)?)
        .with_context(|| format!("Invalid script {}", args.script.display()))?;

    let question = bank
        .iter()
        .find(|q| q.id() == script.question)
        .with_context(|| format!("Question {} is not in the bank", script.question))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        "Replaying {} steps on question {} ({:?})",
        script.steps.len(),
        question.id(),
        script.device
    );

    let report = Replay::new(question, &script.layout, script.device, config, &mut rng)?
        .run(&script.steps);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
