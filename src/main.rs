use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, bail};
use chrono::Local;
use drumpack::prelude::*;

mod trace;

const PROMPT: &str =
    "Enter a name for the drum samples folder (or press Enter to use a timestamp): ";

const USAGE: &str = "usage: drumpack [BASE_DIR] [--extended] [--gm-pitches]";

#[derive(Debug, Default)]
struct Args {
    base_dir: Option<PathBuf>,
    extended: bool,
    gm_pitches: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--extended" => parsed.extended = true,
                "--gm-pitches" => parsed.gm_pitches = true,
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
                _ if parsed.base_dir.is_some() => bail!("more than one base directory\n{USAGE}"),
                _ => parsed.base_dir = Some(PathBuf::from(&arg)),
            }
        }
        Ok(parsed)
    }
}

fn prompt_folder_name() -> anyhow::Result<String> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(PROMPT.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading folder name")?;
    Ok(folder_name_or_timestamp(&line, &Local::now()))
}

fn run() -> anyhow::Result<bool> {
    let args = Args::parse(std::env::args().skip(1))?;
    let folder_name = prompt_folder_name()?;

    let base_dir = args.base_dir.unwrap_or_else(|| PathBuf::from("."));
    let mut config = PackConfig::new(base_dir, folder_name);
    if args.extended {
        config = config.with_voices(Voice::EXTENDED);
    }
    if args.gm_pitches {
        config.pattern.pitch = PitchMode::GeneralMidi;
    }

    let report = build_pack(&config).context("creating the pack folder")?;

    println!(
        "Drum samples created in {} ({} files written)",
        report.root.display(),
        report.written.len()
    );
    for failure in &report.failures {
        println!("  failed: {failure}");
    }
    Ok(report.is_success())
}

fn main() -> ExitCode {
    trace::setup();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_base_dir() {
        let parsed = args(&["--extended", "/Volumes/bR", "--gm-pitches"]).unwrap();
        assert_eq!(parsed.base_dir, Some(PathBuf::from("/Volumes/bR")));
        assert!(parsed.extended && parsed.gm_pitches);

        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.base_dir, None);
        assert!(!parsed.extended);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(args(&["--loud"]).is_err());
        assert!(args(&["a", "b"]).is_err());
    }
}
