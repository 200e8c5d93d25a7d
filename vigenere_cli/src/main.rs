use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{LevelFilter, debug};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use vigenere_core::{
    CaesarCipher, CrackConfig, DEFAULT_SAMPLE_LIMIT, ErrorSummation, FrequencyProfile,
    VigenereCipher, load_profile_file, store_table,
};

#[derive(Parser, Debug)]
#[command(
    name = "vigenere",
    author,
    version,
    about = "Caesar and Vigenere ciphers with frequency-analysis cracking"
)]
struct Cli {
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Mode {
    /// Encrypt the input file and store results in output file
    #[arg(short, long)]
    encrypt: bool,
    /// Decrypt the input file and store results in output file
    #[arg(short, long)]
    decrypt: bool,
}

#[derive(Args, Debug)]
struct Files {
    /// Path to the input text file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
    /// Path to the output file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SummationArg {
    Candidate,
    Union,
}

impl From<SummationArg> for ErrorSummation {
    fn from(arg: SummationArg) -> Self {
        match arg {
            SummationArg::Candidate => ErrorSummation::Candidate,
            SummationArg::Union => ErrorSummation::Union,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt or decrypt with a repeating password.
    Vigenere {
        #[command(flatten)]
        files: Files,
        /// Password to use for encryption/decryption
        #[arg(short, long)]
        password: String,
        #[command(flatten)]
        mode: Mode,
    },
    /// Encrypt or decrypt with a fixed shift.
    Caesar {
        #[command(flatten)]
        files: Files,
        #[arg(short, long, allow_negative_numbers = true)]
        shift: i32,
        #[command(flatten)]
        mode: Mode,
    },
    /// Recover an unknown Caesar shift and write the decrypted text.
    Crack {
        #[command(flatten)]
        files: Files,
        /// Reference profile JSON; the built-in English profile when omitted
        #[arg(short, long, value_name = "FILE")]
        reference: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "candidate")]
        summation: SummationArg,
        #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_SAMPLE_LIMIT)]
        sample_limit: usize,
    },
    /// Build a reference profile from a text corpus.
    Sample {
        #[command(flatten)]
        files: Files,
        #[arg(short, long, default_value = "English")]
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Vigenere {
            files,
            password,
            mode,
        } => cmd_vigenere(&files, password, mode.decrypt),
        Commands::Caesar { files, shift, mode } => cmd_caesar(&files, shift, mode.decrypt),
        Commands::Crack {
            files,
            reference,
            summation,
            sample_limit,
        } => cmd_crack(
            &files,
            reference.as_deref(),
            CrackConfig::new(sample_limit, summation.into()),
        ),
        Commands::Sample { files, name } => cmd_sample(&files, &name),
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn cmd_vigenere(files: &Files, password: String, decrypt: bool) -> Result<()> {
    let cipher = VigenereCipher::new(password).context("invalid password")?;
    let (input, output) = open_files(files)?;
    cipher
        .shift(input, output, decrypt)
        .with_context(|| format!("during {}", mode_label(decrypt)))?;
    println!("Output written to {}", files.output.display());
    Ok(())
}

fn cmd_caesar(files: &Files, shift: i32, decrypt: bool) -> Result<()> {
    let cipher = CaesarCipher::new(shift, FrequencyProfile::english());
    let (input, output) = open_files(files)?;
    cipher
        .shift(input, output, decrypt)
        .with_context(|| format!("during {}", mode_label(decrypt)))?;
    println!("Output written to {}", files.output.display());
    Ok(())
}

fn cmd_crack(files: &Files, reference: Option<&Path>, config: CrackConfig) -> Result<()> {
    let reference = match reference {
        Some(path) => load_profile_file(path)
            .with_context(|| format!("loading reference profile from {}", path.display()))?,
        None => FrequencyProfile::english(),
    };
    debug!(
        "crack reference='{}' sample_limit={} summation={:?}",
        reference.name(),
        config.sample_limit,
        config.summation
    );
    let cipher = CaesarCipher::new(0, reference).with_config(config);
    let (input, output) = open_files(files)?;
    let best = cipher.crack(input, output).context("cracking input")?;
    println!(
        "Recovered shift {} (squared error {:.6})",
        best.shift, best.error
    );
    println!("Output written to {}", files.output.display());
    Ok(())
}

fn cmd_sample(files: &Files, name: &str) -> Result<()> {
    let cipher = CaesarCipher::new(0, FrequencyProfile::english());
    let (input, output) = open_files(files)?;
    let table = cipher
        .sample_frequency(input)
        .with_context(|| format!("sampling {}", files.input.display()))?;
    debug!("sampled {} letters into '{}'", table.total(), table.name());
    store_table(output, &table, name)
        .with_context(|| format!("writing profile to {}", files.output.display()))?;
    println!("Output written to {}", files.output.display());
    Ok(())
}

fn open_files(files: &Files) -> Result<(BufReader<File>, BufWriter<File>)> {
    let input = File::open(&files.input)
        .with_context(|| format!("could not open input file {}", files.input.display()))?;
    let output = File::create(&files.output)
        .with_context(|| format!("could not create output file {}", files.output.display()))?;
    Ok((BufReader::new(input), BufWriter::new(output)))
}

fn mode_label(decrypt: bool) -> &'static str {
    if decrypt { "decryption" } else { "encryption" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::fs;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("vigenere").chain(args.iter().copied()))
    }

    #[test]
    fn encrypt_and_decrypt_conflict() {
        let err = parse(&["vigenere", "-i", "a", "-o", "b", "-p", "k", "-e", "-d"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn mode_is_required() {
        let err = parse(&["vigenere", "-i", "a", "-o", "b", "-p", "k"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn paths_are_required() {
        let err = parse(&["caesar", "-o", "b", "-s", "3", "-e"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn caesar_accepts_negative_shift() {
        let cli = parse(&["caesar", "-i", "a", "-o", "b", "-s", "-3", "-d"]).unwrap();
        match cli.command {
            Commands::Caesar { shift, mode, .. } => {
                assert_eq!(shift, -3);
                assert!(mode.decrypt);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn crack_defaults() {
        let cli = parse(&["--debug", "crack", "-i", "a", "-o", "b"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Crack {
                reference,
                summation,
                sample_limit,
                ..
            } => {
                assert!(reference.is_none());
                assert_eq!(summation, SummationArg::Candidate);
                assert_eq!(sample_limit, DEFAULT_SAMPLE_LIMIT);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn vigenere_files_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let cipher = dir.path().join("cipher.txt");
        let restored = dir.path().join("restored.txt");
        fs::write(&plain, "HELLO WORLD\n").unwrap();

        let p = |path: &Path| path.to_str().unwrap().to_string();
        run(parse(&["vigenere", "-i", &p(&plain), "-o", &p(&cipher), "-p", "ABC", "-e"]).unwrap())
            .unwrap();
        assert_eq!(fs::read_to_string(&cipher).unwrap(), "HFNLP YOSND\n");

        run(parse(&["vigenere", "-i", &p(&cipher), "-o", &p(&restored), "-p", "ABC", "-d"]).unwrap())
            .unwrap();
        assert_eq!(fs::read_to_string(&restored).unwrap(), "HELLO WORLD\n");
    }

    #[test]
    fn sample_then_crack_with_stored_reference() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus.txt");
        let profile = dir.path().join("profile.json");
        let encrypted = dir.path().join("encrypted.txt");
        let cracked = dir.path().join("cracked.txt");
        let text = "the quick brown fox jumps over the lazy dog while the eager \
                    students read their notes in the quiet library near the station";
        fs::write(&corpus, text).unwrap();
        fs::write(&encrypted, vigenere_core::shift_text(text, 5)).unwrap();

        let p = |path: &Path| path.to_str().unwrap().to_string();
        run(parse(&["sample", "-i", &p(&corpus), "-o", &p(&profile), "-n", "Corpus"]).unwrap())
            .unwrap();
        let stored = load_profile_file(&profile).unwrap();
        assert_eq!(stored.name(), "Corpus");

        run(parse(&[
            "crack",
            "-i",
            &p(&encrypted),
            "-o",
            &p(&cracked),
            "-r",
            &p(&profile),
        ])
        .unwrap())
        .unwrap();
        assert_eq!(fs::read_to_string(&cracked).unwrap(), text);
    }

    #[test]
    fn missing_input_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let out = dir.path().join("out.txt");
        let err = run(parse(&[
            "caesar",
            "-i",
            missing.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-s",
            "3",
            "-e",
        ])
        .unwrap())
        .unwrap_err();
        assert!(err.to_string().contains("could not open input file"));
    }
}
