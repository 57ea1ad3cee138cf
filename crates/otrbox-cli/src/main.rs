//! otrbox CLI
//!
//! Public-key authenticated messages between two parties. Keys live in
//! `otrbox.pub` / `otrbox.prv` and are generated on first run.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use commands::RequestOptions;
use otrbox_core::{encode_key, Bootstrap, KeyStore, NaClEngine};
use std::path::PathBuf;
use tracing::{debug, info};

/// Exit status for every fatal error
const FATAL_EXIT_CODE: i32 = 3;

#[derive(Parser)]
#[command(name = "otrbox")]
#[command(author, version, about = "Encrypt and decrypt messages with NaCl box key pairs", long_about = None)]
struct Cli {
    /// The plaintext message that you'd like to encrypt
    #[arg(long, value_name = "PLAINTEXT", allow_hyphen_values = true)]
    encrypt: Option<String>,

    /// The ciphertext that you'd like to decrypt in order to read the message
    #[arg(long, value_name = "HEX")]
    decrypt: Option<String>,

    /// Prints the hex encoded value of your public key
    #[arg(long = "myPublicKey")]
    my_public_key: bool,

    /// Prints the hex encoded value of your private key
    #[arg(long = "myPrivateKey")]
    my_private_key: bool,

    /// The public key of the individual you'd like to communicate with
    #[arg(long = "theirPublicKey", value_name = "HEX")]
    their_public_key: Option<String>,

    /// Directory holding otrbox.pub and otrbox.prv (default: $OTRBOX_HOME or the working directory)
    #[arg(long, value_name = "DIR")]
    key_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn request_options(&self) -> RequestOptions {
        RequestOptions {
            encrypt: self.encrypt.clone(),
            decrypt: self.decrypt.clone(),
            my_public_key: self.my_public_key,
            my_private_key: self.my_private_key,
            their_public_key: self.their_public_key.clone(),
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let code = if e.use_stderr() { FATAL_EXIT_CODE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        debug!("Command failed: {:?}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(FATAL_EXIT_CODE);
    }
}

fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if verbose {
            "otrbox_cli=debug,otrbox_core=debug"
        } else {
            "otrbox_cli=info,otrbox_core=info"
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Logging was already initialised");
    }
}

fn run(cli: &Cli) -> Result<()> {
    let home = config::key_home(cli.key_dir.as_deref())?;
    let store = KeyStore::new(home);
    let engine = NaClEngine::new();

    match store
        .bootstrap(&engine)
        .with_context(|| format!("Failed to create keys in {}", store.dir().display()))?
    {
        Bootstrap::Generated(public_key) => info!("Your new public key: {}", encode_key(&public_key)),
        Bootstrap::Existing => debug!("Key pair found in {}", store.dir().display()),
    }

    let request = cli.request_options().resolve()?;

    let keys = store
        .load_pair()
        .with_context(|| format!("Failed to load keys from {}", store.dir().display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(&engine, &keys, request, &mut out)
}
