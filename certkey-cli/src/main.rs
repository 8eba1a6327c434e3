//! Certkey CLI - inspect, verify and convert private keys and certificates

use anyhow::Result;
use certkey::{CertKeyManager, CipherSpec, KeyType, DEFAULT_ENCRYPTION_CIPHER};
use certkey_cli::{ConvertCommand, InspectCommand, Profile, ProfileCommand};
use certkey_common::{Component, LogLevel, Logger, LoggingConfig};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "certkey")]
#[command(about = "Inspect, verify and convert private keys and certificates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Password for encrypted keys and PKCS#12 files
    #[arg(
        short,
        long,
        global = true,
        env = "CERTKEY_PASSWORD",
        hide_env_values = true,
        value_parser = parse_password
    )]
    password: Option<Zeroizing<String>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a private key and check its password
    Key { file: PathBuf },
    /// Verify a certificate (PEM, DER or PKCS#12)
    Cert { file: PathBuf },
    /// Tell whether a file is a PKCS#12 container
    Pkcs12 { file: PathBuf },
    /// Decrypt a traditional RSA/DSA PEM key to DER
    Decrypt {
        file: PathBuf,
        /// Where to write the DER key
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Encrypt a DER private key into a traditional PEM key
    Encrypt {
        file: PathBuf,
        #[arg(long, value_enum)]
        key_type: KeyTypeArg,
        #[arg(long, value_parser = parse_cipher, default_value_t = DEFAULT_ENCRYPTION_CIPHER)]
        cipher: CipherSpec,
        /// Where to write the PEM key
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Verify every credential named in a JSON profile
    Profile { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyTypeArg {
    Rsa,
    Dsa,
}

impl From<KeyTypeArg> for KeyType {
    fn from(arg: KeyTypeArg) -> Self {
        match arg {
            KeyTypeArg::Rsa => KeyType::Rsa,
            KeyTypeArg::Dsa => KeyType::Dsa,
        }
    }
}

fn parse_cipher(name: &str) -> std::result::Result<CipherSpec, String> {
    name.parse::<CipherSpec>().map_err(|e| e.to_string())
}

fn parse_password(value: &str) -> std::result::Result<Zeroizing<String>, String> {
    Ok(Zeroizing::new(value.to_string()))
}

fn init_logging(verbose: bool, profile_logging: Option<&LoggingConfig>) {
    let config = match (verbose, profile_logging) {
        (true, Some(config)) => config.clone().with_default_level(LogLevel::Debug),
        (true, None) => LoggingConfig::new().with_default_level(LogLevel::Debug),
        (false, Some(config)) => config.clone(),
        (false, None) => LoggingConfig::new(),
    };

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&config.filter_spec());
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // the profile may carry its own logging section
    let profile = match &cli.command {
        Commands::Profile { file } => Some(Profile::load(file)?),
        _ => None,
    };
    init_logging(cli.verbose, profile.as_ref().and_then(|p| p.logging.as_ref()));

    let logger = Arc::new(Logger::new_root(Component::Cli, "main"));
    let manager = Arc::new(CertKeyManager::new(logger.clone())?);
    let password = cli.password.as_ref().map(|p| p.as_str());

    let inspect = InspectCommand::new(manager.clone(), logger.clone());
    let lines = match cli.command {
        Commands::Key { file } => vec![inspect.key(&file, password)?],
        Commands::Cert { file } => vec![inspect.cert(&file)?],
        Commands::Pkcs12 { file } => vec![inspect.pkcs12(&file)?],
        Commands::Decrypt { file, out } => {
            vec![ConvertCommand::new(manager, logger).decrypt(&file, password, &out)?]
        }
        Commands::Encrypt {
            file,
            key_type,
            cipher,
            out,
        } => vec![ConvertCommand::new(manager, logger).encrypt(
            &file,
            key_type.into(),
            cipher,
            password,
            &out,
        )?],
        Commands::Profile { file } => match &profile {
            Some(profile) => ProfileCommand::new(manager, logger).verify(profile, &file, password)?,
            None => ProfileCommand::new(manager, logger).run(&file, password)?,
        },
    };

    for line in lines {
        println!("{line}");
    }

    Ok(())
}
