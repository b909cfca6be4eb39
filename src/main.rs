use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use enigmacrypt::config::{ConfigError, MachineConfig};
use enigmacrypt::utils::escape::{escape, unescape};
use enigmacrypt::{parse_rotors, EnigmaMachine};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "enigmacrypt", about = "Three-rotor Enigma cipher machine", version)]
struct Cli {
    /// Log configuration and rotor turnovers (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt text.
    Encrypt {
        text: String,
        #[command(flatten)]
        setup: Setup,
    },

    /// Decrypt text.
    Decrypt {
        text: String,
        #[command(flatten)]
        setup: Setup,
    },

    /// Encrypt and decrypt "HELLO" with the reference setup.
    Demo,
}

/// Machine setup. Flags override values read from `--config`.
#[derive(Args)]
struct Setup {
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rotor labels, fastest first (e.g. "I II IV").
    #[arg(long)]
    rotors: Option<String>,

    /// Reflector, B or C.
    #[arg(long)]
    reflector: Option<String>,

    /// Plugboard pairs (e.g. "SZ GT DV").
    #[arg(long)]
    plugboard: Option<String>,

    /// Initial dial letters (e.g. "ABC").
    #[arg(long)]
    positions: Option<String>,

    /// Escape punctuation, spaces and digits before encrypting, and
    /// unescape after decrypting.
    #[arg(long)]
    escape: bool,
}

impl Setup {
    fn machine_config(&self) -> Result<MachineConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => MachineConfig::from_file(path)?,
            None => MachineConfig::default(),
        };
        if let Some(rotors) = &self.rotors {
            config.rotors = parse_rotors(rotors)?.to_vec();
        }
        if let Some(reflector) = &self.reflector {
            config.reflector = reflector.parse()?;
        }
        if let Some(plugboard) = &self.plugboard {
            config.plugboard = plugboard.clone();
        }
        if let Some(positions) = &self.positions {
            config.positions = positions.clone();
        }
        Ok(config)
    }

    fn machine(&self) -> Result<EnigmaMachine, ConfigError> {
        let config = self.machine_config()?;
        debug!(?config, "building machine");
        config.build()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Encrypt { text, setup } => run_encrypt(&text, &setup),
        Command::Decrypt { text, setup } => run_decrypt(&text, &setup),
        Command::Demo => run_demo(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_encrypt(text: &str, setup: &Setup) -> Result<(), ConfigError> {
    let mut machine = setup.machine()?;
    let input = if setup.escape {
        escape(text)
    } else {
        text.to_string()
    };
    let cipher = machine.encrypt(&input)?;
    println!("{cipher}");
    Ok(())
}

fn run_decrypt(text: &str, setup: &Setup) -> Result<(), ConfigError> {
    let mut machine = setup.machine()?;
    let clear = machine.decrypt(text)?;
    let clear = if setup.escape { unescape(&clear) } else { clear };
    println!("{clear}");
    Ok(())
}

fn run_demo() -> Result<(), ConfigError> {
    let config = MachineConfig::from_toml_str(
        r#"
        rotors = ["I", "II", "IV"]
        reflector = "B"
        plugboard = "SZ GT DV KU FO MY EW JN IX LQ"
        positions = "A B C"
        "#,
    )?;
    let mut machine = config.build()?;

    let clear = escape("HELLO");
    println!(" Clear: {clear}");

    let cipher = machine.encrypt(&clear)?;
    println!("Cypher: {cipher}");

    machine.reset();
    let clear = unescape(&machine.decrypt(&cipher)?);
    println!(" Clear: {clear}");
    info!(positions = ?machine.positions(), "demo finished");
    Ok(())
}
