use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::{fs, io};

use clap::{Parser, ValueEnum};
use log::warn;

use qrune::{max_characters, ECLevel, QRBuilder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Level::L => "l",
            Level::M => "m",
            Level::Q => "q",
            Level::H => "h",
        })
    }
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

/// Generate a QR code and print it to the terminal or save it as an image.
///
/// Reads the message from the argument, --file, or standard input. Messages
/// longer than the largest symbol holds are truncated with a warning.
#[derive(Parser, Debug)]
#[command(name = "qrune", version, about)]
struct Args {
    /// Message used to create the QR code; reads standard input when absent
    message: Option<String>,

    /// Create the QR code from a file
    #[arg(short, long, conflicts_with = "message")]
    file: Option<PathBuf>,

    /// Error correction level
    #[arg(short, long, value_enum, default_value_t = Level::H)]
    ec_level: Level,

    /// Save the symbol as an image at the given path instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Module size in pixels for image output
    #[arg(short, long, default_value_t = 8)]
    scale: u32,

    /// Print symbol details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("qrune: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut message = read_message(&args)?;
    let ec_level = ECLevel::from(args.ec_level);

    let max_chars = max_characters(&message, ec_level);
    if message.len() > max_chars {
        warn!("Message length {} exceeds the version 40 capacity", message.len());
        eprintln!(
            "qrune: warning: message truncated to the {max_chars} character capacity of the largest symbol"
        );
        message.truncate(max_chars);
    }

    let qr = QRBuilder::new(&message).ec_level(ec_level).build()?;

    if args.verbose {
        let w = qr.width();
        println!("Version {} - Size: {w}x{w}", qr.version());
        println!(
            "Message: {} characters, EC level: {:?}",
            message.len(),
            qr.ec_level()
        );
    }

    match &args.output {
        Some(path) => qr.render(args.scale).save(path)?,
        None => print!("{}", qr.to_str(1)),
    }

    Ok(())
}

fn read_message(args: &Args) -> io::Result<Vec<u8>> {
    let mut message = if let Some(path) = &args.file {
        fs::read(path)?
    } else if let Some(message) = &args.message {
        message.clone().into_bytes()
    } else {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    };

    // A trailing newline from piped input would force byte mode
    while message.last() == Some(&b'\n') || message.last() == Some(&b'\r') {
        message.pop();
    }

    Ok(message)
}
