//! Command-line client for PCF7931 transponders behind a reader device

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{Parser, Subcommand};

use pcf7931::{ConfigUpdate, Pcf7931, Pcf7931Error, SerialLink, TagConfig};

#[derive(Parser)]
#[command(name = "pcf7931")]
#[command(about = "Read, write and configure PCF7931 transponders through a reader device")]
#[command(version)]
struct Cli {
    /// Serial port of the reader device
    #[arg(long, global = true, default_value = "/dev/ttyACM0")]
    port: String,

    /// Serial baud rate
    #[arg(long, global = true, default_value_t = 115_200)]
    baud: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the content of a transponder
    Reader {
        /// Continuous reader mode
        #[arg(short = '@', long)]
        continuous: bool,
    },
    /// Show or change the tag access configuration
    ///
    /// Without flags the current configuration is printed. The time offsets
    /// can correct slew rate generated by the antenna. Configuration lives
    /// for the duration of one run and resets to defaults at every start.
    Config {
        /// Reset configuration to default values
        #[arg(short, long)]
        reset: bool,

        /// Password, 7 bytes, LSB order
        #[arg(short, long, value_name = "hex")]
        pwd: Option<String>,

        /// Tag initialization delay (in us)
        #[arg(short, long, value_name = "dec")]
        delay: Option<u32>,

        /// Offset, low pulses width (in us)
        #[arg(long, value_name = "dec", allow_negative_numbers = true)]
        lw: Option<i32>,

        /// Offset, low pulses position (in us)
        #[arg(long, value_name = "dec", allow_negative_numbers = true)]
        lp: Option<i32>,
    },
    /// Write one data byte on a transponder
    Write {
        /// [0-7] block number
        #[arg(short, long)]
        blk: u8,

        /// [0-15] index of byte inside block
        #[arg(short, long)]
        idx: u8,

        /// One byte to be written (hex)
        #[arg(short, long, value_name = "hex")]
        data: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(err: &Pcf7931Error) -> u8 {
    match err {
        Pcf7931Error::Link(_) => 1,
        Pcf7931Error::InvalidArgument(_) => 2,
        Pcf7931Error::TimedOut => 3,
    }
}

fn run(cli: Cli) -> Result<(), Pcf7931Error> {
    match cli.command {
        Commands::Reader { continuous } => {
            let mut tag = connect(&cli.port, cli.baud)?;
            if continuous {
                println!("press <Enter> to exit");
                let reads = tag.read_continuous(enter_pressed())?;
                println!("stopped after {reads} reads");
            } else {
                tag.read()?;
            }
            Ok(())
        }
        Commands::Config {
            reset,
            pwd,
            delay,
            lw,
            lp,
        } => {
            let mut config = TagConfig::default();
            if reset {
                config.reset();
                println!("configuration reset");
            } else {
                let update = ConfigUpdate {
                    password: pwd.as_deref().map(parse_hex).transpose()?,
                    init_delay: delay,
                    offset_width: lw,
                    offset_position: lp,
                };
                config.update(&update)?;
            }
            print!("{}", config.describe());
            Ok(())
        }
        Commands::Write { blk, idx, data } => {
            let bytes = parse_hex(&data)?;
            if bytes.len() != 1 {
                return Err(Pcf7931Error::InvalidArgument(
                    "data must be exactly 1 byte".into(),
                ));
            }

            let mut tag = connect(&cli.port, cli.baud)?;
            tag.write(blk, idx, bytes[0])?;
            println!("done");
            Ok(())
        }
    }
}

fn connect(port: &str, baud: u32) -> Result<Pcf7931<SerialLink>, Pcf7931Error> {
    let link = SerialLink::new(port, baud).map_err(|e| Pcf7931Error::Link(format!("{:?}", e)))?;
    Ok(Pcf7931::new(link))
}

/// Cooperative cancellation token set once the user presses Enter.
///
/// A background thread blocks on stdin; the reader loop polls the flag
/// between iterations.
fn enter_pressed() -> impl FnMut() -> bool {
    let stop = Arc::new(AtomicBool::new(false));
    let watcher = Arc::clone(&stop);
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        watcher.store(true, Ordering::Relaxed);
    });
    move || stop.load(Ordering::Relaxed)
}

fn parse_hex(s: &str) -> Result<Vec<u8>, Pcf7931Error> {
    hex::decode(s).map_err(|e| Pcf7931Error::InvalidArgument(format!("invalid hex string: {e}")))
}
