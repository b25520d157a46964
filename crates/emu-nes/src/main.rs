//! NES emulator binary.
//!
//! Loads an iNES ROM, runs the CPU for a fixed budget of frames or cycles,
//! and reports the final CPU state.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::{env, process};

use emu_core::Observable;
use emu_nes::{Nes, NesRegion, logger};
use getopts::Options;
use nes_cartridge::{Cartridge, CartridgeError};
use log::LevelFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1; // Generic error.
const EXIT_INVALID_ROM: i32 = 2; // Not a readable iNES image.
const EXIT_USAGE: i32 = 3; // Bad command line.

/// How much emulated time to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Budget {
    Frames(u64),
    Cycles(u64),
}

#[derive(Debug)]
struct CliArgs {
    rom_path: PathBuf,
    budget: Budget,
    region: NesRegion,
    log_level: LevelFilter,
    dump: bool,
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("f", "frames", "run N video frames (default 200)", "N");
    opts.optopt("c", "cycles", "run exactly N CPU cycles", "N");
    opts.optflag("", "pal", "use PAL timing");
    opts.optflag("v", "verbose", "log cartridge and interrupt activity");
    opts.optflag("t", "trace", "log every instruction");
    opts.optflag("d", "dump", "print the final CPU state as JSON");
    opts.optflag("h", "help", "print this help");
    opts
}

fn parse_count(value: &str, option: &str) -> Result<u64, String> {
    value
        .parse()
        .map_err(|e| format!("invalid value for --{option}: {value:?} ({e})"))
}

/// Parse the command line. `Ok(None)` means help was requested.
fn parse_args(args: &[String], opts: &Options) -> Result<Option<CliArgs>, String> {
    let matches = opts.parse(args).map_err(|e| e.to_string())?;
    if matches.opt_present("h") {
        return Ok(None);
    }

    let rom_path = match matches.free.as_slice() {
        [path] => PathBuf::from(path),
        [] => return Err("no ROM given".to_string()),
        _ => return Err("expected exactly one ROM".to_string()),
    };

    let budget = if let Some(cycles) = matches.opt_str("c") {
        Budget::Cycles(parse_count(&cycles, "cycles")?)
    } else if let Some(frames) = matches.opt_str("f") {
        Budget::Frames(parse_count(&frames, "frames")?)
    } else {
        Budget::Frames(200)
    };

    let log_level = if matches.opt_present("t") {
        LevelFilter::Trace
    } else if matches.opt_present("v") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    Ok(Some(CliArgs {
        rom_path,
        budget,
        region: if matches.opt_present("pal") {
            NesRegion::Pal
        } else {
            NesRegion::Ntsc
        },
        log_level,
        dump: matches.opt_present("d"),
    }))
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {program} [options] ROM");
    eprint!("{}", opts.usage(&brief));
}

/// Exit code for a ROM that could not be loaded.
fn load_error_code(err: &CartridgeError) -> i32 {
    match err {
        CartridgeError::Io(_) => EXIT_FAILURE,
        CartridgeError::InvalidMagic(_) | CartridgeError::Truncated(_) => EXIT_INVALID_ROM,
    }
}

fn run(cli: &CliArgs) -> i32 {
    let cartridge = match Cartridge::load(&cli.rom_path) {
        Ok(cartridge) => cartridge,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.rom_path.display());
            return load_error_code(&e);
        }
    };
    let mut nes = Nes::from_cartridge(cartridge, cli.region);

    println!("{}", nes.cartridge().header());

    let cycles = match cli.budget {
        Budget::Frames(frames) => nes.run_frames(frames),
        Budget::Cycles(cycles) => {
            nes.run_cycles(cycles);
            cycles
        }
    };

    let regs = nes.cpu().regs;
    println!(
        "Ran {cycles} cycles: PC=${:04X} A=${:02X} X=${:02X} Y=${:02X} S=${:02X} P=${:02X}",
        regs.pc, regs.a, regs.x, regs.y, regs.s, regs.p.0
    );

    if cli.dump {
        let state: BTreeMap<&str, _> = nes.snapshot().into_iter().collect();
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialise state: {e}");
                return EXIT_FAILURE;
            }
        }
    }

    EXIT_SUCCESS
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("emu-nes", String::as_str);
    let opts = options();

    let cli = match parse_args(args.get(1..).unwrap_or_default(), &opts) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_usage(program, &opts);
            process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage(program, &opts);
            process::exit(EXIT_USAGE);
        }
    };

    if let Err(e) = logger::init(cli.log_level) {
        eprintln!("Failed to install logger: {e}");
    }

    process::exit(run(&cli));
}
