use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use chip8vm::{
    config::{DEFAULT_CYCLES_PER_FRAME, DEFAULT_SCALE},
    Config, Emulator,
};
use window::Screen;

mod window;

#[derive(Parser, Debug)]
#[command(version, about = "CHIP-8 interpreter", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = DEFAULT_SCALE, help = "Window scale (1, 2, 4, 8, 16 or 32)")]
    scale: usize,

    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME, help = "Instructions executed per ~60 Hz frame")]
    cycles: u32,

    #[arg(long, help = "Seed for the random number instruction")]
    seed: Option<u64>,

    #[arg(help = "Path to the ROM file to run")]
    rom: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::new(args.scale, args.cycles, args.seed);

    let mut emu = match config.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };
    emu.load_program_file(&args.rom)
        .with_context(|| format!("could not load {}", args.rom.display()))?;

    let mut screen = Screen::new(config.scale)?;
    info!("running {} with {:?}", args.rom.display(), config);

    while screen.is_running() {
        for _ in 0..config.cycles_per_frame {
            screen.read_keys(emu.keypad_mut());
            if let Err(fault) = emu.step() {
                error!("emulation halted: {fault}");
                return Err(fault.into());
            }
        }
        // blocks until the next frame is due
        screen.sync(emu.framebuffer())?;
    }
    Ok(())
}
