use crate::config::{Config, KeyConsumption, KeyResume};
use crate::input;
use crate::instruction::Instruction;
use crate::interpreter::Interpreter;
use crate::memory::PROGRAM_START;
use crate::screen::Screen;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit_input_helper::WinitInputHelper;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity of debug logging
    #[arg(short, long, value_enum, global = true)]
    debug: Option<DebugMode>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a ROM in a window
    Run(RunArgs),
    /// Write a listing of a ROM's instructions
    Disassemble {
        /// The path to the ROM
        path: PathBuf,

        /// Where to output the disassembled ROM
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// The path to the ROM
    pub path: PathBuf,

    /// Steps executed per second; the timers count down once per step
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..=MAX_IPS))]
    pub ips: u32,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Program counter behaviour when a key press ends an FX0A wait
    #[arg(long, value_enum, default_value_t = KeyResume::Once)]
    pub key_resume: KeyResume,

    /// When EX9E/EXA1 forget the last pressed key
    #[arg(long, value_enum, default_value_t = KeyConsumption::OnMismatch)]
    pub key_consumption: KeyConsumption,
}

impl RunArgs {
    pub fn config(&self) -> Config {
        Config {
            seed: self.seed,
            key_resume: self.key_resume,
            key_consumption: self.key_consumption,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum DebugMode {
    Info,
    Debug,
    Trace,
    Error,
}

impl fmt::Display for DebugMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Error => "error",
        })
    }
}

pub fn init() -> Cli {
    let cli = Cli::parse();
    std::env::set_var(
        "RUST_LOG",
        format!("chipvm={}", cli.debug.unwrap_or(DebugMode::Error)),
    );

    env_logger::init();

    cli
}

/// Most steps run in one frame; time beyond this is dropped rather than
/// replayed.
const MAX_STEPS_PER_FRAME: u32 = 1000;
const MAX_IPS: i64 = 1_000_000;

/// Converts wall-clock time into a number of owed steps.
struct Clock {
    period: Duration,
    last: Instant,
}

impl Clock {
    fn new(ips: u32, now: Instant) -> Self {
        Self {
            period: (Duration::from_secs(1) / ips.max(1)).max(Duration::from_nanos(1)),
            last: now,
        }
    }

    fn due(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let steps = elapsed.as_nanos() / self.period.as_nanos();
        if steps > u128::from(MAX_STEPS_PER_FRAME) {
            self.last = now;
            return MAX_STEPS_PER_FRAME;
        }
        let steps = steps as u32;
        self.last += self.period * steps;
        steps
    }
}

pub fn run(path: &Path, ips: u32, config: Config) -> Result<(), Box<dyn Error>> {
    let rom = fs::read(path)?;
    let mut interpreter = Interpreter::with_config(config);
    interpreter.load_program(&rom)?;

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let mut screen = Screen::new(&event_loop)?;
    let mut clock = Clock::new(ips, Instant::now());
    info!("Running {} [ips: {ips}]", path.display());

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            if let Err(e) = screen.render(interpreter.framebuffer_snapshot()) {
                error!("Rendering failed: {e}");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            if let Some(size) = input.window_resized() {
                if let Err(e) = screen.resize(size) {
                    error!("Resizing failed: {e}");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            if let Some(key) = input::held_key(&input) {
                if let Err(e) = interpreter.press_key(key) {
                    error!("{e}");
                }
            }

            for _ in 0..clock.due(Instant::now()) {
                if let Err(e) = interpreter.step() {
                    error!("Halted at {:#05X}: {e}", interpreter.pc());
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            screen.window().request_redraw();
        }
    });
}

/// One `ADDR  WORD  MNEMONIC` line per instruction word, addressed as if
/// loaded at 0x200. A trailing odd byte is listed as data.
pub fn write_disassembly(rom: &[u8], out: &mut impl Write) -> io::Result<()> {
    let mut chunks = rom.chunks_exact(2);
    let mut address = PROGRAM_START;
    for chunk in chunks.by_ref() {
        let word = u16::from_be_bytes([chunk[0], chunk[1]]);
        let inst = Instruction::from(word);
        writeln!(out, "{address:03X}  {inst:?}  {inst}")?;
        address += 2;
    }
    if let [byte] = chunks.remainder() {
        writeln!(out, "{address:03X}  {byte:02X}    DB {byte:#04X}")?;
    }
    Ok(())
}

pub fn disassemble(path: &Path, output_file: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    if let Some(mut f) = output_file.clone() {
        if f.extension().is_none() {
            return Err(format!("{} is not a file", f.display()).into());
        }
        f.pop();
        fs::create_dir_all(f)?;
    }

    let output = output_file.unwrap_or(PathBuf::from("output.txt"));
    let rom = fs::read(path)?;
    let mut file = io::BufWriter::new(fs::File::create(&output)?);

    writeln!(file, "== {} ==", path.display())?;
    write_disassembly(&rom, &mut file)?;
    file.flush()?;

    info!("Wrote disassembled ROM to {}", output.display());

    Ok(())
}
