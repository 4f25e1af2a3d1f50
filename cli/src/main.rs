//! Command-line test harness for the 8080 core: hexdump, disassemble,
//! debug-step, free-run, and a headless Space Invaders cabinet smoke test.
//!
//! Grounded on `original_source/disassemble.cpp`'s `main()`, which drives
//! the same four ROM-file commands plus CP/M BDOS emulation.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use invaders_core::{Disassembler, Intel8080, Intel8080State, Memory};
use invaders_machines::rom_loader::RomSet;
use invaders_machines::{NullSoundAdapter, SpaceInvadersCabinet};

#[derive(Parser)]
#[command(name = "invaders", about = "8080 / Space Invaders emulator test harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a 16-bytes-per-row hex + ASCII dump of the loaded image.
    Hexdump {
        file_name: PathBuf,
        #[arg(long)]
        cpm: bool,
    },
    /// Disassemble from the load address to the end of the image.
    Disassemble {
        file_name: PathBuf,
        #[arg(long)]
        cpm: bool,
    },
    /// Step the emulator one instruction at a time, printing state.
    Debug {
        file_name: PathBuf,
        #[arg(long)]
        cpm: bool,
    },
    /// Run the emulator to completion, printing a closing summary.
    Run {
        file_name: PathBuf,
        #[arg(long)]
        cpm: bool,
    },
    /// Load the four concatenated Space Invaders ROM files from a directory
    /// and run the cabinet headless for a fixed number of frames.
    Cabinet {
        rom_dir: PathBuf,
        #[arg(long, default_value_t = 60)]
        frames: u32,
    },
}

const DISPLAY_WIDTH: usize = 16;
const CPM_BDOS_STUB: u16 = 0xE400;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Hexdump { file_name, cpm } => {
            let (memory, start, len) = load_image(&file_name, cpm)?;
            hexdump(&memory, start, len)
        }
        Command::Disassemble { file_name, cpm } => {
            let (memory, start, len) = load_image(&file_name, cpm)?;
            disassemble(&memory, start, len)
        }
        Command::Debug { file_name, cpm } => {
            let (mut memory, start, _len) = load_image(&file_name, cpm)?;
            debug_or_run(&mut memory, start, cpm, true)
        }
        Command::Run { file_name, cpm } => {
            let (mut memory, start, _len) = load_image(&file_name, cpm)?;
            debug_or_run(&mut memory, start, cpm, false)
        }
        Command::Cabinet { rom_dir, frames } => cabinet_smoke_test(&rom_dir, frames),
    }
}

fn load_image(file_name: &std::path::Path, cpm: bool) -> Result<(Memory, u16, usize), String> {
    let data = std::fs::read(file_name)
        .map_err(|e| format!("could not open file: {} ({e})", file_name.display()))?;

    let start_address: u16 = if cpm { 0x0100 } else { 0x0000 };
    if data.len() + start_address as usize > 0x1_0000 {
        return Err("file too long".to_string());
    }

    let mut memory = Memory::new_ram();
    memory.flash_slice(start_address, &data);
    Ok((memory, start_address, data.len()))
}

fn hexdump(memory: &Memory, start: u16, len: usize) -> Result<(), String> {
    let mut printable = String::new();
    for i in 0..len {
        let addr = start.wrapping_add(i as u16);
        if i % DISPLAY_WIDTH == 0 {
            if i != 0 {
                println!("{printable}");
                printable.clear();
            }
            print!("{addr:04x} ");
        }
        let byte = memory.read(addr).map_err(|e| e.to_string())?;
        print!("{byte:02x} ");
        printable.push(if (32..=126).contains(&byte) {
            byte as char
        } else {
            '.'
        });
    }
    println!("{printable}");
    Ok(())
}

fn disassemble(memory: &Memory, start: u16, len: usize) -> Result<(), String> {
    let mut disassembler = Disassembler::new();
    disassembler.reset(start);
    let end = start.wrapping_add(len as u16);
    while disassembler.pc() < end {
        let (addr, text) = disassembler.step(memory).map_err(|e| e.to_string())?;
        println!("{addr:04x}  {text}");
    }
    Ok(())
}

/// Patches the CP/M BDOS trap at `0x0005` and installs the stub at
/// `0xE400`, matching `disassemble.cpp`'s `debug`/`run` CP/M setup.
fn install_cpm_stub(memory: &mut Memory) {
    memory.flash(0x0005, 0xC3); // JMP $e400
    memory.flash(0x0006, 0x00);
    memory.flash(0x0007, 0xE4);

    memory.flash(CPM_BDOS_STUB, 0xF5); // PUSH PSW
    memory.flash(CPM_BDOS_STUB + 1, 0x79); // MOV A,C
    memory.flash(CPM_BDOS_STUB + 2, 0xD3); // OUT $ff
    memory.flash(CPM_BDOS_STUB + 3, 0xFF);
    memory.flash(CPM_BDOS_STUB + 4, 0xF1); // POP PSW
    memory.flash(CPM_BDOS_STUB + 5, 0xC9); // RET
}

fn debug_or_run(memory: &mut Memory, start: u16, cpm: bool, debug: bool) -> Result<(), String> {
    if cpm {
        install_cpm_stub(memory);
    }

    let mut cpu = Intel8080::new();
    cpu.reset(start);
    cpu.connect_input(|_port| 0xFF);
    if !cpm {
        cpu.connect_output(|_port, _value| {});
    }
    // In CP/M mode the BDOS stub's `OUT $ff` is serviced after each step
    // below rather than through `connect_output`, since the trap needs to
    // read D/E/C from the *post-step* register file.

    let mut disassembler = Disassembler::new();
    if debug {
        disassembler.reset(start);
    }

    let mut cycles: u64 = 0;
    let mut instructions: u64 = 0;
    let started = Instant::now();

    loop {
        cycles += cpu.step(memory).map_err(|e| e.to_string())? as u64;
        instructions += 1;

        if cpm {
            handle_cpm_trap(memory, &cpu.state());
        }
        if debug {
            print_debug_line(&mut disassembler, memory, cycles, &cpu)?;
        }

        let finished = if cpm {
            cpu.state().pc == 0x0000
        } else {
            cpu.is_halted()
        };
        if finished {
            break;
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    println!();
    println!("Ran {instructions} instructions in {elapsed} seconds.");
    println!("Used {cycles} cycles.");
    let megahertz = (cycles as f64 / elapsed) / 1.0e6;
    println!("Approximate clock speed: {megahertz} MHz.");
    Ok(())
}

/// Services the CP/M BDOS stub's `OUT $ff` trap: `C=9` prints a
/// `$`-terminated string from `[DE]`, `C=2` prints the character in `E`.
/// Only fires right after the stub's `OUT $ff` has executed (`pc` sitting
/// on the following `POP PSW`) so that neither the stub's own `MOV A,C`
/// nor an unrelated instruction that happens to leave `A` at 9 or 2 is
/// mistaken for a BDOS call.
fn handle_cpm_trap(memory: &Memory, state: &Intel8080State) {
    if state.pc != CPM_BDOS_STUB + 4 {
        return;
    }
    match state.a {
        9 => {
            let mut addr = (state.d as u16) << 8 | state.e as u16;
            while let Ok(byte) = memory.read(addr) {
                if byte as char == '$' {
                    break;
                }
                print!("{}", byte as char);
                addr = addr.wrapping_add(1);
            }
        }
        2 => print!("{}", state.e as char),
        _ => {}
    }
}

fn print_debug_line(
    disassembler: &mut Disassembler,
    memory: &Memory,
    cycles: u64,
    cpu: &Intel8080,
) -> Result<(), String> {
    let state = cpu.state();
    disassembler.reset(state.pc);
    let (_, text) = disassembler.step(memory).map_err(|e| e.to_string())?;
    println!("Cycles: {cycles}");
    println!(
        "A: 0x{:02x} B: 0x{:02x} C: 0x{:02x} D: 0x{:02x} E: 0x{:02x} H: 0x{:02x} L: 0x{:02x} SP: 0x{:04x} PC: 0x{:04x} Flags: 0b{:08b}  {text}",
        state.a, state.b, state.c, state.d, state.e, state.h, state.l, state.sp, state.pc, state.f
    );
    Ok(())
}

fn cabinet_smoke_test(rom_dir: &std::path::Path, frames: u32) -> Result<(), String> {
    let rom_set = RomSet::from_directory(rom_dir).map_err(|e| e.to_string())?;
    let mut cabinet = SpaceInvadersCabinet::new(NullSoundAdapter);
    cabinet.load_rom_set(&rom_set).map_err(|e| e.to_string())?;

    let mut total_cycles = 0u64;
    for _ in 0..frames {
        total_cycles += cabinet.run_frame().map_err(|e| e.to_string())?;
    }
    println!("Ran {frames} frames, {total_cycles} cycles.");
    Ok(())
}
