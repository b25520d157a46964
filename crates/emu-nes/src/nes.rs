//! Top-level NES system.
//!
//! Only the CPU side of the console is modelled: PRG ROM is copied into a
//! flat 64KB bus and the 6502 runs against it. The system clock counts CPU
//! cycles; a frame is the number of CPU cycles the region's PPU would take
//! to draw one picture.

use emu_core::{Observable, SimpleBus, Value};
use mos_6502::Mos6502;
use nes_cartridge::{Cartridge, CartridgeError};

use crate::config::{NesConfig, NesRegion};

/// NES system.
pub struct Nes {
    cpu: Mos6502,
    bus: SimpleBus,
    cartridge: Cartridge,
    /// CPU cycles since power-on.
    system_clock: u64,
    /// Completed frame counter.
    frame_count: u64,
    region: NesRegion,
}

impl Nes {
    /// Create a new NES from the given configuration and reset the CPU.
    pub fn new(config: &NesConfig) -> Result<Self, CartridgeError> {
        let cartridge = Cartridge::from_bytes(&config.rom_data)?;
        Ok(Self::from_cartridge(cartridge, config.region))
    }

    /// Build the system around an already parsed cartridge.
    #[must_use]
    pub fn from_cartridge(cartridge: Cartridge, region: NesRegion) -> Self {
        let mut bus = SimpleBus::new();
        cartridge.load_into(&mut bus);

        let mut cpu = Mos6502::new();
        cpu.reset(&mut bus);

        Self {
            cpu,
            bus,
            cartridge,
            system_clock: 0,
            frame_count: 0,
            region,
        }
    }

    /// Advance one CPU cycle.
    pub fn clock(&mut self) {
        self.cpu.clock(&mut self.bus);
        self.system_clock += 1;
    }

    /// Run until the current instruction (or reset/interrupt sequence)
    /// completes. Returns the cycles consumed.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        self.system_clock += u64::from(cycles);
        cycles
    }

    /// Run an exact number of CPU cycles.
    pub fn run_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.clock();
        }
    }

    /// Run one frame's worth of CPU cycles. Returns the cycles executed.
    pub fn run_frame(&mut self) -> u64 {
        let cycles = self.region.cpu_cycles_per_frame();
        self.run_cycles(cycles);
        self.frame_count += 1;
        cycles
    }

    /// Run several frames. Returns the cycles executed.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        (0..frames).map(|_| self.run_frame()).sum()
    }

    /// Press the reset button. Memory, and so the loaded ROM, survives.
    pub fn reset(&mut self) {
        log::info!("system reset");
        self.cpu.reset(&mut self.bus);
    }

    /// Assert IRQ. Returns whether the CPU took it.
    pub fn irq(&mut self) -> bool {
        self.cpu.irq(&mut self.bus)
    }

    /// Assert NMI.
    pub fn nmi(&mut self) {
        self.cpu.nmi(&mut self.bus);
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    /// Mutable reference to the CPU.
    pub fn cpu_mut(&mut self) -> &mut Mos6502 {
        &mut self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &SimpleBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut SimpleBus {
        &mut self.bus
    }

    #[must_use]
    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    /// Video region (NTSC or PAL).
    #[must_use]
    pub fn region(&self) -> NesRegion {
        self.region
    }

    /// CPU cycles since power-on.
    #[must_use]
    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    /// Completed frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

const QUERY_PATHS: &[&str] = &[
    "cpu.pc",
    "cpu.a",
    "cpu.x",
    "cpu.y",
    "cpu.s",
    "cpu.p",
    "cpu.flags.c",
    "cpu.flags.z",
    "cpu.flags.i",
    "cpu.flags.d",
    "cpu.flags.b",
    "cpu.flags.u",
    "cpu.flags.v",
    "cpu.flags.n",
    "cpu.opcode",
    "cpu.cycles",
    "cpu.total_cycles",
    "system_clock",
    "frame_count",
];

impl Observable for Nes {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("memory.") {
            let addr =
                if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
                    u16::from_str_radix(hex, 16).ok()
                } else if let Some(hex) = rest.strip_prefix('$') {
                    u16::from_str_radix(hex, 16).ok()
                } else {
                    rest.parse().ok()
                };
            addr.map(|a| Value::U8(self.bus.peek(a)))
        } else {
            match path {
                "system_clock" => Some(self.system_clock.into()),
                "frame_count" => Some(self.frame_count.into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
