//! iNES cartridge parser and loader.
//!
//! Parses the iNES file format (header, optional trainer, PRG ROM and CHR
//! ROM) and copies PRG ROM into a flat CPU address space. There is no mapper
//! support: PRG ROM lands at $8000 the way an NROM board presents it.

mod header;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use emu_core::Bus;
use thiserror::Error;

pub use header::{HEADER_SIZE, Header, INES_MAGIC, Mirroring, TvSystem};

/// PRG ROM bank size.
pub const PRG_BANK_SIZE: usize = 16384;

/// CHR ROM bank size.
pub const CHR_BANK_SIZE: usize = 8192;

/// Trainer size, present when flags 6 bit 2 is set.
pub const TRAINER_SIZE: usize = 512;

/// Where PRG ROM starts in the CPU address space.
pub const PRG_ROM_START: u16 = 0x8000;

/// Where a trainer is placed in the CPU address space.
pub const TRAINER_START: u16 = 0x7000;

/// Errors that can occur when loading or parsing an iNES file.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid iNES magic {0:02X?}, expected NES\\x1A")]
    InvalidMagic([u8; 4]),

    #[error("file truncated while reading {0}")]
    Truncated(&'static str),
}

/// A loaded iNES cartridge.
#[derive(Debug, Clone)]
pub struct Cartridge {
    header: Header,
    trainer: Option<Vec<u8>>,
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
}

/// `read_exact`, reporting a short read as truncation of `section`.
fn read_section(
    reader: &mut impl Read,
    buf: &mut [u8],
    section: &'static str,
) -> Result<(), CartridgeError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CartridgeError::Truncated(section)
        } else {
            CartridgeError::Io(e)
        }
    })
}

impl Cartridge {
    /// Load an iNES file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse an iNES image held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        Self::from_reader(data)
    }

    /// Parse an iNES image from any byte stream.
    ///
    /// Trailing bytes after CHR ROM are ignored.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, CartridgeError> {
        let mut raw = [0u8; HEADER_SIZE];
        read_section(&mut reader, &mut raw, "header")?;
        let header = Header::parse(&raw)?;

        let trainer = if header.has_trainer {
            let mut trainer = vec![0u8; TRAINER_SIZE];
            read_section(&mut reader, &mut trainer, "trainer")?;
            Some(trainer)
        } else {
            None
        };

        let mut prg_rom = vec![0u8; header.prg_rom_size()];
        read_section(&mut reader, &mut prg_rom, "PRG ROM")?;

        let mut chr_rom = vec![0u8; header.chr_rom_size()];
        read_section(&mut reader, &mut chr_rom, "CHR ROM")?;

        log::info!(
            "loaded cartridge: mapper {}, {}KB PRG, {}KB CHR",
            header.mapper_number,
            prg_rom.len() / 1024,
            chr_rom.len() / 1024
        );

        Ok(Self {
            header,
            trainer,
            prg_rom,
            chr_rom,
        })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn trainer(&self) -> Option<&[u8]> {
        self.trainer.as_deref()
    }

    #[must_use]
    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    #[must_use]
    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    /// Copy the cartridge into CPU memory.
    ///
    /// PRG ROM goes to $8000. A single 16KB bank is mirrored at $C000 so the
    /// interrupt vectors resolve. A trainer goes to $7000. Only the first
    /// 32KB of PRG ROM is reachable without a mapper.
    pub fn load_into(&self, bus: &mut impl Bus) {
        if self.header.mapper_number != 0 {
            log::warn!(
                "mapper {} not supported; loading PRG ROM as NROM",
                self.header.mapper_number
            );
        }

        if let Some(trainer) = &self.trainer {
            log::warn!("trainer present; placing it at ${TRAINER_START:04X}");
            write_block(bus, TRAINER_START, trainer);
        }

        let window = &self.prg_rom[..self.prg_rom.len().min(2 * PRG_BANK_SIZE)];
        if window.len() < self.prg_rom.len() {
            log::warn!(
                "PRG ROM is {}KB; only the first 32KB is mapped",
                self.prg_rom.len() / 1024
            );
        }

        write_block(bus, PRG_ROM_START, window);
        if window.len() == PRG_BANK_SIZE {
            write_block(bus, PRG_ROM_START + PRG_BANK_SIZE as u16, window);
        }
    }
}

fn write_block(bus: &mut impl Bus, start: u16, data: &[u8]) {
    let mut addr = start;
    for &byte in data {
        bus.write(addr, byte);
        addr = addr.wrapping_add(1);
    }
}
