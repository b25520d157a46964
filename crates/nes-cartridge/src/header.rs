//! The 16-byte iNES header.

use std::fmt;

use crate::{CHR_BANK_SIZE, CartridgeError, PRG_BANK_SIZE};

/// Size of the iNES header in bytes.
pub const HEADER_SIZE: usize = 16;

/// "NES" followed by MS-DOS end-of-file.
pub const INES_MAGIC: [u8; 4] = *b"NES\x1A";

/// Nametable mirroring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// TV system requested by byte 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvSystem {
    Ntsc,
    Pal,
}

/// Parsed iNES file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub prg_rom_banks: u8,
    pub chr_rom_banks: u8,
    pub mapper_number: u8,
    pub mirroring: Mirroring,
    pub has_battery: bool,
    pub has_trainer: bool,
    /// Flags 6 bit 3: cartridge supplies its own nametable VRAM.
    pub four_screen: bool,
    pub vs_unisystem: bool,
    pub playchoice_10: bool,
    /// Flags 7 bits 2-3 are `0b10`; bytes 8-15 use the NES 2.0 layout.
    pub nes2: bool,
    /// PRG-RAM size in 8KB units; 0 means 8KB for compatibility.
    pub prg_ram_size: u8,
    pub tv_system: TvSystem,
    /// Byte 10, unofficial and rarely set.
    pub tv_system_ext: u8,
}

impl Header {
    /// Decode a raw header, rejecting files without the iNES magic.
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Result<Self, CartridgeError> {
        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != INES_MAGIC {
            return Err(CartridgeError::InvalidMagic(magic));
        }

        let flags6 = bytes[6];
        let flags7 = bytes[7];

        let four_screen = flags6 & 0x08 != 0;
        let mirroring = if four_screen {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(Self {
            prg_rom_banks: bytes[4],
            chr_rom_banks: bytes[5],
            mapper_number: (flags7 & 0xF0) | (flags6 >> 4),
            mirroring,
            has_battery: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
            four_screen,
            vs_unisystem: flags7 & 0x01 != 0,
            playchoice_10: flags7 & 0x02 != 0,
            nes2: flags7 & 0x0C == 0x08,
            prg_ram_size: bytes[8],
            tv_system: if bytes[9] & 0x01 != 0 {
                TvSystem::Pal
            } else {
                TvSystem::Ntsc
            },
            tv_system_ext: bytes[10],
        })
    }

    /// PRG ROM size in bytes.
    #[must_use]
    pub fn prg_rom_size(&self) -> usize {
        usize::from(self.prg_rom_banks) * PRG_BANK_SIZE
    }

    /// CHR ROM size in bytes. Zero means the board carries CHR RAM.
    #[must_use]
    pub fn chr_rom_size(&self) -> usize {
        usize::from(self.chr_rom_banks) * CHR_BANK_SIZE
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NES cartridge")?;
        writeln!(
            f,
            "  PRG ROM: {} x 16KB ({} bytes)",
            self.prg_rom_banks,
            self.prg_rom_size()
        )?;
        writeln!(
            f,
            "  CHR ROM: {} x 8KB ({} bytes)",
            self.chr_rom_banks,
            self.chr_rom_size()
        )?;
        writeln!(f, "  Mirroring: {:?}", self.mirroring)?;
        writeln!(f, "  Battery: {}", self.has_battery)?;
        writeln!(f, "  Trainer: {}", self.has_trainer)?;
        writeln!(f, "  Four-screen: {}", self.four_screen)?;
        writeln!(f, "  VS Unisystem: {}", self.vs_unisystem)?;
        writeln!(f, "  PlayChoice-10: {}", self.playchoice_10)?;
        writeln!(f, "  NES 2.0: {}", self.nes2)?;
        writeln!(f, "  PRG RAM: {} x 8KB", self.prg_ram_size.max(1))?;
        writeln!(
            f,
            "  TV system: {:?} (byte 10: ${:02X})",
            self.tv_system, self.tv_system_ext
        )?;
        write!(f, "  Mapper: {}", self.mapper_number)
    }
}
