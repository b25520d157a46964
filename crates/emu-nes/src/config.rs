//! NES configuration.

/// Video region: determines CPU clock rate and frame timing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NesRegion {
    /// NTSC: 60 Hz, 262 scanlines, 1,789,773 Hz CPU.
    #[default]
    Ntsc,
    /// PAL: 50 Hz, 312 scanlines, 1,662,607 Hz CPU.
    Pal,
}

impl NesRegion {
    /// Total scanlines per frame (including pre-render and VBlank).
    #[must_use]
    pub const fn scanlines_per_frame(self) -> u16 {
        match self {
            Self::Ntsc => 262,
            Self::Pal => 312,
        }
    }

    /// CPU frequency in Hz.
    #[must_use]
    pub const fn cpu_hz(self) -> u32 {
        match self {
            Self::Ntsc => 1_789_773,
            Self::Pal => 1_662_607,
        }
    }

    /// Nominal frame rate in Hz.
    #[must_use]
    pub const fn frame_hz(self) -> u32 {
        match self {
            Self::Ntsc => 60,
            Self::Pal => 50,
        }
    }

    /// Whole CPU cycles in one video frame.
    ///
    /// A frame is 341 PPU dots per scanline. The PPU runs 3 dots per CPU
    /// cycle on NTSC and 3.2 on PAL.
    #[must_use]
    pub const fn cpu_cycles_per_frame(self) -> u64 {
        let dots = 341 * self.scanlines_per_frame() as u64;
        match self {
            Self::Ntsc => dots / 3,
            Self::Pal => dots * 5 / 16,
        }
    }
}

/// NES configuration.
pub struct NesConfig {
    /// iNES file contents.
    pub rom_data: Vec<u8>,
    /// Video region (NTSC or PAL). Defaults to NTSC.
    pub region: NesRegion,
}
