//! Memory and I/O bus interface.

/// Size of the 16-bit address space.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding and routing to the appropriate device; a CPU
/// must never assume it owns any particular address range.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Reinitialize bus-side state when the CPU is reset.
    ///
    /// Memory contents are not part of that state: ROM loaded before reset
    /// must still be readable when the CPU fetches its reset vector.
    fn reset(&mut self) {}
}

/// Flat 64KB RAM bus.
///
/// Every address maps straight onto one byte of backing memory. There is no
/// mirroring and no peripheral routing, and reads never have side effects.
pub struct SimpleBus {
    memory: Box<[u8]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// Create a bus with all 65536 bytes zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: vec![0; ADDRESS_SPACE].into_boxed_slice(),
        }
    }

    /// Copy `data` into memory starting at `address`.
    ///
    /// Bytes that would run past $FFFF wrap around to $0000.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.memory[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read a byte without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    /// Read a little-endian word without going through the `Bus` trait.
    #[must_use]
    pub fn peek_word(&self, address: u16) -> u16 {
        u16::from_le_bytes([self.peek(address), self.peek(address.wrapping_add(1))])
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[usize::from(address)] = value;
    }
}
