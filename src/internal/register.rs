//! ENC28J60 control register map
//!
//! The control register space is split into four banks of 32 addresses. The
//! last five addresses of every bank (EIE, EIR, ESTAT, ECON2, ECON1) are the
//! same physical registers in all banks; everything else is reachable only
//! after selecting its bank through ECON1.BSEL1:BSEL0.
//!
//! Registers come in two flavours on the wire. ETH registers return their data
//! in the byte right after the opcode. MAC and MII registers shift one dummy
//! byte out first, so a read of those needs one extra exchange.

/// Register bank selected through ECON1.BSEL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bank {
    /// Bank 0: buffer pointers and DMA
    Bank0 = 0,
    /// Bank 1: hash table, pattern match, receive filter, packet count
    Bank1 = 1,
    /// Bank 2: MAC and MII control
    Bank2 = 2,
    /// Bank 3: MAC address, MII status, revision
    Bank3 = 3,
}

impl Bank {
    /// Decode the bank from the low two bits of ECON1
    pub const fn from_bits(bits: u8) -> Self {
        match bits & econ1::BSEL_MASK {
            0 => Bank::Bank0,
            1 => Bank::Bank1,
            2 => Bank::Bank2,
            _ => Bank::Bank3,
        }
    }

    /// Value of ECON1.BSEL for this bank
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// How a register behaves on a read-control-register exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterKind {
    /// ETH register: data follows the opcode directly
    Eth,
    /// MAC/MII register: one dummy byte precedes the data
    MacMii,
}

/// An 8-bit control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    name: &'static str,
    // None = common register, valid in every bank
    bank: Option<Bank>,
    addr: u8,
    kind: RegisterKind,
}

impl Register {
    const fn common(name: &'static str, addr: u8) -> Self {
        Self {
            name,
            bank: None,
            addr,
            kind: RegisterKind::Eth,
        }
    }

    const fn eth(name: &'static str, bank: Bank, addr: u8) -> Self {
        Self {
            name,
            bank: Some(bank),
            addr,
            kind: RegisterKind::Eth,
        }
    }

    const fn mac(name: &'static str, bank: Bank, addr: u8) -> Self {
        Self {
            name,
            bank: Some(bank),
            addr,
            kind: RegisterKind::MacMii,
        }
    }

    /// Datasheet name of the register
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Bank the register lives in, `None` for common registers
    pub const fn bank(&self) -> Option<Bank> {
        self.bank
    }

    /// 5-bit address within the bank
    pub const fn addr(&self) -> u8 {
        self.addr
    }

    /// Register flavour
    pub const fn kind(&self) -> RegisterKind {
        self.kind
    }

    /// Whether the register is reachable from every bank
    pub const fn is_common(&self) -> bool {
        self.bank.is_none()
    }

    /// Whether a read must discard a dummy byte before the data byte
    pub const fn needs_dummy_byte(&self) -> bool {
        matches!(self.kind, RegisterKind::MacMii)
    }
}

/// A 16-bit value split across a low/high register pair in the same bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register16 {
    name: &'static str,
    low: Register,
    high: Register,
}

impl Register16 {
    const fn new(name: &'static str, low: Register, high: Register) -> Self {
        assert!(
            match (low.bank, high.bank) {
                (Some(l), Some(h)) => l as u8 == h as u8,
                (None, None) => true,
                _ => false,
            },
            "low and high registers must share a bank"
        );
        Self { name, low, high }
    }

    /// Datasheet name of the pair (without the L/H suffix)
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Bank of the pair
    pub const fn bank(&self) -> Option<Bank> {
        self.low.bank
    }

    /// Low byte register
    pub const fn low(&self) -> Register {
        self.low
    }

    /// High byte register
    pub const fn high(&self) -> Register {
        self.high
    }
}

// =============================================================================
// Common registers (all banks)
// =============================================================================

/// Ethernet interrupt enable
pub const EIE: Register = Register::common("EIE", 0x1B);
/// Ethernet interrupt request flags
pub const EIR: Register = Register::common("EIR", 0x1C);
/// Ethernet status
pub const ESTAT: Register = Register::common("ESTAT", 0x1D);
/// Ethernet control 2
pub const ECON2: Register = Register::common("ECON2", 0x1E);
/// Ethernet control 1
pub const ECON1: Register = Register::common("ECON1", 0x1F);

/// EIE bits
pub mod eie {
    /// Global interrupt enable
    pub const INTIE: u8 = 0x80;
    /// Receive packet pending interrupt enable
    pub const PKTIE: u8 = 0x40;
    /// DMA interrupt enable
    pub const DMAIE: u8 = 0x20;
    /// Link status change interrupt enable
    pub const LINKIE: u8 = 0x10;
    /// Transmit interrupt enable
    pub const TXIE: u8 = 0x08;
    /// Transmit error interrupt enable
    pub const TXERIE: u8 = 0x02;
    /// Receive error interrupt enable
    pub const RXERIE: u8 = 0x01;
}

/// EIR bits
pub mod eir {
    /// Receive packet pending
    pub const PKTIF: u8 = 0x40;
    /// DMA done
    pub const DMAIF: u8 = 0x20;
    /// Link change
    pub const LINKIF: u8 = 0x10;
    /// Transmit done
    pub const TXIF: u8 = 0x08;
    /// Transmit error
    pub const TXERIF: u8 = 0x02;
    /// Receive error
    pub const RXERIF: u8 = 0x01;
}

/// ESTAT bits
pub mod estat {
    /// INT pin asserted
    pub const INT: u8 = 0x80;
    /// Buffer error
    pub const BUFER: u8 = 0x40;
    /// Late collision
    pub const LATECOL: u8 = 0x10;
    /// Receive busy
    pub const RXBUSY: u8 = 0x04;
    /// Transmit abort
    pub const TXABRT: u8 = 0x02;
    /// Oscillator start-up timer expired
    pub const CLKRDY: u8 = 0x01;
}

/// ECON2 bits
pub mod econ2 {
    /// Automatic buffer pointer increment
    pub const AUTOINC: u8 = 0x80;
    /// Packet decrement (self-clearing)
    pub const PKTDEC: u8 = 0x40;
    /// Power save
    pub const PWRSV: u8 = 0x20;
    /// Voltage regulator power save
    pub const VRPS: u8 = 0x08;
}

/// ECON1 bits
pub mod econ1 {
    /// Transmit logic reset
    pub const TXRST: u8 = 0x80;
    /// Receive logic reset
    pub const RXRST: u8 = 0x40;
    /// DMA start/busy
    pub const DMAST: u8 = 0x20;
    /// DMA checksum enable
    pub const CSUMEN: u8 = 0x10;
    /// Transmit request to send
    pub const TXRTS: u8 = 0x08;
    /// Receive enable
    pub const RXEN: u8 = 0x04;
    /// Bank select bit 1
    pub const BSEL1: u8 = 0x02;
    /// Bank select bit 0
    pub const BSEL0: u8 = 0x01;
    /// Bank select field
    pub const BSEL_MASK: u8 = BSEL1 | BSEL0;
}

// =============================================================================
// Bank 0
// =============================================================================

/// Buffer read pointer, low byte
pub const ERDPTL: Register = Register::eth("ERDPTL", Bank::Bank0, 0x00);
/// Buffer read pointer, high byte
pub const ERDPTH: Register = Register::eth("ERDPTH", Bank::Bank0, 0x01);
/// Buffer write pointer, low byte
pub const EWRPTL: Register = Register::eth("EWRPTL", Bank::Bank0, 0x02);
/// Buffer write pointer, high byte
pub const EWRPTH: Register = Register::eth("EWRPTH", Bank::Bank0, 0x03);
/// Transmit start, low byte
pub const ETXSTL: Register = Register::eth("ETXSTL", Bank::Bank0, 0x04);
/// Transmit start, high byte
pub const ETXSTH: Register = Register::eth("ETXSTH", Bank::Bank0, 0x05);
/// Transmit end, low byte
pub const ETXNDL: Register = Register::eth("ETXNDL", Bank::Bank0, 0x06);
/// Transmit end, high byte
pub const ETXNDH: Register = Register::eth("ETXNDH", Bank::Bank0, 0x07);
/// Receive start, low byte
pub const ERXSTL: Register = Register::eth("ERXSTL", Bank::Bank0, 0x08);
/// Receive start, high byte
pub const ERXSTH: Register = Register::eth("ERXSTH", Bank::Bank0, 0x09);
/// Receive end, low byte
pub const ERXNDL: Register = Register::eth("ERXNDL", Bank::Bank0, 0x0A);
/// Receive end, high byte
pub const ERXNDH: Register = Register::eth("ERXNDH", Bank::Bank0, 0x0B);
/// Receive read pointer, low byte
pub const ERXRDPTL: Register = Register::eth("ERXRDPTL", Bank::Bank0, 0x0C);
/// Receive read pointer, high byte
pub const ERXRDPTH: Register = Register::eth("ERXRDPTH", Bank::Bank0, 0x0D);
/// Receive write pointer, low byte
pub const ERXWRPTL: Register = Register::eth("ERXWRPTL", Bank::Bank0, 0x0E);
/// Receive write pointer, high byte
pub const ERXWRPTH: Register = Register::eth("ERXWRPTH", Bank::Bank0, 0x0F);

/// Buffer read pointer
pub const ERDPT: Register16 = Register16::new("ERDPT", ERDPTL, ERDPTH);
/// Buffer write pointer
pub const EWRPT: Register16 = Register16::new("EWRPT", EWRPTL, EWRPTH);
/// Transmit start
pub const ETXST: Register16 = Register16::new("ETXST", ETXSTL, ETXSTH);
/// Transmit end
pub const ETXND: Register16 = Register16::new("ETXND", ETXNDL, ETXNDH);
/// Receive start
pub const ERXST: Register16 = Register16::new("ERXST", ERXSTL, ERXSTH);
/// Receive end
pub const ERXND: Register16 = Register16::new("ERXND", ERXNDL, ERXNDH);
/// Receive read pointer
pub const ERXRDPT: Register16 = Register16::new("ERXRDPT", ERXRDPTL, ERXRDPTH);
/// Receive write pointer
pub const ERXWRPT: Register16 = Register16::new("ERXWRPT", ERXWRPTL, ERXWRPTH);

// =============================================================================
// Bank 1
// =============================================================================

/// Receive filter control
pub const ERXFCON: Register = Register::eth("ERXFCON", Bank::Bank1, 0x18);
/// Ethernet packet count
pub const EPKTCNT: Register = Register::eth("EPKTCNT", Bank::Bank1, 0x19);

/// ERXFCON bits
pub mod erxfcon {
    /// Unicast filter enable
    pub const UCEN: u8 = 0x80;
    /// AND/OR filter select
    pub const ANDOR: u8 = 0x40;
    /// Post-filter CRC check enable
    pub const CRCEN: u8 = 0x20;
    /// Pattern match filter enable
    pub const PMEN: u8 = 0x10;
    /// Magic packet filter enable
    pub const MPEN: u8 = 0x08;
    /// Hash table filter enable
    pub const HTEN: u8 = 0x04;
    /// Multicast filter enable
    pub const MCEN: u8 = 0x02;
    /// Broadcast filter enable
    pub const BCEN: u8 = 0x01;
}

// =============================================================================
// Bank 2
// =============================================================================

/// MAC control 1
pub const MACON1: Register = Register::mac("MACON1", Bank::Bank2, 0x00);
/// MAC control 3
pub const MACON3: Register = Register::mac("MACON3", Bank::Bank2, 0x02);
/// MAC control 4
pub const MACON4: Register = Register::mac("MACON4", Bank::Bank2, 0x03);
/// Back-to-back inter-packet gap
pub const MABBIPG: Register = Register::mac("MABBIPG", Bank::Bank2, 0x04);
/// Non-back-to-back inter-packet gap, low byte
pub const MAIPGL: Register = Register::mac("MAIPGL", Bank::Bank2, 0x06);
/// Non-back-to-back inter-packet gap, high byte
pub const MAIPGH: Register = Register::mac("MAIPGH", Bank::Bank2, 0x07);
/// Maximum frame length, low byte
pub const MAMXFLL: Register = Register::mac("MAMXFLL", Bank::Bank2, 0x0A);
/// Maximum frame length, high byte
pub const MAMXFLH: Register = Register::mac("MAMXFLH", Bank::Bank2, 0x0B);
/// MII command
pub const MICMD: Register = Register::mac("MICMD", Bank::Bank2, 0x12);
/// MII register address
pub const MIREGADR: Register = Register::mac("MIREGADR", Bank::Bank2, 0x14);
/// MII write data, low byte
pub const MIWRL: Register = Register::mac("MIWRL", Bank::Bank2, 0x16);
/// MII write data, high byte (writing it starts the PHY write)
pub const MIWRH: Register = Register::mac("MIWRH", Bank::Bank2, 0x17);
/// MII read data, low byte
pub const MIRDL: Register = Register::mac("MIRDL", Bank::Bank2, 0x18);
/// MII read data, high byte
pub const MIRDH: Register = Register::mac("MIRDH", Bank::Bank2, 0x19);

/// Maximum frame length
pub const MAMXFL: Register16 = Register16::new("MAMXFL", MAMXFLL, MAMXFLH);
/// MII write data
pub const MIWR: Register16 = Register16::new("MIWR", MIWRL, MIWRH);
/// MII read data
pub const MIRD: Register16 = Register16::new("MIRD", MIRDL, MIRDH);

/// MACON1 bits
pub mod macon1 {
    /// Pause control frame transmission enable
    pub const TXPAUS: u8 = 0x08;
    /// Pause control frame reception enable
    pub const RXPAUS: u8 = 0x04;
    /// Pass all received frames (control frames reach the buffer)
    pub const PASSALL: u8 = 0x02;
    /// MAC receive enable
    pub const MARXEN: u8 = 0x01;
}

/// MACON3 bits
pub mod macon3 {
    /// Automatic pad and CRC configuration, bit 2
    pub const PADCFG2: u8 = 0x80;
    /// Automatic pad and CRC configuration, bit 1
    pub const PADCFG1: u8 = 0x40;
    /// Automatic pad and CRC configuration, bit 0 (pad to 60 bytes)
    pub const PADCFG0: u8 = 0x20;
    /// Transmit CRC enable
    pub const TXCRCEN: u8 = 0x10;
    /// Proprietary header enable
    pub const PHDREN: u8 = 0x08;
    /// Huge frame enable
    pub const HFRMEN: u8 = 0x04;
    /// Frame length checking enable
    pub const FRMLNEN: u8 = 0x02;
    /// MAC full-duplex enable
    pub const FULDPX: u8 = 0x01;
}

/// MACON4 bits
pub mod macon4 {
    /// Defer transmission (half duplex only)
    pub const DEFER: u8 = 0x40;
    /// No backoff during back-pressure
    pub const BPEN: u8 = 0x20;
    /// No backoff
    pub const NOBKOFF: u8 = 0x10;
}

/// MICMD bits
pub mod micmd {
    /// MII scan enable
    pub const MIISCAN: u8 = 0x02;
    /// MII read enable
    pub const MIIRD: u8 = 0x01;
}

// =============================================================================
// Bank 3
// =============================================================================

/// MAC address byte 5
pub const MAADR5: Register = Register::mac("MAADR5", Bank::Bank3, 0x00);
/// MAC address byte 6
pub const MAADR6: Register = Register::mac("MAADR6", Bank::Bank3, 0x01);
/// MAC address byte 3
pub const MAADR3: Register = Register::mac("MAADR3", Bank::Bank3, 0x02);
/// MAC address byte 4
pub const MAADR4: Register = Register::mac("MAADR4", Bank::Bank3, 0x03);
/// MAC address byte 1 (first on the wire)
pub const MAADR1: Register = Register::mac("MAADR1", Bank::Bank3, 0x04);
/// MAC address byte 2
pub const MAADR2: Register = Register::mac("MAADR2", Bank::Bank3, 0x05);
/// MII status
pub const MISTAT: Register = Register::mac("MISTAT", Bank::Bank3, 0x0A);
/// Silicon revision
pub const EREVID: Register = Register::eth("EREVID", Bank::Bank3, 0x12);

/// MAC address registers in wire order (MAADR1 first)
pub const MAADR: [Register; 6] = [MAADR1, MAADR2, MAADR3, MAADR4, MAADR5, MAADR6];

/// MISTAT bits
pub mod mistat {
    /// Invalid read data
    pub const NVALID: u8 = 0x04;
    /// MII scan in progress
    pub const SCAN: u8 = 0x02;
    /// MII management busy
    pub const BUSY: u8 = 0x01;
}

// =============================================================================
// Opcodes
// =============================================================================

/// SPI instruction opcodes (upper three bits of the first byte)
pub mod opcode {
    /// Read control register
    pub const RCR: u8 = 0x00;
    /// Read buffer memory
    pub const RBM: u8 = 0x20;
    /// Write control register
    pub const WCR: u8 = 0x40;
    /// Write buffer memory
    pub const WBM: u8 = 0x60;
    /// Bit field set
    pub const BFS: u8 = 0x80;
    /// Bit field clear
    pub const BFC: u8 = 0xA0;
    /// System reset command
    pub const SRC: u8 = 0xE0;

    /// Constant argument for buffer memory and reset commands
    pub const BUFFER_ARG: u8 = 0x1A;
    /// Constant argument for the reset command
    pub const RESET_ARG: u8 = 0x1F;
    /// Address field of the first byte
    pub const ARG_MASK: u8 = 0x1F;
    /// Opcode field of the first byte
    pub const OPCODE_MASK: u8 = 0xE0;

    /// Filler byte clocked out while reading
    pub const DUMMY: u8 = 0x00;
}
