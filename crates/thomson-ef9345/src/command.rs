//! Command engine.
//!
//! R0 holds the command: the high nibble selects the operation, the low
//! nibble carries its parameters.
//!
//! | Bit | Meaning (when the command uses it)            |
//! |-----|-----------------------------------------------|
//! | 3   | read (1) / write (0)                          |
//! | 2   | auxiliary pointer (1) / main pointer (0)      |
//! | 1   | sub-operation selector                        |
//! | 0   | auto-increment                                |
//!
//! Only KRG, OCT, IND and INY are emulated. Every other documented command
//! is decoded and reported as not implemented.

use std::fmt;

use log::{debug, trace, warn};

use crate::memory::VideoMemory;
use crate::registers::{DisplayConfig, Registers, R0, R1, R2};
use crate::transcode::{
    aux_pointer_address, increment_ap_x, increment_mp_x, increment_mp_y, memory_pointer_address,
};

/// Distance between the two VRAM planes written by KRG (and read as A'/B'
/// by the short character code).
pub const PLANE_OFFSET: u16 = 0x0400;

const PARAM_READ: u8 = 0x08;
const PARAM_AUX: u8 = 0x04;
const PARAM_INCREMENT: u8 = 0x01;

/// A decoded R0 command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Character read/write, 40 columns, full attributes.
    Krf { read: bool, increment: bool },
    /// Character read/write, 40 columns, short code (two planes).
    Krg { read: bool, increment: bool },
    /// Clear page, 24 bits.
    Clf,
    /// Clear page, 16 bits.
    Clg,
    /// Character read/write, 80 columns, extended.
    Kre,
    /// Character read/write, variable code.
    Krv,
    /// Single byte read/write.
    Oct { read: bool, aux: bool, increment: bool },
    /// Character read/write, 80 columns, compressed.
    Krc,
    /// Character read/write, 80 columns, long code.
    Krl,
    /// Expansion.
    Exp,
    /// Compression.
    Cmp,
    /// Indirect register access through R1.
    Ind { read: bool, register: usize },
    /// Vertical sync mask set.
    Vsm,
    /// Vertical sync mask reset.
    Vrm,
    Nop,
    /// Increment the main pointer row.
    Iny,
    /// Block move, main to auxiliary.
    Mvb,
    /// Double block move.
    Mvd,
    /// Triple block move.
    Mvt,
}

impl Command {
    /// Decode R0.
    ///
    /// # Panics
    ///
    /// Panics on command codes 0xA and 0xC, which the chip does not define.
    #[must_use]
    pub fn decode(r0: u8) -> Self {
        let param = r0 & 0x0F;
        let read = param & PARAM_READ != 0;
        let aux = param & PARAM_AUX != 0;
        let increment = param & PARAM_INCREMENT != 0;
        match r0 >> 4 {
            0x0 => match param & 0x06 {
                0x00 => Command::Krf { read, increment },
                0x02 => Command::Krg { read, increment },
                0x04 => Command::Clf,
                _ => Command::Clg,
            },
            0x1 => Command::Kre,
            0x2 => Command::Krv,
            0x3 => Command::Oct {
                read,
                aux,
                increment,
            },
            0x4 => Command::Krc,
            0x5 => Command::Krl,
            0x6 => Command::Exp,
            0x7 => Command::Cmp,
            0x8 => Command::Ind {
                read,
                register: usize::from(param & 0x07),
            },
            0x9 => {
                if read {
                    Command::Vsm
                } else if aux {
                    Command::Vrm
                } else {
                    Command::Nop
                }
            }
            0xB => Command::Iny,
            0xD => Command::Mvb,
            0xE => Command::Mvd,
            0xF => Command::Mvt,
            code => panic!("EF9345: unknown command code {code:#X} (R0 = {r0:#04X})"),
        }
    }

    /// Mnemonic from the datasheet.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Command::Krf { .. } => "KRF",
            Command::Krg { .. } => "KRG",
            Command::Clf => "CLF",
            Command::Clg => "CLG",
            Command::Kre => "KRE",
            Command::Krv => "KRV",
            Command::Oct { .. } => "OCT",
            Command::Krc => "KRC",
            Command::Krl => "KRL",
            Command::Exp => "EXP",
            Command::Cmp => "CMP",
            Command::Ind { .. } => "IND",
            Command::Vsm => "VSM",
            Command::Vrm => "VRM",
            Command::Nop => "NOP",
            Command::Iny => "INY",
            Command::Mvb => "MVB",
            Command::Mvd => "MVD",
            Command::Mvt => "MVT",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Executed without touching VRAM.
    Executed,
    /// Executed; the last VRAM address accessed.
    MemoryAccess(u16),
    /// Recognised but not emulated. Nothing changed.
    NotImplemented(Command),
}

/// Run the command held in R0.
///
/// # Panics
///
/// Panics if R0 holds an undefined command code, or if a pointer column
/// is 40 or more.
pub fn execute(
    regs: &mut Registers,
    display: &mut DisplayConfig,
    vram: &mut VideoMemory,
) -> CommandOutcome {
    let command = Command::decode(regs.direct[R0]);
    trace!("EF9345: {command} (R0 = {:#04X})", regs.direct[R0]);

    match command {
        Command::Krg { read, increment } => {
            let address = memory_pointer_address(regs);
            let plane_b = address.wrapping_add(PLANE_OFFSET);
            if read {
                regs.direct[R1] = vram.read(address);
                regs.direct[R2] = vram.read(plane_b);
            } else {
                vram.write(address, regs.direct[R1]);
                vram.write(plane_b, regs.direct[R2]);
            }
            if increment {
                increment_mp_x(regs, false);
            }
            CommandOutcome::MemoryAccess(plane_b)
        }
        Command::Oct {
            read,
            aux,
            increment,
        } => {
            let address = if aux {
                aux_pointer_address(regs)
            } else {
                memory_pointer_address(regs)
            };
            if read {
                regs.direct[R1] = vram.read(address);
            } else {
                vram.write(address, regs.direct[R1]);
            }
            if increment {
                if aux {
                    increment_ap_x(regs);
                } else {
                    increment_mp_x(regs, true);
                }
            }
            CommandOutcome::MemoryAccess(address)
        }
        Command::Ind { read, register } => {
            if read {
                regs.direct[R1] = regs.indirect[register];
            } else {
                regs.indirect[register] = regs.direct[R1];
            }
            let updated = DisplayConfig::from_registers(regs);
            if updated != *display {
                debug!("EF9345: display configuration {updated:?}");
            }
            *display = updated;
            CommandOutcome::Executed
        }
        Command::Iny => {
            increment_mp_y(regs);
            CommandOutcome::Executed
        }
        Command::Krf { .. }
        | Command::Clf
        | Command::Clg
        | Command::Kre
        | Command::Krv
        | Command::Krc
        | Command::Krl
        | Command::Exp
        | Command::Cmp
        | Command::Vsm
        | Command::Vrm
        | Command::Nop
        | Command::Mvb
        | Command::Mvd
        | Command::Mvt => {
            warn!(
                "EF9345: command {command} not implemented (R0 = {:#04X})",
                regs.direct[R0]
            );
            CommandOutcome::NotImplemented(command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{PAT, R4, R5, R6, R7, ROR};
    use crate::row::CharCode;

    fn run(regs: &mut Registers, vram: &mut VideoMemory, r0: u8) -> CommandOutcome {
        let mut display = DisplayConfig::from_registers(regs);
        regs.direct[R0] = r0;
        execute(regs, &mut display, vram)
    }

    #[test]
    fn decode_groups() {
        assert_eq!(Command::decode(0x02), Command::Krg { read: false, increment: false });
        assert_eq!(Command::decode(0x0B), Command::Krg { read: true, increment: true });
        assert_eq!(Command::decode(0x01), Command::Krf { read: false, increment: true });
        assert_eq!(Command::decode(0x05), Command::Clf);
        assert_eq!(Command::decode(0x07), Command::Clg);
        assert_eq!(
            Command::decode(0x35),
            Command::Oct { read: false, aux: true, increment: true }
        );
        assert_eq!(Command::decode(0x89), Command::Ind { read: true, register: 1 });
        assert_eq!(Command::decode(0x91), Command::Nop);
        assert_eq!(Command::decode(0x95), Command::Vrm);
        assert_eq!(Command::decode(0x99), Command::Vsm);
        assert_eq!(Command::decode(0xB0), Command::Iny);
    }

    #[test]
    #[should_panic(expected = "unknown command code 0xA")]
    fn undefined_code_a_fails_fast() {
        let _ = Command::decode(0xA0);
    }

    #[test]
    #[should_panic(expected = "unknown command code 0xC")]
    fn undefined_code_c_fails_fast() {
        let _ = Command::decode(0xC5);
    }

    #[test]
    fn krg_writes_two_planes() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        regs.direct[R1] = 0x41;
        regs.direct[R2] = 0x07;
        regs.direct[R6] = 8;
        regs.direct[R7] = 3;
        let outcome = run(&mut regs, &mut vram, 0x03);
        assert_eq!(vram.read(0x103), 0x41);
        assert_eq!(vram.read(0x503), 0x07);
        assert_eq!(outcome, CommandOutcome::MemoryAccess(0x503));
        assert_eq!(regs.direct[R7], 4);
    }

    #[test]
    fn krg_increment_never_wraps_row() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        regs.direct[R6] = 12;
        regs.direct[R7] = 39;
        run(&mut regs, &mut vram, 0x03);
        assert_eq!(regs.direct[R7], 0);
        assert_eq!(regs.direct[R6], 12);
    }

    #[test]
    fn krg_read_back() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        regs.direct[R6] = 20;
        regs.direct[R7] = 33;
        regs.direct[R1] = 0xC3;
        regs.direct[R2] = 0x81;
        run(&mut regs, &mut vram, 0x02);
        regs.direct[R1] = 0;
        regs.direct[R2] = 0;
        run(&mut regs, &mut vram, 0x0A);
        assert_eq!((regs.direct[R1], regs.direct[R2]), (0xC3, 0x81));
    }

    #[test]
    fn oct_main_pointer_wraps_rows() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        regs.direct[R6] = 31;
        regs.direct[R7] = 39;
        regs.direct[R1] = 0x99;
        run(&mut regs, &mut vram, 0x31);
        assert_eq!(regs.mp_x(), 0);
        assert_eq!(regs.mp_y(), 8);
    }

    #[test]
    fn oct_aux_pointer_reads_and_increments_r5() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        regs.direct[R4] = 9;
        regs.direct[R5] = 0x80 | 39;
        vram.write(aux_pointer_address(&regs), 0x5E);
        run(&mut regs, &mut vram, 0x3D);
        assert_eq!(regs.direct[R1], 0x5E);
        assert_eq!(regs.direct[R5], 0x80);
        assert_eq!(regs.direct[R4], 9);
    }

    #[test]
    fn ind_write_recomputes_display() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        let mut display = DisplayConfig::default();
        regs.direct[R1] = 0x80;
        regs.direct[R0] = 0x83;
        execute(&mut regs, &mut display, &mut vram);
        assert_eq!(regs.indirect[PAT], 0x80);
        assert_eq!(display.char_code(), Some(CharCode::Short40));

        regs.direct[R1] = 0x2C;
        regs.direct[R0] = 0x87;
        execute(&mut regs, &mut display, &mut vram);
        assert_eq!(regs.indirect[ROR], 0x2C);
        assert_eq!(display.block_origin, 2);
        assert_eq!(display.origin_row, 12);
    }

    #[test]
    fn ind_read() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        regs.indirect[4] = 0x77;
        run(&mut regs, &mut vram, 0x8C);
        assert_eq!(regs.direct[R1], 0x77);
    }

    #[test]
    fn iny_wraps() {
        let mut regs = Registers::default();
        let mut vram = VideoMemory::new();
        regs.direct[R6] = 0x80 | 31;
        regs.direct[R7] = 17;
        run(&mut regs, &mut vram, 0xB0);
        assert_eq!(regs.direct[R6], 0x80 | 8);
        assert_eq!(regs.direct[R7], 17);
    }

    #[test]
    fn unimplemented_commands_change_nothing() {
        for r0 in [
            0x00, 0x05, 0x07, 0x10, 0x20, 0x40, 0x50, 0x60, 0x70, 0x91, 0x95, 0x99, 0xD0, 0xE0,
            0xF0,
        ] {
            let mut regs = Registers::default();
            let mut vram = VideoMemory::new();
            regs.direct[R1] = 0x55;
            let outcome = run(&mut regs, &mut vram, r0);
            assert!(
                matches!(outcome, CommandOutcome::NotImplemented(_)),
                "R0 = {r0:#04X} gave {outcome:?}"
            );
            assert_eq!(regs.direct[1..], [0x55, 0, 0, 0, 0, 0, 0]);
            assert!(vram.as_slice().iter().all(|&b| b == 0));
        }
    }
}
