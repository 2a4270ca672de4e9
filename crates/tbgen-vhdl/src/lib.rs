//! VHDL test bench emission for nearest-point configurations.
//!
//! A [`TestBench`] renders one [`Configuration`] into a self-checking VHDL
//! file for the `project_reti_logiche` component:
//!
//! - RAM(0) holds the input mask as an 8-bit binary literal,
//! - RAM(1..=16) hold the candidate coordinates, X then Y per slot,
//! - RAM(17..=18) hold the main point,
//! - the stimulus process asserts RAM(19) against `EXPECTED_OUTPUT`.
//!
//! Rendering is deterministic and does no file handling; callers pick the
//! destination (see [`file_name`]).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::fmt;
use std::io;

use tbgen_core::{Configuration, SlotMask};

/// RAM address of the input mask.
pub const INPUT_MASK_ADDR: u32 = 0;
/// RAM address of the first candidate coordinate.
pub const POINTS_ADDR: u32 = 1;
/// RAM address of the main point's X coordinate (Y follows).
pub const MAIN_POINT_ADDR: u32 = 17;
/// RAM address the component writes its result to.
pub const OUTPUT_ADDR: u32 = 19;

/// Default architecture name.
pub const DEFAULT_ARCH_NAME: &str = "bhv";

/// File name for test `test_id`, e.g. `test3.vhd`.
#[must_use]
pub fn file_name(test_id: u32) -> String {
    format!("test{test_id}.vhd")
}

/// Whether `name` is a VHDL basic identifier: a letter, then letters, digits
/// and single underscores, not ending in an underscore.
#[must_use]
pub fn is_basic_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() || name.ends_with('_') || name.contains("__") {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One renderable test bench.
#[derive(Clone, Copy, Debug)]
pub struct TestBench<'a> {
    /// Case to encode.
    pub config: &'a Configuration,
    /// Numeric id used in the entity name and the final report.
    pub test_id: u32,
    /// Architecture name; must match the design under test.
    pub arch_name: &'a str,
}

impl<'a> TestBench<'a> {
    /// New test bench with the given architecture name.
    #[must_use]
    pub const fn new(config: &'a Configuration, test_id: u32, arch_name: &'a str) -> Self {
        Self {
            config,
            test_id,
            arch_name,
        }
    }

    /// Stream the VHDL text into `w`.
    pub fn write_to<W: io::Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{self}")?;
        w.flush()
    }

    /// Render into a `String`.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_ram(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.config;
        f.write_str("\ttype ram_type is array (65535 downto 0) of std_logic_vector(7 downto 0);\n")?;
        f.write_str("\tsignal RAM: ram_type := (\n")?;
        writeln!(
            f,
            "\t\t{INPUT_MASK_ADDR} => \"{}\",",
            bin8(cfg.input_mask())
        )?;

        let mut addr = POINTS_ADDR;
        for p in cfg.points() {
            ram_value(f, addr, p.x)?;
            ram_value(f, addr + 1, p.y)?;
            addr += 2;
        }

        let main = cfg.main_point();
        ram_value(f, MAIN_POINT_ADDR, main.x)?;
        ram_value(f, MAIN_POINT_ADDR + 1, main.y)?;

        f.write_str("\t\tothers => (others =>'0')\n")?;
        f.write_str("\t);\n\n")
    }
}

impl fmt::Display for TestBench<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.test_id;
        let arch = self.arch_name;

        f.write_str(PREAMBLE)?;
        writeln!(f, "entity autogen_test_bench_{id} is")?;
        writeln!(f, "end autogen_test_bench_{id};\n")?;
        writeln!(f, "architecture {arch} of autogen_test_bench_{id} is")?;
        f.write_str(SIGNALS)?;

        self.write_ram(f)?;

        writeln!(
            f,
            "\tconstant EXPECTED_OUTPUT : std_logic_vector(7 downto 0) := \"{}\";\n",
            bin8(self.config.output_mask())
        )?;

        f.write_str(COMPONENT)?;
        f.write_str(PROCESSES)?;
        writeln!(
            f,
            "\t\tassert RAM({OUTPUT_ADDR}) = EXPECTED_OUTPUT report \"TEST FALLITO\" severity failure;"
        )?;
        writeln!(f, "\t\tassert false report \"TEST #{id} OK\" severity failure;")?;
        f.write_str("\tend process test;\n\n")?;
        writeln!(f, "end {arch};")
    }
}

fn bin8(mask: SlotMask) -> String {
    format!("{mask:08b}")
}

fn ram_value(f: &mut fmt::Formatter<'_>, addr: u32, value: u8) -> fmt::Result {
    writeln!(f, "\t\t{addr} => std_logic_vector(to_unsigned({value}, 8)),")
}

const PREAMBLE: &str = "--
-- This is a randomly auto-generated test bench.
--

library ieee;
use ieee.std_logic_1164.all;
use ieee.numeric_std.all;
use ieee.std_logic_unsigned.all;

";

const SIGNALS: &str = "\tconstant c_CLOCK_PERIOD        : time := 100 ns;
\tsignal   tb_done               : std_logic;
\tsignal   mem_address           : std_logic_vector (15 downto 0) := (others => '0');
\tsignal   tb_rst                : std_logic := '0';
\tsignal   tb_start              : std_logic := '0';
\tsignal   tb_clk                : std_logic := '0';
\tsignal   mem_o_data,mem_i_data : std_logic_vector (7 downto 0);
\tsignal   enable_wire           : std_logic;
\tsignal   mem_we                : std_logic;

";

const COMPONENT: &str = "\tcomponent project_reti_logiche is
\t\tport (
\t\t\ti_clk         : in  std_logic;
\t\t\ti_start       : in  std_logic;
\t\t\ti_rst         : in  std_logic;
\t\t\ti_data        : in  std_logic_vector(7 downto 0);
\t\t\to_address     : out std_logic_vector(15 downto 0);
\t\t\to_done        : out std_logic;
\t\t\to_en          : out std_logic;
\t\t\to_we          : out std_logic;
\t\t\to_data        : out std_logic_vector (7 downto 0)
\t);
\tend component project_reti_logiche;

begin
UUT:
\tproject_reti_logiche port map (
\t\ti_clk          => tb_clk,
\t\ti_start        => tb_start,
\t\ti_rst          => tb_rst,
\t\ti_data         => mem_o_data,
\t\to_address      => mem_address,
\t\to_done         => tb_done,
\t\to_en           => enable_wire,
\t\to_we           => mem_we,
\t\to_data         => mem_i_data
\t);

";

const PROCESSES: &str = "p_CLK_GEN:
\tprocess is
\tbegin
\t\twait for c_CLOCK_PERIOD/2;
\t\ttb_clk <= not tb_clk;
\tend process p_CLK_GEN;
MEM:
\tprocess(tb_clk)
\tbegin
\t\tif tb_clk'event and tb_clk = '1' then
\t\t\tif enable_wire = '1' then
\t\t\t\tif mem_we = '1' then
\t\t\t\t\tRAM(conv_integer(mem_address)) <= mem_i_data;
\t\t\t\t\tmem_o_data                     <= mem_i_data after 2 ns;
\t\t\t\telse
\t\t\t\t\tmem_o_data <= RAM(conv_integer(mem_address)) after 2 ns;
\t\t\t\tend if;
\t\t\tend if;
\t\tend if;
\tend process;
test:
\tprocess is
\tbegin
\t\twait for 100 ns;
\t\twait for c_CLOCK_PERIOD;
\t\ttb_rst <= '1';
\t\twait for c_CLOCK_PERIOD;
\t\ttb_rst <= '0';
\t\twait for c_CLOCK_PERIOD;
\t\ttb_start <= '1';
\t\twait for c_CLOCK_PERIOD;
\t\twait until tb_done = '1';
\t\twait for c_CLOCK_PERIOD;
\t\ttb_start <= '0';
\t\twait until tb_done = '0';
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_test_id() {
        assert_eq!(file_name(1), "test1.vhd");
        assert_eq!(file_name(20), "test20.vhd");
    }

    #[test]
    fn identifiers() {
        assert!(is_basic_identifier("bhv"));
        assert!(is_basic_identifier("Behavioral_2"));
        assert!(!is_basic_identifier(""));
        assert!(!is_basic_identifier("2fast"));
        assert!(!is_basic_identifier("a__b"));
        assert!(!is_basic_identifier("trailing_"));
        assert!(!is_basic_identifier("with space"));
        assert!(!is_basic_identifier("\"quoted\""));
    }
}
