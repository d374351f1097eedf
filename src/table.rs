//! The SM83 opcode table, as published in the community's `Opcodes.json` document.
//!
//! The document has two sub-tables: `unprefixed` for the plain one-byte opcodes,
//! and `cbprefixed` for the `0xCB`-prefixed bit manipulation instructions. Each
//! sub-table maps a two-hex-digit opcode key (`"0x00"` .. `"0xFF"`) to a record
//! giving the instruction's mnemonic, operand shapes, and timing in t-cycles.
//! The keys are fixed-width uppercase hex, so `BTreeMap` iteration visits them
//! in the document's ascending opcode order.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use parse_display::Display;
use serde::Deserialize;


// ------------------------------------------------------------------------------------------------
// Operand
// ------------------------------------------------------------------------------------------------

/// One operand of an instruction, in assembly-syntax order.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct Operand {
	/// Operand class: a register name (`A`, `HL`, ...), a condition code (`NZ`, ...),
	/// an RST target (`$38`), or a placeholder for an encoded value (`n8`, `n16`,
	/// `a8`, `a16`, `e8`).
	pub name:      String,
	/// Used by value when true; a memory location to dereference when false.
	pub immediate: bool,
	/// Post-increment addressing, as in `LD (HL+), A`.
	#[serde(default)]
	pub increment: bool,
	/// Post-decrement addressing, as in `LD (HL-), A`.
	#[serde(default)]
	pub decrement: bool,
}

// ------------------------------------------------------------------------------------------------
// OpcodeEntry
// ------------------------------------------------------------------------------------------------

/// Decode metadata for a single opcode.
///
/// `cycles[0]` is the duration of the base (non-branching) execution path, in
/// t-cycles; conditional instructions list the branch-taken duration after it.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct OpcodeEntry {
	pub mnemonic: String,
	pub operands: Vec<Operand>,
	pub cycles:   Vec<u32>,
}

// ------------------------------------------------------------------------------------------------
// OpcodeTable
// ------------------------------------------------------------------------------------------------

/// The whole opcode table document.
///
/// Only `unprefixed` is consumed by the generator; `cbprefixed` is part of the
/// document and parses along with it.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct OpcodeTable {
	pub unprefixed: BTreeMap<String, OpcodeEntry>,
	pub cbprefixed: BTreeMap<String, OpcodeEntry>,
}

// ------------------------------------------------------------------------------------------------
// TableErrorKind
// ------------------------------------------------------------------------------------------------

/// The kinds of table loading errors.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
pub enum TableErrorKind {
	/// The document could not be read at all.
	#[display("could not read table: {msg}")]
	Io { msg: String },

	/// The document is not a well-formed opcode table.
	#[display("malformed table: {msg}")]
	Parse { msg: String },
}

// ------------------------------------------------------------------------------------------------
// TableError
// ------------------------------------------------------------------------------------------------

/// The table loading error type.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
#[display("opcode table error: {kind}")]
pub struct TableError {
	kind: TableErrorKind,
}

impl Error for TableError {}

impl TableError {
	/// Shorthand constructors.
	pub fn io<T>(msg: String) -> TableResult<T> {
		Err(Self { kind: TableErrorKind::Io { msg } })
	}

	/// Ditto.
	pub fn parse<T>(msg: String) -> TableResult<T> {
		Err(Self { kind: TableErrorKind::Parse { msg } })
	}
}

// ------------------------------------------------------------------------------------------------
// TableResult
// ------------------------------------------------------------------------------------------------

/// Alias for a `Result` with a `TableError` as its error type.
pub type TableResult<T> = Result<T, TableError>;

// ------------------------------------------------------------------------------------------------
// Loading
// ------------------------------------------------------------------------------------------------

/// Load the opcode table from a JSON document on disk.
pub fn load_file(path: &Path) -> TableResult<OpcodeTable> {
	match fs::read_to_string(path) {
		Ok(text) => parse_str(&text),
		Err(e)   => TableError::io(format!("{}: {}", path.display(), e)),
	}
}

/// Parse the opcode table from JSON text. Fields not in the data model
/// (`flags`, `bytes`, and friends) are ignored.
pub fn parse_str(text: &str) -> TableResult<OpcodeTable> {
	match serde_json::from_str::<OpcodeTable>(text) {
		Ok(table) => {
			log::debug!("opcode table loaded: {} unprefixed, {} prefixed entries",
				table.unprefixed.len(), table.cbprefixed.len());
			Ok(table)
		}

		Err(e) => TableError::parse(e.to_string()),
	}
}
