//! Derives decoder test cases from the opcode table.
//!
//! Each `unprefixed` table entry becomes one [`TestCase`]: an identifier for the
//! test, the encoded bytes to feed the decoder, the assembly text the decoder
//! should print back, and the instruction's duration in machine cycles. Operands
//! that stand for a value encoded in the instruction stream (`n8`, `n16`, `a8`,
//! `a16`, `e8`) are pinned to fixed easy-to-spot values, so the expected assembly
//! and the fed bytes always agree.

use std::collections::HashMap;
use std::fmt::{ Display, Formatter, Result as FmtResult };
use std::io;

use lazy_static::lazy_static;

use crate::table::{ OpcodeEntry, OpcodeTable };


// ------------------------------------------------------------------------------------------------
// Placeholder substitution
// ------------------------------------------------------------------------------------------------

/// What a placeholder operand turns into: the bytes appended to the encoding,
/// and the literal that replaces the operand name in the assembly text.
struct Subst {
	bytes: &'static [&'static str],
	value: &'static str,
}

lazy_static! {
	// 16-bit values are encoded low byte first.
	static ref SUBSTITUTIONS: HashMap<&'static str, Subst> = {
		let mut m = HashMap::new();
		m.insert("n16", Subst { bytes: &["0x34", "0x12"], value: "0x1234" });
		m.insert("a16", Subst { bytes: &["0x34", "0x12"], value: "0x1234" });
		m.insert("n8",  Subst { bytes: &["0x12"],         value: "0x12"   });
		m.insert("a8",  Subst { bytes: &["0x12"],         value: "0x12"   });
		m.insert("e8",  Subst { bytes: &["0x7B"],         value: "123"    });
		m
	};
}

// ------------------------------------------------------------------------------------------------
// TestCase
// ------------------------------------------------------------------------------------------------

/// One decoder test case, derived from one opcode table entry.
#[derive(Debug, PartialEq, Clone)]
pub struct TestCase {
	/// Lowercase underscore-joined identifier; never contains `$`.
	pub name:   String,
	/// The opcode key followed by any placeholder-contributed bytes, as `0xNN`
	/// literals in decode order.
	pub code:   Vec<String>,
	/// The assembly text the decoder is expected to produce.
	pub asm:    String,
	/// Base-path duration in machine cycles (t-cycles / 4). Conditional branch
	/// timings in the table are multiples of 4, so this is integral for every
	/// real entry, but the quotient is kept as computed.
	pub cycles: f64,
}

impl Display for TestCase {
	/// Renders the case as one line of a decoder test table, ready to paste:
	/// twelve spaces of indent, then `name: bytes => "asm", cycles,`.
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "            {}: {} => \"{}\", {},",
			self.name, self.code.join(", "), self.asm, self.cycles)
	}
}

// ------------------------------------------------------------------------------------------------
// Generation
// ------------------------------------------------------------------------------------------------

/// Derive the test case for a single table entry. `opcode` is the entry's key
/// in the table, used verbatim as the first encoded byte.
pub fn test_case(opcode: &str, entry: &OpcodeEntry) -> TestCase {
	let mut parts  = vec![entry.mnemonic.clone()];
	let mut code   = vec![opcode.to_string()];
	let mut tokens = Vec::with_capacity(entry.operands.len());

	for op in &entry.operands {
		let mut value = op.name.clone();

		if op.increment {
			value.push('+');
			parts.push(format!("{}_increment", op.name));
		} else if op.decrement {
			value.push('-');
			parts.push(format!("{}_decrement", op.name));
		} else {
			parts.push(op.name.clone());
		}

		// keyed on the original name; a substituted literal wins over any
		// increment/decrement suffix.
		if let Some(sub) = SUBSTITUTIONS.get(op.name.as_str()) {
			code.extend(sub.bytes.iter().map(|b| (*b).to_string()));
			value = sub.value.into();
		}

		tokens.push(if op.immediate { value } else { format!("({})", value) });
	}

	TestCase {
		name:   parts.join("_").to_lowercase().replace('$', ""),
		code,
		asm:    format!("{} {}", entry.mnemonic, tokens.join(", ")).trim().into(),
		cycles: f64::from(entry.cycles[0]) / 4.0,
	}
}

/// Iterator over the test cases for every `unprefixed` entry, in table order.
pub fn cases<'t>(table: &'t OpcodeTable) -> impl Iterator<Item = TestCase> + 't {
	table.unprefixed.iter().map(|(opcode, entry)| test_case(opcode, entry))
}

/// Write one test case line per `unprefixed` entry to `w`, in table order.
/// No header, no footer.
pub fn write_cases(w: &mut impl io::Write, table: &OpcodeTable) -> io::Result<()> {
	for case in cases(table) {
		writeln!(w, "{}", case)?;
	}

	Ok(())
}
