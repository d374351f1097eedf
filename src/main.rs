use std::io;
use std::path::Path;
use std::process::exit;

use simplelog::{ Config, LevelFilter, TermLogger, TerminalMode };

use opcase::{ load_file, write_cases };

fn main() {
	better_panic::install();
	TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Stderr)
		.expect("logger setup");

	// diagnostics go to stderr; stdout carries only the emitted lines.
	let path = std::env::args().nth(1).unwrap_or_else(|| "Opcodes.json".into());

	let table = match load_file(Path::new(&path)) {
		Ok(table) => table,
		Err(e) => {
			log::error!("{}", e);
			exit(1);
		}
	};

	let stdout = io::stdout();

	if let Err(e) = write_cases(&mut stdout.lock(), &table) {
		log::error!("could not write test cases: {}", e);
		exit(1);
	}
}
