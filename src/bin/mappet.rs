use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use mappet::{Map, merge, parse_map, parse_ops, serialize_map};

#[derive(Parser)]
#[command(
	name = "mappet",
	about = "Merge elevations from two tile map files into one output map",
	after_help = "Example: mappet MINE1.txt MINE3.txt flip.txt -c \"0: a2, 1:a1, 2: a0\""
)]
struct Cli {
	/// First source map (map a); supplies the output header and scripts
	map_a: PathBuf,
	/// Second source map (map b)
	map_b: PathBuf,
	/// Output map file
	output: PathBuf,
	/// Operation list, e.g. "0: a2, 1:a1, 2: a0" or "0: a0b1b2"
	#[arg(short = 'c', long = "command", value_name = "OPS")]
	command: String,
}

fn load_map(path: &Path) -> anyhow::Result<Map> {
	let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
	let map = parse_map(&text).with_context(|| format!("parsing {}", path.display()))?;
	Ok(map)
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let map_a = load_map(&cli.map_a)?;
	let map_b = load_map(&cli.map_b)?;
	let ops = parse_ops(&cli.command)?;

	// parse_map rejects maps without a map_name, so these always resolve.
	let map_a_name = map_a.map_name().unwrap_or_default().to_string();
	let map_b_name = map_b.map_name().unwrap_or_default().to_string();
	println!("Map A = {}", map_a_name);
	println!("Map B = {}", map_b_name);
	println!("----------------------");
	for op in &ops {
		println!("{}", op.description(&map_a_name, &map_b_name));
	}
	println!("----------------------");

	let output = merge(&map_a, &map_b, &ops)?;
	println!("Saving output to {}", cli.output.display());
	fs::write(&cli.output, serialize_map(&output))
		.with_context(|| format!("writing {}", cli.output.display()))?;
	println!("Done.");
	Ok(())
}
