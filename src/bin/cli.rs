#![cfg(feature = "cli")]

use ansi_term::Colour;
use bgpsim_store::config::Config;
use bgpsim_store::{Ipv4Prefix, RadixTrie};
use clap::Parser;
use log::{info, warn};

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const HISTORY_FILE: &str = "/tmp/bgpsim-store-history.txt";

/// Interactive inspection of an IPv4 routing table.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file with log settings and static routes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file with `address,len,value` rows (and a header line) to load
    /// into the table.
    csv: Option<PathBuf>,
}

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.log.level_filter());
    if !config.log.output.is_empty() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log.output)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

fn load_csv(
    path: &Path,
    table: &mut RadixTrie<String>,
) -> Result<usize, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut count = 0;
    for result in rdr.records() {
        let record = result?;
        let (Some(addr), Some(len), Some(value)) =
            (record.get(0), record.get(1), record.get(2))
        else {
            warn!("skipping short csv record {:?}", record);
            continue;
        };
        let pfx = Ipv4Prefix::new(addr.trim().parse()?, len.trim().parse()?)?;
        table.insert(pfx, value.trim().to_string());
        count += 1;
    }
    Ok(count)
}

fn print_help() {
    println!("a.b.c.d               longest prefix match");
    println!("+ a.b.c.d/len value   insert a prefix");
    println!("- a.b.c.d/len         delete a prefix");
    println!("p                     number of prefixes");
    println!("d                     dump the table");
    println!("s                     table statistics");
}

fn run_command(table: &mut RadixTrie<String>, line: &str) {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return;
    };

    match cmd {
        "+" => {
            let (Some(pfx), Some(value)) = (words.next(), words.next()) else {
                println!("Error: usage: + <prefix> <value>");
                return;
            };
            match pfx.parse::<Ipv4Prefix>() {
                Ok(pfx) => {
                    if let Some(old) = table.insert(pfx, value.to_string()) {
                        println!("replaced {}: {}", pfx, old);
                    }
                }
                Err(err) => println!("{}", Colour::Red.paint(err.to_string())),
            }
        }
        "-" => {
            let Some(pfx) = words.next() else {
                println!("Error: usage: - <prefix>");
                return;
            };
            match pfx.parse::<Ipv4Prefix>() {
                Ok(pfx) => match table.remove(pfx) {
                    Some(old) => println!("removed {}: {}", pfx, old),
                    None => println!(
                        "{}",
                        Colour::Yellow.paint(format!("{} not found", pfx))
                    ),
                },
                Err(err) => println!("{}", Colour::Red.paint(err.to_string())),
            }
        }
        "p" => println!("prefixes :\t{}", table.len()),
        "d" => println!("{}", table.dump()),
        "s" => println!("{}", table.stats()),
        "h" | "?" => print_help(),
        addr => match addr.parse::<Ipv4Addr>() {
            Ok(addr) => println!("{}", table.query(addr)),
            Err(err) => println!(
                "{}",
                Colour::Red.paint(format!(
                    "Error: Can't parse address {:?}: {}",
                    addr, err
                ))
            ),
        },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_logging(&config)?;

    let mut table: RadixTrie<String> = RadixTrie::new();
    for (pfx, route) in config.route_table()?.iter() {
        table.insert(pfx, route.to_string());
    }

    if let Some(path) = &args.csv {
        let start = std::time::Instant::now();
        let count = load_csv(path, &mut table)?;
        info!(
            "loaded {} prefixes from {} in {} msecs",
            count,
            path.display(),
            start.elapsed().as_millis()
        );
    }
    println!("table holds {} prefixes, h for help", table.len());

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_FILE).is_err() {
        println!("No previous history.");
    }
    loop {
        match rl.readline("(bgpsim-store)> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                run_command(&mut table, line.trim());
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }
    if let Err(err) = rl.save_history(HISTORY_FILE) {
        warn!("cannot save history: {}", err);
    }
    Ok(())
}
