use clap::Parser;
use probe_table::HashTable;
use probe_table::TableConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Number of distinct keys to insert.
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    /// Initial slot count.
    #[arg(short = 'c', long = "capacity", default_value_t = 8)]
    capacity: usize,

    /// Load factor at which the table grows.
    #[arg(short = 't', long = "threshold", default_value_t = 0.6)]
    threshold: f64,

    /// Delete every `n`th key after filling the table. 0 disables deletion.
    #[arg(short = 'd', long = "delete-every", default_value_t = 3)]
    delete_every: u64,
}

fn main() -> Result<(), probe_table::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut table = HashTable::with_config(TableConfig::new(args.capacity, args.threshold))?;
    println!(
        "Created table with {} slots, growing at a load factor of {:.2}",
        table.capacity(),
        table.load_factor_threshold()
    );

    for key in 0..args.entries {
        table.set(key, key * key);
    }
    println!(
        "Inserted {} entries, capacity is now {} (load factor {:.4})",
        table.len(),
        table.capacity(),
        table.load_factor()
    );

    if args.delete_every > 0 {
        let mut deleted = 0;
        for key in (0..args.entries).step_by(args.delete_every as usize) {
            table.delete(&key)?;
            deleted += 1;
        }
        println!(
            "Deleted {deleted} entries, {} remain (load factor {:.4})",
            table.len(),
            table.load_factor()
        );
    }

    table.print_probe_histogram();
    table.debug_stats().print();
    Ok(())
}
