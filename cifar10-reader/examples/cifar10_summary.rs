use anyhow::Result;
use clap::Parser;
use cifar10_reader::{class_name, read_dataset, read_dataset_3d, ShardLayout, LABEL_COUNT};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the data_batch_*.bin and test_batch.bin files.
    #[arg(long, default_value = cifar10_reader::layout::DEFAULT_ROOT)]
    dir: String,

    /// Json file listing the shards, takes precedence over --dir.
    #[arg(long)]
    layout: Option<String>,

    /// Maximum number of records read from each training shard, 0 reads everything.
    #[arg(long, default_value_t = 0)]
    training_limit: usize,

    /// Maximum number of records read from the test shard, 0 reads everything.
    #[arg(long, default_value_t = 0)]
    test_limit: usize,

    /// Decode (3, 32, 32) images.
    #[arg(long)]
    three_d: bool,

    /// Log every decoded shard.
    #[arg(long)]
    verbose: bool,
}

fn histogram<'a>(labels: impl Iterator<Item = &'a u8>) -> [usize; LABEL_COUNT] {
    let mut counts = [0; LABEL_COUNT];
    for &label in labels {
        if let Some(c) = counts.get_mut(label as usize) {
            *c += 1
        }
    }
    counts
}

fn print_split(name: &str, labels: &[u8]) {
    println!("{name}: {} records", labels.len());
    for (label, count) in histogram(labels.iter()).iter().enumerate() {
        let class = class_name(label as u8).unwrap_or("?");
        println!("  {label} {class:<12} {count}");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let layout = match args.layout {
        Some(path) => ShardLayout::from_json_file(path)?,
        None => ShardLayout::from_root(&args.dir),
    };
    let start = std::time::Instant::now();
    let (training_labels, test_labels) = if args.three_d {
        let dataset = read_dataset_3d::<u8, u8>(&layout, args.training_limit)?;
        (dataset.training_labels, dataset.test_labels)
    } else {
        let dataset = read_dataset::<u8, u8>(&layout, args.training_limit, args.test_limit)?;
        (dataset.training_labels, dataset.test_labels)
    };
    println!("loaded in {:?}", start.elapsed());
    print_split("training", &training_labels);
    print_split("test", &test_labels);
    Ok(())
}
