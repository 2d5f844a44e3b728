//! increment_modes.rs
//!
//! Walks through the three increment modes on a 10-class in-memory dataset:
//! 1. uniform increment;
//! 2. uniform increment after a larger initial task;
//! 3. explicit per-task sizes.
//! Then shows the configuration errors a bad increment produces.

use anyhow::Result;
use clloader::{ArrayDataset, CLLoader, Increment, LabeledDataset};
use prettytable::{row, Table};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    println!("=== continual-learning increment modes ===");

    let labels: Vec<usize> = (0..10).flat_map(|c| [c, c]).collect();
    let inputs: Vec<usize> = (0..labels.len()).collect();
    let train = ArrayDataset::new(inputs.clone(), labels.clone())?;
    let test = ArrayDataset::new(inputs, labels)?;

    let modes = vec![
        (Increment::Uniform(2), 0),
        (Increment::Uniform(5), 0),
        (Increment::Uniform(1), 5),
        (Increment::Uniform(2), 4),
        (Increment::Explicit(vec![5, 1, 1, 3]), 0),
    ];

    for (increment, initial_increment) in modes {
        println!(
            "\n--- increment {}, initial increment {} ---",
            increment.description(),
            initial_increment
        );
        let loader = CLLoader::new(&train, &test, increment, initial_increment)?;

        let mut table = Table::new();
        table.add_row(row!["task", "range", "train labels", "test labels"]);
        for task in &loader {
            table.add_row(row![
                task.task_id(),
                format!("[{}, {})", task.range.lo, task.range.hi),
                format!("{:?}", task.train.labels()),
                task.test.len()
            ]);
        }
        table.printstd();
    }

    println!("\n--- rejected configurations ---");
    let bad = vec![
        (Increment::Uniform(3), 0),
        (Increment::Uniform(0), 0),
        (Increment::Uniform(2), 11),
        (Increment::Explicit(vec![5, 1, 1]), 0),
        (Increment::Explicit(vec![5, 0, 5]), 0),
    ];
    for (increment, initial_increment) in bad {
        let description = increment.description();
        match CLLoader::new(&train, &test, increment, initial_increment) {
            Ok(loader) => println!(
                "{}: unexpectedly accepted ({} tasks)",
                description,
                loader.nb_tasks()
            ),
            Err(e) => println!("{} / {}: {}", description, initial_increment, e),
        }
    }

    Ok(())
}
