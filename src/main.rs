// main.rs
// `cl-plan` command: prints the continual-learning task plan of a dataset.
//
//     cl-plan <train_dir> <test_dir> [config.json]
//
// Without arguments a synthetic 10-class in-memory dataset is used.
use anyhow::{bail, Context, Result};
use clloader::{ArrayDataset, CLLoader, ImageFolderDataset, LabeledDataset, LoaderConfig};
use prettytable::{row, Table};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let run_id = format!("run_{}", Uuid::new_v4());

    match args.as_slice() {
        [] => {
            let config = LoaderConfig::new(2usize, 0);
            let (train, test) = synthetic_splits(10, 20, 5)?;
            info!(%run_id, "no dataset given, using a synthetic 10-class split");
            let loader = CLLoader::from_config(train, test, &config)?;
            print_plan(&run_id, &config, &loader);
        }
        [train_dir, test_dir, rest @ ..] if rest.len() <= 1 => {
            let config = match rest.first() {
                Some(path) => LoaderConfig::from_file(path)
                    .with_context(|| format!("loading loader config from {}", path))?,
                None => LoaderConfig::default(),
            };
            let (train, test) = ImageFolderDataset::pair(train_dir, test_dir)
                .with_context(|| format!("scanning {} and {}", train_dir, test_dir))?;
            info!(%run_id, train = %train_dir, test = %test_dir, "opened image folders");
            let loader = CLLoader::from_config(train, test, &config)?;
            print_plan(&run_id, &config, &loader);
        }
        _ => bail!("usage: cl-plan [<train_dir> <test_dir> [config.json]]"),
    }

    Ok(())
}

/// Random feature vectors, `train_per_class`/`test_per_class` samples for each class
fn synthetic_splits(
    nb_classes: usize,
    train_per_class: usize,
    test_per_class: usize,
) -> Result<(ArrayDataset<Vec<f32>>, ArrayDataset<Vec<f32>>)> {
    let mut rng = rand::thread_rng();
    let mut make = |per_class: usize| {
        let labels: Vec<usize> = (0..nb_classes)
            .flat_map(|c| std::iter::repeat(c).take(per_class))
            .collect();
        let inputs: Vec<Vec<f32>> = labels
            .iter()
            .map(|_| (0..8).map(|_| rng.gen_range(-1.0..1.0)).collect())
            .collect();
        ArrayDataset::new(inputs, labels)
    };
    let train = make(train_per_class)?;
    let test = make(test_per_class)?;
    Ok((train, test))
}

fn print_plan<D: LabeledDataset>(run_id: &str, config: &LoaderConfig, loader: &CLLoader<D>) {
    println!(
        "{}: {} classes, increment {}, initial increment {}, {} tasks",
        run_id,
        loader.nb_classes(),
        config.increment.description(),
        config.initial_increment,
        loader.nb_tasks()
    );

    let mut table = Table::new();
    table.add_row(row!["task", "new classes", "seen classes", "train samples", "test samples"]);
    for task in loader {
        table.add_row(row![
            task.task_id(),
            format!("[{}, {})", task.range.lo, task.range.hi),
            format!("[0, {})", task.range.hi),
            task.train.len(),
            task.test.len()
        ]);
    }
    table.printstd();
}
