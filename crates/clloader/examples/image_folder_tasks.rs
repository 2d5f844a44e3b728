//! image_folder_tasks.rs
//!
//! Builds a throwaway train/test class-folder tree, opens it as a pair of
//! `ImageFolderDataset`s and iterates the task sequence twice, printing which
//! files each task trains and evaluates on.

use anyhow::Result;
use clloader::{CLLoader, ImageFolderDataset, LabeledDataset, LoaderConfig};
use rand::Rng;
use std::fs;
use std::path::Path;
use uuid::Uuid;

fn gen_imagefolder(root: &Path, nb_classes: usize, nb_samples: usize) -> Result<()> {
    let mut rng = rand::thread_rng();
    for class_id in 0..nb_classes {
        let folder = root.join(format!("class_{}", class_id));
        fs::create_dir_all(&folder)?;
        for sample_id in 0..nb_samples {
            let pixels: Vec<u8> = (0..32 * 32 * 3).map(|_| rng.gen()).collect();
            fs::write(folder.join(format!("sample_{}.raw", sample_id)), pixels)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let workdir = std::env::temp_dir().join(format!("clloader_{}", Uuid::new_v4()));
    let train_root = workdir.join("train");
    let test_root = workdir.join("test");
    gen_imagefolder(&train_root, 10, 2)?;
    gen_imagefolder(&test_root, 10, 2)?;
    println!("generated class folders under {}", workdir.display());

    let config = LoaderConfig::from_json_str(
        r#"{"increment": 2, "initial_increment": 4, "strict_label_space": true}"#,
    )?;
    let (train, test) = ImageFolderDataset::pair(&train_root, &test_root)?;
    let loader = CLLoader::from_config(train, test, &config)?;
    println!("{} classes -> {} tasks", loader.nb_classes(), loader.nb_tasks());

    for pass in 0..2 {
        println!("\n=== pass {} ===", pass + 1);
        for task in &loader {
            println!(
                "{}: {} train / {} test samples",
                task.range,
                task.train.len(),
                task.test.len()
            );
            for sample in task.train.samples() {
                let (path, label) = sample?;
                let class_name = &loader.train().class_names()[label];
                println!("  train {} ({})", path.display(), class_name);
            }
        }
    }

    fs::remove_dir_all(&workdir)?;
    Ok(())
}
