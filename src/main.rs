use std::path::Path;

use anyhow::{Result, bail};
use optics2d::io::{read_scene, results_to_string, write_results};
use optics2d::{simulate, simulate_sweep};

const USAGE: &str = "Usage: optics2d <scene.json> [out.json] [--single]";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let single = args.iter().any(|a| a == "--single");
    let paths: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let (scene_path, out_path) = match paths.as_slice() {
        [scene] => (Path::new(scene.as_str()), None),
        [scene, out] => (Path::new(scene.as_str()), Some(Path::new(out.as_str()))),
        _ => bail!(USAGE),
    };

    let scene = read_scene(scene_path)?;
    let results = if single {
        vec![simulate(&scene)?]
    } else {
        simulate_sweep(&scene)?
    };

    match out_path {
        Some(path) => {
            write_results(path, &results)?;
            log::info!("Results written to {}", path.display());
        }
        None => println!("{}", results_to_string(&results)?),
    }
    Ok(())
}
