// main.rs
//
// Batch entry point: builds every preset chute, writes one STL per part and
// the explanatory diagrams into ./out. There are no arguments; RUST_LOG only
// changes how chatty the run is.

use anyhow::{Context, Result};
use coin_chute::chute::Chute;
use coin_chute::mesh::Part;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::Path;

const OUT_DIR: &str = "out";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Every part of every preset is built before the first file is written
    let presets = Chute::presets();
    let built = build_all(&presets)?;
    #[cfg(any(feature = "image-io", feature = "svg-io"))]
    let figures = diagrams(&presets)?;

    let out = Path::new(OUT_DIR);
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    #[cfg(feature = "stl-io")]
    for part in built.iter().flatten() {
        coin_chute::io::stl::write_part(part, out).with_context(|| format!("writing {}", part.name))?;
    }
    info!("{} chutes, {} parts", presets.len(), built.iter().map(Vec::len).sum::<usize>());

    #[cfg(any(feature = "image-io", feature = "svg-io"))]
    for (stem, figure) in &figures {
        figure.save(out, stem).with_context(|| format!("writing {stem}"))?;
    }

    Ok(())
}

fn build_all(presets: &[Chute]) -> Result<Vec<Vec<Part>>> {
    presets
        .iter()
        .map(|chute| {
            let parts = chute.build().with_context(|| format!("building {}", chute.name))?;
            info!("{}: {} parts", chute.name, parts.len());
            Ok(parts)
        })
        .collect()
}

#[cfg(any(feature = "image-io", feature = "svg-io"))]
fn diagrams(presets: &[Chute]) -> Result<Vec<(&'static str, coin_chute::diagram::Figure)>> {
    use coin_chute::diagram::views;

    let find = |name: &str| {
        presets
            .iter()
            .find(|chute| chute.name == name)
            .map(|chute| chute.params)
            .with_context(|| format!("no preset named {name}"))
    };
    let snap_fit = find("snap_fit")?;
    let front_back = find("front_back")?;

    Ok(vec![
        ("top_view", views::top_view(&snap_fit)?),
        ("slope_comparison", views::slope_comparison(&snap_fit)?),
        ("structure_comparison", views::structure_comparison(&front_back)?),
    ])
}
