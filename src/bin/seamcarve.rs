// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamcarve::{load_image, save_energy, save_image, SeamCarver};
use std::path::{Path, PathBuf};
use std::process;

extern crate clap;
extern crate failure;

use clap::{App, Arg};
use log::info;

fn is_percent(v: String) -> Result<(), String> {
    match v.parse::<u32>() {
        Ok(p) if p <= 100 => Ok(()),
        _ => Err(format!("'{}' is not a whole percentage from 0 to 100", v)),
    }
}

fn is_count(v: String) -> Result<(), String> {
    v.parse::<u32>()
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a seam count", v))
}

// Debug images go beside the resized image.
fn sibling(output: &Path, name: &str) -> PathBuf {
    output.with_file_name(name)
}

fn run() -> Result<(), failure::Error> {
    let matches = App::new("seamcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image narrowing by seam carving")
        .arg(
            Arg::with_name("image")
                .help("The image to narrow")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("percent")
                .help("How much of the width to remove, 0 to 100")
                .required(true)
                .validator(is_percent)
                .index(2),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the narrowed image")
                .short("o")
                .long("output")
                .takes_value(true)
                .default_value("resized.png"),
        )
        .arg(
            Arg::with_name("debug")
                .help("Also write the energy map and the cheapest seams beside the output")
                .short("d")
                .long("debug"),
        )
        .arg(
            Arg::with_name("seams")
                .help("How many seams to paint in debug mode")
                .short("n")
                .long("seams")
                .takes_value(true)
                .validator(is_count)
                .default_value("50"),
        )
        .get_matches();

    let input = Path::new(matches.value_of("image").unwrap_or_default());
    let percent: u32 = matches.value_of("percent").unwrap_or_default().parse()?;
    let output = Path::new(matches.value_of("output").unwrap_or_default());
    let seams: u32 = matches.value_of("seams").unwrap_or_default().parse()?;

    let mut carver = SeamCarver::new(load_image(input)?)?;
    let (width, height) = carver.dimensions();
    info!("read {} ({}x{})", input.display(), width, height);

    let removed = carver.carve_percent(percent)?;
    save_image(carver.pixels(), output)?;
    info!(
        "removed {} seams, wrote {} ({}x{})",
        removed,
        output.display(),
        carver.width(),
        carver.height()
    );

    if matches.is_present("debug") {
        let energy_path = sibling(output, "energy.png");
        save_energy(carver.energy(), &energy_path)?;
        info!("wrote {}", energy_path.display());

        let seams_path = sibling(output, "seams.png");
        save_image(&carver.highlight_seams(seams)?, &seams_path)?;
        info!("wrote {}", seams_path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        eprintln!("seamcarve: {}", e);
        process::exit(1);
    }
}
