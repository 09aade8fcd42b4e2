use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let path = Path::new("movie_dict.json");
    let remote = std::env::var("ARTIFACT_URL").ok();

    println!("Loading similarity artifact...\n");

    let start = Instant::now();
    let catalog = Catalog::load(path, remote.as_deref())?;
    let elapsed = start.elapsed();

    let dim = catalog.matrix().dim();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Matrix: {}x{}", dim, dim);
    println!(
        "\nPerformance: {:.0} scores/second",
        (dim * dim) as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
