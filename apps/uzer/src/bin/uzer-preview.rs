//! Render every preview to `<out_dir>/<name>.png` (default `target/previews`).

use std::path::PathBuf;

use anyhow::Context;
use uzer::previews::{PREVIEWS, render_preview};
use uzer_core::Density;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/previews"));
    std::fs::create_dir_all(&out)
        .with_context(|| format!("creating {}", out.display()))?;

    for p in PREVIEWS {
        let img = render_preview(p, Density { scale: 2.0 })
            .with_context(|| format!("rendering preview {}", p.name))?;
        let path = out.join(format!("{}.png", p.name));
        img.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
