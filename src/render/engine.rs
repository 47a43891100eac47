//! Render a directory of `*.tpl` files into a target directory.

use super::Mode;
use crate::{lookup::Lookup, template::Template};
use anyhow::{Context, Result};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Render every template under `templates_dir` into `out_dir`, letting
/// files in `overlay_dir` shadow same-named ones. Returns the relative
/// paths of the templates rendered.
pub fn render_all(
    templates_dir: &Path,
    overlay_dir: Option<&Path>,
    out_dir: &Path,
    lookup: &Lookup,
    mode: Mode,
) -> Result<Vec<PathBuf>> {
    let mut rendered: HashSet<PathBuf> = HashSet::new();

    if let Some(overlay) = overlay_dir.filter(|d| d.is_dir()) {
        for tpl in templates_in(overlay) {
            let tpl = tpl.with_context(|| format!("walk {}", overlay.display()))?;
            let rel = tpl.strip_prefix(overlay)?.to_path_buf();
            render_one(&tpl, &rel, lookup, mode, out_dir)?;
            rendered.insert(rel);
        }
    }

    for tpl in templates_in(templates_dir) {
        let tpl = tpl.with_context(|| format!("walk {}", templates_dir.display()))?;
        let rel = tpl.strip_prefix(templates_dir)?.to_path_buf();
        if rendered.contains(&rel) {
            debug!(path = %rel.display(), "shadowed by overlay");
            continue;
        }
        render_one(&tpl, &rel, lookup, mode, out_dir)?;
        rendered.insert(rel);
    }

    let mut rendered: Vec<PathBuf> = rendered.into_iter().collect();
    rendered.sort();
    Ok(rendered)
}

/// Render a single template file to `out_dir / rel` (minus `.tpl` extension).
fn render_one(
    tpl_path: &Path,
    rel: &Path,
    lookup: &Lookup,
    mode: Mode,
    out_dir: &Path,
) -> Result<()> {
    let src = fs::read_to_string(tpl_path)
        .with_context(|| format!("read template {}", tpl_path.display()))?;

    let rendered = expand(&src, lookup, mode)
        .with_context(|| format!("render {}", tpl_path.display()))?;

    let mut out_rel = rel.to_path_buf();
    out_rel.set_extension(""); // strip .tpl
    let out_path = out_dir.join(&out_rel);

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output subdir {}", parent.display()))?;
    }
    debug!(from = %tpl_path.display(), to = %out_path.display(), "rendered");
    fs::write(&out_path, rendered).with_context(|| format!("write {}", out_path.display()))
}

/// Parse and render `src` under `mode`.
pub fn expand(src: &str, lookup: &Lookup, mode: Mode) -> Result<String> {
    match mode {
        Mode::Strict => {
            let tpl = Template::parse_strict(src)?;
            Ok(tpl.render_strict(lookup)?)
        }
        Mode::Lenient => {
            let tpl = Template::parse(src);
            for key in tpl.missing_keys(lookup) {
                warn!(key, "no value for variable; expanding to nothing");
            }
            Ok(tpl.render(lookup))
        }
    }
}

/// Walk `dir` and yield paths of all `*.tpl` files. Walk errors are passed
/// through; skipping an unreadable directory would silently drop its
/// output on the next publish.
fn templates_in(dir: &Path) -> impl Iterator<Item = walkdir::Result<PathBuf>> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter(|e| match e {
            Ok(e) => {
                e.file_type().is_file()
                    && e.path().extension().and_then(|x| x.to_str()) == Some("tpl")
            }
            Err(_) => true,
        })
        .map(|e| e.map(|e| e.into_path()))
}
