use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Paths for one tree render. Constructed once per run; never mutated.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub templates_dir: PathBuf,
    pub overlay_dir: Option<PathBuf>,
    pub out_dir: PathBuf,
    /// Directory holding `out_dir`; staging trees are created here so the
    /// final rename stays on one filesystem.
    pub stage_parent: PathBuf,
}

impl Ctx {
    pub fn new(templates_dir: &Path, overlay_dir: Option<&Path>, out_dir: &Path) -> Result<Self> {
        if !templates_dir.is_dir() {
            bail!("templates directory not found: {}", templates_dir.display());
        }
        if out_dir.file_name().is_none() {
            bail!("output directory has no final component: {}", out_dir.display());
        }

        let stage_parent = match out_dir.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // Publishing replaces `out_dir` wholesale, so it must not overlap
        // any source directory.
        if let Some(out) = resolve_out(out_dir, &stage_parent)? {
            let sources = std::iter::once(("templates", templates_dir)).chain(
                overlay_dir
                    .filter(|d| d.exists())
                    .map(|d| ("overlay", d)),
            );
            for (role, dir) in sources {
                let dir = fs::canonicalize(dir)
                    .with_context(|| format!("resolve {}", dir.display()))?;
                if dir.starts_with(&out) || out.starts_with(&dir) {
                    bail!(
                        "output directory {} overlaps the {role} directory {}",
                        out_dir.display(),
                        dir.display()
                    );
                }
            }
        }

        Ok(Self {
            templates_dir: templates_dir.to_path_buf(),
            overlay_dir: overlay_dir.map(Path::to_path_buf),
            out_dir: out_dir.to_path_buf(),
            stage_parent,
        })
    }
}

/// Absolute, symlink-free form of `out_dir`. `None` when its parent does
/// not exist yet: such a path cannot contain an existing directory.
fn resolve_out(out_dir: &Path, parent: &Path) -> Result<Option<PathBuf>> {
    if fs::symlink_metadata(out_dir).is_ok() {
        return fs::canonicalize(out_dir)
            .map(Some)
            .with_context(|| format!("resolve {}", out_dir.display()));
    }
    let Ok(parent) = fs::canonicalize(parent) else {
        return Ok(None);
    };
    Ok(out_dir.file_name().map(|name| parent.join(name)))
}
