//! Atomic publish via a temp-dir → rename protocol.
use crate::ctx::Ctx;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::{Builder, TempDir};
use tracing::warn;

pub struct Transaction {
    stage: TempDir,
    out: PathBuf,
}

impl Transaction {
    /// Create a fresh staging directory beside the output directory.
    pub fn begin(ctx: &Ctx) -> Result<Self> {
        fs::create_dir_all(&ctx.stage_parent)
            .with_context(|| format!("create {}", ctx.stage_parent.display()))?;

        let stage = Builder::new()
            .prefix(".stage.")
            .tempdir_in(&ctx.stage_parent)
            .context("create staging dir")?;

        Ok(Self {
            stage,
            out: ctx.out_dir.clone(),
        })
    }

    /// Path callers write rendered files into.
    #[inline]
    pub fn stage(&self) -> &Path {
        self.stage.path()
    }

    /// Replace the output directory with the staged tree.
    ///
    /// Dropping the transaction without committing deletes the stage. If
    /// publishing fails, the stage is kept on disk, since the previous
    /// output may already be gone, and its path is logged and included
    /// in the error.
    pub fn commit(self) -> Result<()> {
        let stage_path = self.stage.keep();

        publish(&stage_path, &self.out).map_err(|e| {
            warn!(stage = %stage_path.display(), "publish failed; rendered tree left in staging dir");
            e.context(format!("rendered tree kept at {}", stage_path.display()))
        })
    }
}

fn publish(stage: &Path, out: &Path) -> Result<()> {
    clear(out)?;
    fs::rename(stage, out)
        .with_context(|| format!("rename {} -> {}", stage.display(), out.display()))
}

/// Remove whatever currently sits at `out`: a previous tree, a stray file
/// or a symlink (the link itself, never its target).
fn clear(out: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(out) else {
        return Ok(());
    };
    let removed = if meta.is_dir() {
        fs::remove_dir_all(out)
    } else {
        fs::remove_file(out)
    };
    removed.with_context(|| format!("remove previous output {}", out.display()))
}
