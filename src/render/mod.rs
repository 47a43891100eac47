//! Tree rendering facade.

pub mod engine;

use crate::{ctx::Ctx, lookup::Lookup, transaction::Transaction};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// How unterminated markers and missing keys are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Drop unterminated markers, expand missing keys to nothing.
    #[default]
    Lenient,
    /// Fail on either.
    Strict,
}

#[derive(Debug)]
pub struct TreeReport {
    /// Template paths rendered, relative to their source directory.
    pub rendered: Vec<PathBuf>,
}

/// Render all templates for `ctx` and publish them into `ctx.out_dir`.
///
/// The previous output survives untouched if any template fails.
pub fn render_tree(ctx: &Ctx, lookup: &Lookup, mode: Mode) -> Result<TreeReport> {
    let txn = Transaction::begin(ctx).context("begin transaction")?;
    let rendered = engine::render_all(
        &ctx.templates_dir,
        ctx.overlay_dir.as_deref(),
        txn.stage(),
        lookup,
        mode,
    )
    .context("render templates")?;
    txn.commit().context("commit transaction")?;

    info!(
        count = rendered.len(),
        out = %ctx.out_dir.display(),
        "published rendered tree"
    );
    Ok(TreeReport { rendered })
}
