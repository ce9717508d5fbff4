//! The `create` pipeline
//!
//! ConfigLoaded -> EnvironmentChecked -> EnvironmentCreated ->
//! DependenciesResolved -> Archived -> Done. Strictly sequential; each
//! step either completes or aborts the whole build.

use crate::{OpsCtx, PackageReport};
use apack_errors::{Error, OpsError};
use apack_events::{Event, EventEmitter};
use apack_net::Download;
use apack_venv::VenvManager;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Plugin sources every manager archive is expected to carry
const MANAGER_PLUGIN_DIRS: &[&str] = &[
    "plugins/plugin-installer",
    "plugins/agent-installer",
    "plugins/windows-plugin-installer",
    "plugins/windows-agent-installer",
];

/// Build an agent package from the context's spec
///
/// # Errors
///
/// Returns an error when a precondition is violated (existing environment
/// without force, existing output artifact), or when any pipeline step
/// fails. Nothing is retried; the filesystem is left in an inspectable
/// partial state.
pub async fn create(ctx: &OpsCtx) -> Result<PackageReport, Error> {
    let start = Instant::now();
    let spec = &ctx.spec;

    ctx.emit_operation_started(format!(
        "Creating agent package for {}",
        spec.distribution
    ));

    // Precondition checks before anything is mutated. An existing
    // artifact is always fatal: force governs the environment only.
    if spec.venv.exists() && !ctx.force {
        return Err(OpsError::EnvironmentExists {
            path: spec.venv.display().to_string(),
        }
        .into());
    }

    if spec.output_tar.exists() {
        return Err(OpsError::ArtifactExists {
            path: spec.output_tar.display().to_string(),
        }
        .into());
    }

    if spec.venv.exists() {
        ctx.emit_warning(format!(
            "Removing existing environment at {}",
            spec.venv.display()
        ));
        tokio::fs::remove_dir_all(&spec.venv)
            .await
            .map_err(|e| Error::io_with_path(&e, &spec.venv))?;
        ctx.emit(Event::VenvRemoved {
            path: spec.venv.clone(),
        });
    }

    let venv = VenvManager::new(spec.venv.clone(), ctx.tx.clone());
    venv.create(spec.python.as_deref()).await?;

    let plugins = match &spec.manager {
        Some(manager_url) => install_manager_plugins(ctx, &venv, manager_url).await?,
        None => Vec::new(),
    };

    for module in spec.modules() {
        venv.install_module(module).await?;
    }

    let modules = venv.installed_modules().await?;

    apack_archive::create_tar_gz(&spec.venv, &spec.output_tar, &ctx.tx).await?;

    let report = PackageReport {
        distribution: spec.distribution.clone(),
        package_path: spec.output_tar.clone(),
        venv_path: spec.venv.clone(),
        modules,
        plugins,
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    ctx.emit_operation_completed(
        format!("Created agent package at {}", spec.output_tar.display()),
        true,
    );

    Ok(report)
}

/// Fetch the manager archive and install its plugin sources
async fn install_manager_plugins(
    ctx: &OpsCtx,
    venv: &VenvManager,
    manager_url: &str,
) -> Result<Vec<String>, Error> {
    let staging = tempfile::tempdir().map_err(Error::from)?;
    let archive_path = staging.path().join("manager.tar.gz");

    Download::new(manager_url)?
        .execute(&ctx.net, &archive_path, &ctx.tx)
        .await?;

    let extract_dir = staging.path().join("manager");
    apack_archive::extract_tar_gz(&archive_path, &extract_dir, &ctx.tx).await?;

    let root = manager_root(&extract_dir).await?;
    let mut installed = Vec::new();

    for sub in MANAGER_PLUGIN_DIRS {
        let dir = root.join(sub);
        if !dir.is_dir() {
            return Err(OpsError::PluginSourceMissing {
                name: (*sub).to_string(),
                path: root.display().to_string(),
            }
            .into());
        }

        venv.install_source(&dir).await?;

        let name = dir
            .file_name()
            .map_or_else(|| (*sub).to_string(), |n| n.to_string_lossy().into_owned());
        installed.push(name);
    }

    Ok(installed)
}

/// Resolve the root of an extracted manager archive
///
/// Source-forge archives wrap everything in one top-level directory;
/// unwrap it when that is the only entry.
async fn manager_root(extract_dir: &Path) -> Result<PathBuf, Error> {
    let mut entries = tokio::fs::read_dir(extract_dir)
        .await
        .map_err(|e| Error::io_with_path(&e, extract_dir))?;

    let mut dirs = Vec::new();
    let mut saw_file = false;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(&e, extract_dir))?
    {
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            dirs.push(entry.path());
        } else {
            saw_file = true;
        }
    }

    if !saw_file && dirs.len() == 1 {
        Ok(dirs.remove(0))
    } else {
        Ok(extract_dir.to_path_buf())
    }
}
