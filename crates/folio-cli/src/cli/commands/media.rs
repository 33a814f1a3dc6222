//! Media command handlers.

use std::path::Path;

use anyhow::Result;
use folio_core::config::Config;
use folio_core::media;
use folio_core::projects::ProjectStore;
use tracing::info;

pub fn add(config: &Config, file: &Path, project: Option<&str>) -> Result<()> {
    // Validate the target before copying anything.
    let store = ProjectStore::new(config.projects_path());
    if let Some(id) = project
        && store.find(id)?.is_none()
    {
        anyhow::bail!("Project not found: {id}");
    }

    let stored = media::import_file(&config.media_dir(), file)?;
    if let Some(id) = project {
        store.update(id, stored.project_patch())?;
        info!(id, path = %stored.public_path, "media attached");
    }
    println!("{}", stored.public_path);
    Ok(())
}
