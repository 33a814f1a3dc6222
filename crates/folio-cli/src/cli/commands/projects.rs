//! Project command handlers.

use anyhow::{Context, Result};
use folio_core::config::Config;
use folio_core::projects::{self, ProjectPatch, ProjectStore};
use tracing::info;

pub fn list(config: &Config, all: bool) -> Result<()> {
    let store = ProjectStore::new(config.projects_path());
    let projects = store.load().context("load projects")?;
    let mut shown = projects::visible(&projects, all).peekable();
    if shown.peek().is_none() {
        println!("No projects found.");
        return Ok(());
    }
    for project in shown {
        let marker = if project.hidden { "  (hidden)" } else { "" };
        println!("{}  {}{marker}", project.id, project.name);
    }
    Ok(())
}

pub fn show(config: &Config, id: &str) -> Result<()> {
    let store = ProjectStore::new(config.projects_path());
    let project = store
        .find(id)
        .context("load projects")?
        .with_context(|| format!("Project not found: {id}"))?;
    println!("{}", serde_json::to_string_pretty(&project)?);
    Ok(())
}

pub fn init(config: &Config) -> Result<()> {
    let store = ProjectStore::new(config.projects_path());
    if store.exists() {
        anyhow::bail!("Projects file already exists at {}", store.path().display());
    }
    let seed = projects::seed_projects();
    store.save(&seed)?;
    println!(
        "Created {} with {} sample projects",
        store.path().display(),
        seed.len()
    );
    Ok(())
}

pub fn add(config: &Config, patch: ProjectPatch) -> Result<()> {
    let store = ProjectStore::new(config.projects_path());
    let project = store.add_now(patch).context("add project")?;
    info!(id = %project.id, "project added");
    println!("Added project {}: {}", project.id, project.name);
    Ok(())
}

pub fn edit(config: &Config, id: &str, patch: ProjectPatch) -> Result<()> {
    if patch.is_empty() {
        anyhow::bail!("Nothing to update; pass at least one field flag");
    }
    let store = ProjectStore::new(config.projects_path());
    let project = store.update(id, patch)?;
    info!(id = %project.id, "project updated");
    println!("Updated project {}: {}", project.id, project.name);
    Ok(())
}

pub fn remove(config: &Config, id: &str, confirmed: bool) -> Result<()> {
    let store = ProjectStore::new(config.projects_path());
    let project = store
        .find(id)
        .context("load projects")?
        .with_context(|| format!("Project not found: {id}"))?;
    if !confirmed {
        anyhow::bail!(
            "Refusing to delete project \"{}\" without --yes",
            project.name
        );
    }
    store.remove(id)?;
    info!(id, "project removed");
    println!("Deleted project {}: {}", project.id, project.name);
    Ok(())
}
