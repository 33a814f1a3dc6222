//! Project directory and its JSON store.
//!
//! Projects live in `<data_dir>/projects.json` as a camelCase JSON array.
//! Order in the file is the display order everywhere (gallery, `ls`, CLI).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl Project {
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            display_name: self.name.clone(),
            hidden: self.hidden,
        }
    }

    /// Preferred external link: live site first, then repository.
    pub fn primary_url(&self) -> Option<&str> {
        [self.live_url.as_deref(), self.repo_url.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty() && *url != "#")
    }
}

/// Field updates for a project. `None` leaves a field unchanged; an empty
/// string clears an optional link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<String>,
    pub live_url: Option<String>,
    pub repo_url: Option<String>,
    pub media_path: Option<String>,
    pub media_type: Option<MediaType>,
    pub hidden: Option<bool>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Accepts `http(s)://` URLs and `#` placeholders.
///
/// # Errors
/// Returns an error naming the field when the value is neither.
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() || value == "#" {
        return Ok(());
    }
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(()),
        _ => anyhow::bail!("{field} must be a valid URL: {value}"),
    }
}

impl Project {
    /// A new project stamped with a millisecond timestamp id.
    pub fn new(timestamp_ms: i64, name: impl Into<String>) -> Self {
        Self {
            id: timestamp_ms.to_string(),
            name: name.into(),
            description: String::new(),
            tech_stack: String::new(),
            live_url: None,
            repo_url: None,
            media_path: None,
            media_type: None,
            hidden: false,
        }
    }

    /// Applies `patch` after validating its links. Nothing changes on error.
    ///
    /// # Errors
    /// Returns an error if a URL is malformed or the name is blank.
    pub fn apply(&mut self, patch: ProjectPatch) -> Result<()> {
        if let Some(name) = &patch.name
            && name.trim().is_empty()
        {
            anyhow::bail!("Project name must not be empty");
        }
        if let Some(url) = &patch.live_url {
            validate_url("liveUrl", url)?;
        }
        if let Some(url) = &patch.repo_url {
            validate_url("repoUrl", url)?;
        }

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tech_stack) = patch.tech_stack {
            self.tech_stack = tech_stack;
        }
        if let Some(url) = patch.live_url {
            self.live_url = optional(url);
        }
        if let Some(url) = patch.repo_url {
            self.repo_url = optional(url);
        }
        if let Some(path) = patch.media_path {
            self.media_path = optional(path);
            if self.media_path.is_none() {
                self.media_type = None;
            }
        }
        if let Some(media_type) = patch.media_type {
            self.media_type = Some(media_type);
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
        Ok(())
    }
}

/// Read-only view of a project used by the interactive terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: String,
    pub display_name: String,
    pub hidden: bool,
}

/// Ordered summaries for a project list.
pub fn summaries(projects: &[Project]) -> Vec<ProjectSummary> {
    projects.iter().map(Project::summary).collect()
}

/// Projects filtered by the visibility rule shared by `ls` and the gallery.
pub fn visible(projects: &[Project], include_hidden: bool) -> impl Iterator<Item = &Project> {
    projects.iter().filter(move |p| include_hidden || !p.hidden)
}

/// JSON file backing the project directory.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads all projects. A missing file is an empty directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(&self) -> Result<Vec<Project>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read projects from {}", self.path.display()));
            }
        };
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse projects from {}", self.path.display()))
    }

    /// Finds a single project by id.
    ///
    /// # Errors
    /// Returns an error if the store cannot be loaded.
    pub fn find(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    /// Appends a project built from `patch`, stamped with `timestamp_ms`.
    ///
    /// The id is bumped until it is unique within the store.
    ///
    /// # Errors
    /// Returns an error if the patch has no name, fails validation, or the
    /// store cannot be loaded or saved.
    pub fn add(&self, patch: ProjectPatch, timestamp_ms: i64) -> Result<Project> {
        let mut projects = self.load()?;
        let mut stamp = timestamp_ms;
        while projects.iter().any(|p| p.id == stamp.to_string()) {
            stamp += 1;
        }

        let mut project = Project::new(stamp, String::new());
        if patch.name.is_none() {
            anyhow::bail!("Project name must not be empty");
        }
        project.apply(patch)?;

        projects.push(project.clone());
        self.save(&projects)?;
        Ok(project)
    }

    /// [`ProjectStore::add`] stamped with the current time.
    ///
    /// # Errors
    /// See [`ProjectStore::add`].
    pub fn add_now(&self, patch: ProjectPatch) -> Result<Project> {
        self.add(patch, chrono::Utc::now().timestamp_millis())
    }

    /// Applies `patch` to the project with `id` and saves.
    ///
    /// # Errors
    /// Returns an error if the project does not exist, the patch is invalid,
    /// or the store cannot be loaded or saved.
    pub fn update(&self, id: &str, patch: ProjectPatch) -> Result<Project> {
        let mut projects = self.load()?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .with_context(|| format!("Project not found: {id}"))?;
        project.apply(patch)?;
        let updated = project.clone();
        self.save(&projects)?;
        Ok(updated)
    }

    /// Deletes the project with `id`, keeping the order of the rest.
    ///
    /// # Errors
    /// Returns an error if the project does not exist or the store cannot be
    /// loaded or saved.
    pub fn remove(&self, id: &str) -> Result<Project> {
        let mut projects = self.load()?;
        let index = projects
            .iter()
            .position(|p| p.id == id)
            .with_context(|| format!("Project not found: {id}"))?;
        let removed = projects.remove(index);
        self.save(&projects)?;
        Ok(removed)
    }

    /// Replaces the stored project list.
    ///
    /// # Errors
    /// Returns an error if serialization or the atomic write fails.
    pub fn save(&self, projects: &[Project]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(projects).context("Failed to serialize projects")?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), count = projects.len(), "projects saved");
        Ok(())
    }
}

/// Writes `content` next to `path` and renames it into place.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            tmp_path.display(),
            path.display()
        )
    })
}

/// Sample projects written by `folio projects init`.
pub fn seed_projects() -> Vec<Project> {
    let project = |id: &str, name: &str, description: &str, tech_stack: &str| Project {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        tech_stack: tech_stack.to_string(),
        live_url: None,
        repo_url: None,
        media_path: None,
        media_type: None,
        hidden: false,
    };

    vec![
        Project {
            live_url: Some("https://example.com".to_string()),
            repo_url: Some("https://github.com/example/repo".to_string()),
            media_path: Some("/projects/placeholder-1.jpg".to_string()),
            media_type: Some(MediaType::Image),
            ..project(
                "1",
                "Project Alpha",
                "A revolutionary app that changes the way we see the world, built for maximum performance.",
                "Next.js, Tailwind CSS, TypeScript, Firebase",
            )
        },
        project(
            "2",
            "Project Beta",
            "An e-commerce platform designed for scalability and a seamless user experience.",
            "React, Node.js, Express, MongoDB",
        ),
        project(
            "3",
            "Project Gamma",
            "A data visualization tool that turns complex datasets into interactive charts.",
            "D3.js, Svelte, Python, Flask",
        ),
        Project {
            hidden: true,
            ..project(
                "4",
                "Project Delta",
                "A mobile-first social app connecting people with shared interests.",
                "Flutter, Dart, Google Cloud",
            )
        },
    ]
}
