//! Project creation from embedded templates.

use std::path::{Path, PathBuf};

use include_dir::{Dir, include_dir};
use tracing::info;

use crate::error::{Result, ScaffoldError};

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Which template a project is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectKind {
    /// A library crate.
    #[default]
    Package,

    /// A command-line application crate.
    App,
}

impl ProjectKind {
    fn template_dir(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::App => "app",
        }
    }
}

/// Options for [`scaffold`].
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    name: String,
    target_root: PathBuf,
    kind: ProjectKind,
    overwrite: bool,
}

impl ScaffoldOptions {
    /// Scaffold `name` (snake_case) under `target_root`.
    pub fn new(name: impl Into<String>, target_root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            target_root: target_root.into(),
            kind: ProjectKind::default(),
            overwrite: false,
        }
    }

    /// Choose the template kind.
    pub fn kind(mut self, kind: ProjectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace an existing project directory instead of failing.
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}

/// Create a new project directory from an embedded template.
///
/// Returns the path of the created project. Fails with
/// [`FsError::DestinationExists`](bedrock_fs_utils::FsError::DestinationExists)
/// when the directory already exists and overwriting was not requested.
pub async fn scaffold(options: &ScaffoldOptions) -> Result<PathBuf> {
    validate_name(&options.name)?;

    let dir_name = kebab_case(&options.name);
    let project_dir = options.target_root.join(&dir_name);
    bedrock_fs_utils::create_dir_fresh(&project_dir, options.overwrite).await?;

    let template = TEMPLATES
        .get_dir(options.kind.template_dir())
        .ok_or(ScaffoldError::TemplateMissing(options.kind.template_dir()))?;
    extract(template, Path::new(options.kind.template_dir()), &project_dir)?;

    let snake = options.name.clone();
    let kebab = kebab_case(&options.name);
    let title = title_case(&options.name);
    let replacements = [
        ("<package_name>", snake.as_str()),
        ("<package-name>", kebab.as_str()),
        ("<Package Name>", title.as_str()),
    ];
    bedrock_fs_utils::replace_in_files(&[project_dir.clone()], &replacements, None).await?;

    info!("scaffolded {} at {}", options.name, project_dir.display());
    Ok(project_dir)
}

/// Write an embedded directory to disk, stripping `.tmpl` suffixes.
fn extract(dir: &Dir<'_>, root: &Path, target: &Path) -> Result<()> {
    for file in dir.files() {
        let relative = file.path().strip_prefix(root).unwrap_or(file.path());
        let mut destination = target.join(relative);
        if let Some(stripped) = destination
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(".tmpl"))
        {
            let stripped = stripped.to_string();
            destination.set_file_name(stripped);
        }

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&destination, file.contents())?;
    }

    for subdir in dir.dirs() {
        extract(subdir, root, target)?;
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some('a'..='z'))
        && chars.all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'));
    if valid {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidName(name.to_string()))
    }
}

fn kebab_case(name: &str) -> String {
    name.replace('_', "-")
}

fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
