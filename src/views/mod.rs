//! Template registry
//!
//! Every page gets its own rendering unit: a [`minijinja::Environment`]
//! holding all layouts, all partials and that one page. Pages may therefore
//! all define a `content` block without stepping on each other. Units are
//! built once at startup and never mutated afterwards.
//!
//! Partials are also registered on their own in a fragment environment,
//! which serves htmx requests that only need a piece of a page.

use std::{
    collections::HashMap,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use minijinja::{AutoEscape, Environment, ErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Format used by the `datetime` filter when none is given
pub const DEFAULT_DATETIME_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

const TEMPLATE_EXTENSION: &str = "html";

/// Errors raised while building the registry
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no layout templates found in {}", .0.display())]
    NoLayouts(PathBuf),

    #[error("failed to parse template '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Errors raised while rendering a page or fragment
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page template '{0}' not found")]
    UnknownPage(String),

    #[error("fragment '{0}' not found")]
    UnknownFragment(String),

    #[error("failed to render '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// A template file, registered under its file stem
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Compiled rendering units, keyed by page name, plus the fragment registry
#[derive(Debug)]
pub struct Templates {
    pages: HashMap<String, Environment<'static>>,
    fragments: Environment<'static>,
}

impl Templates {
    /// Load `layouts/`, `partials/` and `pages/` under `dir`
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let layouts = read_sources(&dir.join("layouts"))?;
        if layouts.is_empty() {
            return Err(TemplateError::NoLayouts(dir.join("layouts")));
        }
        let partials = read_sources(&dir.join("partials"))?;
        let pages = read_sources(&dir.join("pages"))?;

        Self::build(&layouts, &partials, &pages)
    }

    /// Compile one rendering unit per page from already loaded sources
    pub fn build(layouts: &[Source], partials: &[Source], pages: &[Source]) -> Result<Self, TemplateError> {
        let mut fragments = environment();
        for source in partials {
            add_source(&mut fragments, source)?;
        }

        let mut units = HashMap::with_capacity(pages.len());
        for page in pages {
            let mut env = environment();
            for source in layouts.iter().chain(partials) {
                add_source(&mut env, source)?;
            }
            add_source(&mut env, page)?;
            units.insert(page.name.clone(), env);
        }

        Ok(Self {
            pages: units,
            fragments,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn has_page(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    /// Render a full page through its own rendering unit
    pub fn render_page<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, RenderError> {
        let env = self
            .pages
            .get(name)
            .ok_or_else(|| RenderError::UnknownPage(name.to_string()))?;

        let template = env.get_template(name).map_err(|source| RenderError::Template {
            name: name.to_string(),
            source,
        })?;

        template.render(ctx).map_err(|source| RenderError::Template {
            name: name.to_string(),
            source,
        })
    }

    /// Render a single partial by name, without any layout
    pub fn render_fragment<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, RenderError> {
        let template = self.fragments.get_template(name).map_err(|source| {
            if source.kind() == ErrorKind::TemplateNotFound {
                RenderError::UnknownFragment(name.to_string())
            } else {
                RenderError::Template {
                    name: name.to_string(),
                    source,
                }
            }
        })?;

        template.render(ctx).map_err(|source| RenderError::Template {
            name: name.to_string(),
            source,
        })
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Names carry no extension, so escaping cannot be inferred from them
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_filter("datetime", datetime);
    env
}

fn add_source(env: &mut Environment<'static>, source: &Source) -> Result<(), TemplateError> {
    env.add_template_owned(source.name.clone(), source.text.clone())
        .map_err(|e| TemplateError::Parse {
            name: source.name.clone(),
            source: e,
        })
}

/// Read every `*.html` file of a directory, sorted by name.
/// A missing directory yields no sources.
fn read_sources(dir: &Path) -> Result<Vec<Source>, TemplateError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| TemplateError::Io { path, source }
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let text = fs::read_to_string(&path).map_err(io_error(&path))?;
        sources.push(Source::new(name, text));
    }

    Ok(sources)
}

/// `{{ ticket.due_date|datetime }}` or `{{ ticket.due_date|datetime("%Y-%m-%d") }}`
fn datetime(value: &str, format: Option<&str>) -> Result<String, minijinja::Error> {
    let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid timestamp '{}'", value),
        )
        .with_source(e)
    })?;

    let mut out = String::new();
    write!(
        out,
        "{}",
        parsed
            .with_timezone(&Utc)
            .format(format.unwrap_or(DEFAULT_DATETIME_FORMAT))
    )
    .map_err(|_| minijinja::Error::new(ErrorKind::InvalidOperation, "invalid datetime format"))?;

    Ok(out)
}
