//! Template set loading and rendering
//!
//! A template set is every regular file in a templates directory. Files are
//! registered with Tera under their file name, so templates may
//! `{% include %}` each other. Each file renders to one output file whose
//! name is the template name with a trailing `.j2` removed.

mod context;

pub use context::TemplateContext;

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tera::Tera;
use tracing::{debug, warn};

/// Suffix stripped from template file names
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Output file name for a template file name
pub fn target_file_name(template: &str) -> &str {
    template.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(template)
}

/// One rendered template, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Template file name, e.g. `deployment.yaml.j2`
    pub template: String,
    /// Output file name, e.g. `deployment.yaml`
    pub target: String,
    pub content: String,
}

/// Templates loaded from a directory
pub struct TemplateSet {
    dir: Utf8PathBuf,
    tera: Tera,
    /// Template names in directory listing order
    names: Vec<String>,
}

impl TemplateSet {
    /// Load every regular file in `dir`.
    ///
    /// Subdirectories are skipped. The order is the directory listing order.
    pub fn load(dir: &Utf8Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::templates_not_found(dir.as_str()));
        }

        let mut sources = Vec::new();
        for entry in dir.read_dir_utf8()? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                warn!("Skipping non-file entry in templates directory: {}", path);
                continue;
            }

            let name = entry.file_name().to_string();
            if target_file_name(&name).is_empty() {
                return Err(Error::invalid_template(path.as_str(), "empty output file name"));
            }

            let content = String::from_utf8(fs::read(path)?)
                .map_err(|_| Error::invalid_template(path.as_str(), "not valid UTF-8"))?;
            debug!("Loaded template {}", name);
            sources.push((name, content));
        }

        let mut tera = Tera::default();
        // Generated files are YAML and friends, never HTML
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(sources.iter().map(|(n, c)| (n.as_str(), c.as_str())))?;

        Ok(Self {
            dir: dir.to_owned(),
            tera,
            names: sources.into_iter().map(|(n, _)| n).collect(),
        })
    }

    /// Directory the set was loaded from
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Template names in listing order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Render every template in listing order
    pub fn render_all(&self, context: &TemplateContext) -> Result<Vec<RenderedFile>> {
        let tera_context = context.to_tera_context()?;
        self.names
            .iter()
            .map(|name| {
                let content = self.tera.render(name, &tera_context)?;
                Ok(RenderedFile {
                    template: name.clone(),
                    target: target_file_name(name).to_string(),
                    content,
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet")
            .field("dir", &self.dir)
            .field("names", &self.names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn templates_dir(files: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        for (name, content) in files {
            fs::write(path.join(name), content).unwrap();
        }
        (dir, path)
    }

    fn component_ctx(name: &str) -> TemplateContext {
        TemplateContext::Component {
            component_name: name.to_string(),
        }
    }

    #[test]
    fn test_target_file_name() {
        assert_eq!(target_file_name("deployment.yaml.j2"), "deployment.yaml");
        assert_eq!(target_file_name("kustomization.yaml"), "kustomization.yaml");
        // only one trailing suffix is removed
        assert_eq!(target_file_name("a.j2.j2"), "a.j2");
        assert_eq!(target_file_name("a.j2.yaml"), "a.j2.yaml");
    }

    #[test]
    fn test_missing_directory() {
        let err = TemplateSet::load(Utf8Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::TemplatesNotFound { .. }));
    }

    #[test]
    fn test_render_deployment_template() {
        let (_dir, path) = templates_dir(&[(
            "deployment.yaml.j2",
            "metadata:\n  name: {{ component_name }}\n",
        )]);

        let set = TemplateSet::load(&path).unwrap();
        let rendered = set.render_all(&component_ctx("app-foo")).unwrap();

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].template, "deployment.yaml.j2");
        assert_eq!(rendered[0].target, "deployment.yaml");
        assert_eq!(rendered[0].content, "metadata:\n  name: app-foo\n");
    }

    #[test]
    fn test_no_html_escaping() {
        let (_dir, path) = templates_dir(&[("index.html.j2", "<b>{{ component_name }}</b>")]);
        let set = TemplateSet::load(&path).unwrap();
        let rendered = set.render_all(&component_ctx("a&b")).unwrap();
        assert_eq!(rendered[0].content, "<b>a&b</b>");
    }

    #[test]
    fn test_undefined_variable_is_error() {
        let (_dir, path) = templates_dir(&[("x.yaml.j2", "{{ namespace_name }}")]);
        let set = TemplateSet::load(&path).unwrap();
        let err = set.render_all(&component_ctx("app-foo")).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_include_between_templates() {
        let (_dir, path) = templates_dir(&[
            ("labels.j2", "app: {{ component_name }}"),
            ("service.yaml.j2", "labels:\n  {% include \"labels.j2\" %}\n"),
        ]);
        let set = TemplateSet::load(&path).unwrap();
        let rendered = set.render_all(&component_ctx("app-x")).unwrap();
        let service = rendered.iter().find(|f| f.target == "service.yaml").unwrap();
        assert_eq!(service.content, "labels:\n  app: app-x\n");
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let (_dir, path) = templates_dir(&[("a.yaml.j2", "a")]);
        fs::create_dir(path.join("nested")).unwrap();

        let set = TemplateSet::load(&path).unwrap();
        assert_eq!(set.names(), ["a.yaml.j2".to_string()]);
    }

    #[test]
    fn test_bare_suffix_file_rejected() {
        let (_dir, path) = templates_dir(&[(".j2", "x")]);
        let err = TemplateSet::load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { .. }));
    }

    #[test]
    fn test_empty_directory() {
        let (_dir, path) = templates_dir(&[]);
        let set = TemplateSet::load(&path).unwrap();
        assert!(set.is_empty());
        assert!(set.render_all(&component_ctx("app-foo")).unwrap().is_empty());
    }
}
