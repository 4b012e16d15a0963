//! Template context for generated files
//!
//! Each generator exposes a fixed set of variables; templates may reference
//! only those.

use crate::error::Result;
use crate::naming::{ComponentName, InstanceNames};
use serde::Serialize;
use tera::Context;

/// Variables bound while rendering a template set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateContext {
    /// Component templates see `component_name`
    Component { component_name: String },
    /// Instance templates see `instance_name` and `namespace_name`
    Instance {
        instance_name: String,
        namespace_name: String,
    },
}

impl TemplateContext {
    pub fn component(name: &ComponentName) -> Self {
        Self::Component {
            component_name: name.as_str().to_string(),
        }
    }

    pub fn instance(names: &InstanceNames) -> Self {
        Self::Instance {
            instance_name: names.instance.clone(),
            namespace_name: names.namespace.clone(),
        }
    }

    /// Convert to Tera context
    pub fn to_tera_context(&self) -> Result<Context> {
        Ok(Context::from_serialize(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::DEFAULT_NAMESPACE_PREFIX;

    #[test]
    fn test_component_context_variables() {
        let name = ComponentName::derive("foo", "app-").unwrap();
        let ctx = TemplateContext::component(&name).to_tera_context().unwrap();

        assert_eq!(ctx.get("component_name").unwrap(), "app-foo");
        assert!(ctx.get("instance_name").is_none());
    }

    #[test]
    fn test_instance_context_variables() {
        let names = InstanceNames::derive("bar", DEFAULT_NAMESPACE_PREFIX).unwrap();
        let ctx = TemplateContext::instance(&names).to_tera_context().unwrap();

        assert_eq!(ctx.get("instance_name").unwrap(), "bar");
        assert_eq!(ctx.get("namespace_name").unwrap(), "apps-bar");
        assert!(ctx.get("component_name").is_none());
    }
}
