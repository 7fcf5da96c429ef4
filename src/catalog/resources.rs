//! External link templates printed next to the findings.

use super::render_template;
use serde::{Deserialize, Serialize};

/// A named link with `{placeholder}` substitutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTemplate {
    pub name: String,
    pub url: String,
}

impl LinkTemplate {
    pub fn render(&self, vars: &[(&str, &str)]) -> Link {
        Link {
            name: self.name.clone(),
            url: render_template(&self.url, vars),
        }
    }
}

/// A rendered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// Link templates grouped by where they are shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub email_breach: Vec<LinkTemplate>,
    pub email_social: Vec<LinkTemplate>,
    pub domain: Vec<LinkTemplate>,
    pub phone: Vec<LinkTemplate>,
    pub ip: Vec<LinkTemplate>,
    pub username_search: Vec<LinkTemplate>,
    pub photo_reverse_search: Vec<LinkTemplate>,
}

/// Render every template in a group.
pub fn render_all(templates: &[LinkTemplate], vars: &[(&str, &str)]) -> Vec<Link> {
    templates.iter().map(|t| t.render(vars)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_render_ip_resources() {
        let catalog = Catalog::builtin().unwrap();
        let links = render_all(&catalog.resources.ip, &[("ip", "8.8.8.8")]);
        assert_eq!(links[0].url, "https://ipinfo.io/8.8.8.8");
        assert!(links.iter().all(|l| !l.url.contains("{ip}")));
    }
}
