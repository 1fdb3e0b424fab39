use {skilldex_common::CatalogEntry, skilldex_config::LinksConfig};

/// Install-command and source-URL templates. `{name}` and `{path}` are
/// replaced with the entry's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplates {
    install_command: String,
    source_url: String,
}

impl LinkTemplates {
    pub fn new(install_command: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            install_command: install_command.into(),
            source_url: source_url.into(),
        }
    }

    pub fn from_config(config: &LinksConfig) -> Self {
        Self::new(config.install_command.clone(), config.source_url.clone())
    }

    pub fn install_command(&self, entry: &CatalogEntry) -> String {
        render(&self.install_command, entry)
    }

    pub fn source_url(&self, entry: &CatalogEntry) -> String {
        render(&self.source_url, entry)
    }
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self::from_config(&LinksConfig::default())
    }
}

fn render(template: &str, entry: &CatalogEntry) -> String {
    template
        .replace("{name}", &entry.name)
        .replace("{path}", &entry.path)
}

#[cfg(test)]
mod tests {
    use {super::*, skilldex_common::Language};

    #[test]
    fn default_templates_render() {
        let entry = CatalogEntry {
            name: "azure-cosmos-py".into(),
            description: "d".into(),
            language: Language::Py,
            category: "data".into(),
            path: ".github/plugins/azure-sdk-python/skills/azure-cosmos-py".into(),
            package: None,
        };
        let links = LinkTemplates::default();
        assert_eq!(
            links.install_command(&entry),
            "npx skills add microsoft/agent-skills --skill azure-cosmos-py"
        );
        assert_eq!(
            links.source_url(&entry),
            "https://github.com/microsoft/agent-skills/tree/main/.github/plugins/azure-sdk-python/skills/azure-cosmos-py"
        );
    }
}
