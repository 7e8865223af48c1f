use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::error::Result;

const INDEX: &str = "index";

pub(crate) struct PageTemplate<'a> {
    template: TinyTemplate<'a>,
}

impl PageTemplate<'static> {
    pub fn new() -> Result<PageTemplate<'static>> {
        let mut template = TinyTemplate::new();
        template.add_template(INDEX, include_str!("./template/index.html.tt"))?;

        Ok(Self { template })
    }
}

impl PageTemplate<'_> {
    pub fn render(&self, context: &PageContext) -> Result<String> {
        let page = self.template.render(INDEX, context)?;
        Ok(page)
    }
}

/// The values the page template is filled with. `style`, `script`,
/// `charts` and `labels` are inserted without escaping.
#[derive(Serialize)]
pub(crate) struct PageContext<'a> {
    pub title: String,
    pub repo_name: String,
    pub repo_url: String,
    pub endpoint_url: &'a str,
    pub style: &'static str,
    pub script: String,
    pub charts: String,
    pub labels: String,
}
