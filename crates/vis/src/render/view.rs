use html_escape::encode_double_quoted_attribute;
use html_escape::encode_text;
use serde::Serialize;

use crate::chart::Chart;
use crate::dashboard::Dashboard;
use crate::dashboard::LabelStatus;
use crate::error::Result;
use crate::format;
use crate::id::ContainerId;
use crate::render::OutputStream;
use crate::render::Render;
use crate::template::PageContext;
use crate::template::PageTemplate;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em; }
.chart { width: 800px; height: 300px; margin-bottom: 2em; }
#by-label-legend { margin-bottom: 1em; }
#current-labels td:first-child { text-align: right; padding-right: 1em; }
"#;

// Chart rows carry dates as milliseconds (or null for an invalid date) and
// formatters by name; both are resolved in the browser.
const CHART_SCRIPT: &str = r#"
function toDates(rows) {
  rows.forEach(function(row) { row[0] = new Date(row[0] === null ? NaN : row[0]); });
  return rows;
}
function withFormatters(options) {
  var axes = options.axes || {};
  Object.keys(axes).forEach(function(name) {
    var formatter = axes[name].valueFormatter;
    if (typeof formatter === 'string' && typeof window[formatter] === 'function') {
      axes[name].valueFormatter = window[formatter];
    }
  });
  return options;
}
"#;

impl Render for Dashboard {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let mut charts = String::new();
        for chart in &self.charts {
            chart.render(&mut charts)?;
        }

        let mut labels = String::new();
        LabelSection(self).render(&mut labels)?;

        let context = PageContext {
            title: format!("{} statistics", self.repo),
            repo_name: self.repo.to_string(),
            repo_url: self.repo.url(),
            endpoint_url: &self.endpoint_url,
            style: STYLE,
            script: format!("{}{CHART_SCRIPT}", format::DATE_FORMATTER_SCRIPT),
            charts,
            labels,
        };

        let page = PageTemplate::new()?.render(&context)?;
        output.write(&page)
    }
}

impl Render for Chart {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let id = self.container();
        let data = script_json(self.data())?;
        let options = script_json(self.options())?;

        output.write(&format!(
            r#"
<div id="{id}" class="chart"></div>
<script>
  new Dygraph(document.getElementById("{id}"), toDates({data}), withFormatters({options}));
</script>
"#,
        ))
    }
}

struct LabelSection<'a>(&'a Dashboard);

impl Render for LabelSection<'_> {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let dashboard = self.0;

        output.write(r#"<section id="labels-section">"#)?;
        output.write("<h2>Open issues by label</h2>")?;

        output.write(&format!(
            r#"<p id="{id}"{hidden}>Loading labels&hellip;</p>"#,
            id = ContainerId::LABELS_LOADING_MESSAGE,
            hidden = hidden(!dashboard.loading_message_visible()),
        ))?;

        let reason = match dashboard.status() {
            LabelStatus::Failed(reason) => reason.as_str(),
            LabelStatus::Loading | LabelStatus::Loaded => "",
        };
        output.write(&format!(
            r#"<p id="{id}"{hidden}>Could not load labels: {reason}</p>"#,
            id = ContainerId::LABELS_FAILED_MESSAGE,
            hidden = hidden(!dashboard.failed_message_visible()),
            reason = encode_text(reason),
        ))?;

        output.write(&format!(
            r#"<div id="{id}"{hidden}>"#,
            id = ContainerId::LABELS_CHARTS,
            hidden = hidden(!dashboard.label_charts_visible()),
        ))?;

        if let Some(chart) = dashboard.label_chart() {
            chart.render(output)?;
        }

        output.write(&format!(
            r#"<div id="{id}"></div>"#,
            id = ContainerId::LABELS_LEGEND
        ))?;

        output.write(&format!(
            r#"<div id="{id}"><table>"#,
            id = ContainerId::CURRENT_LABELS
        ))?;

        if let Some(millis) = dashboard.labels_as_of().and_then(|d| d.timestamp_millis()) {
            output.write(&format!(
                "<caption>Open issues as of {}</caption>",
                format::format_date(millis)
            ))?;
        }

        output.write("<thead><tr><th>Count</th><th>Label</th></tr></thead>")?;
        output.write("<tbody>")?;

        // One batch, in ranked order.
        let mut rows = String::new();
        for count in dashboard.label_table().rows() {
            rows.push_str(&format!(
                r#"<tr><td>{count}</td><td><a href="{url}">{label}</a></td></tr>"#,
                count = count.count,
                url = encode_double_quoted_attribute(&count.url(dashboard.repo())),
                label = encode_text(&count.label),
            ));
        }
        output.write(&rows)?;

        output.write("</tbody></table></div>")?;
        output.write("</div>")?;
        output.write("</section>")
    }
}

fn hidden(is_hidden: bool) -> &'static str {
    if is_hidden { " hidden" } else { "" }
}

// JSON that is safe to embed in a <script> element.
fn script_json<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    Ok(json.replace('<', "\\u003c"))
}
