use repostats_series::LabelDataset;
use repostats_series::RepoId;
use repostats_vis::format::format_date;

use crate::cli::LabelsArgs;
use crate::error::CliError;

pub(crate) async fn labels(args: LabelsArgs) -> Result<(), CliError> {
    let client = args.endpoint.client()?;
    let payload = client.fetch_stats(true).await?;
    let repo = args.endpoint.repo_id(payload.owner, payload.repo)?;

    let Some(mut dataset) = payload.by_label else {
        return Err(CliError::Config(String::from(
            "the statistics endpoint did not return per-label counts",
        )));
    };
    dataset.normalize_dates();

    for line in report(&repo, &dataset) {
        println!("{line}");
    }

    Ok(())
}

/// A heading followed by one line per label: count, label and link, highest
/// count first.
fn report(repo: &RepoId, dataset: &LabelDataset) -> Vec<String> {
    let counts = dataset.current_counts();
    tracing::info!(%repo, labels = counts.len(), "fetched per-label issue counts");

    let heading = match dataset.last_date().and_then(|date| date.timestamp_millis()) {
        Some(millis) => format!("Open issues in {repo} as of {}", format_date(millis)),
        None => format!("Open issues in {repo}"),
    };

    let width = counts
        .iter()
        .map(|c| c.count.to_string().len())
        .max()
        .unwrap_or(1);

    let mut lines = vec![heading];
    lines.extend(counts.iter().map(|count| {
        format!(
            "{number:>width$}  {label}  {url}",
            number = count.count,
            label = count.label,
            url = count.url(repo),
        )
    }));

    lines
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use crate::cli::EndpointArgs;
    use crate::testing;
    use crate::testing::Route;

    #[test]
    fn report_lists_labels_highest_first() -> Result<(), serde_json::Error> {
        let mut dataset: LabelDataset = serde_json::from_str(
            r#"[["", "bug", "(unlabeled)"],
                ["2023-01-05 00:00:00Z", 3, 10],
                ["2023-01-06 00:00:00Z", 5, 12]]"#,
        )?;
        dataset.normalize_dates();

        let lines = report(&RepoId::new("danvk", "dygraphs"), &dataset);

        assert_eq!(
            lines,
            vec![
                "Open issues in danvk/dygraphs as of 2023/01/06",
                "12  (unlabeled)  https://github.com/danvk/dygraphs/issues?q=is%3Aopen+no%3Alabel",
                " 5  bug  https://github.com/danvk/dygraphs/labels/bug",
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_label_table_is_an_error() -> Result<(), Box<dyn Error>> {
        let url = testing::serve(vec![Route::new(
            "/danvk/dygraphs/json?include_labels=True",
            200,
            r#"{"owner": "danvk", "repo": "dygraphs"}"#,
        )])
        .await?;
        let args = LabelsArgs {
            endpoint: EndpointArgs {
                url,
                owner: None,
                repo: None,
                timeout_secs: Some(5),
            },
        };

        let result = labels(args).await;

        assert!(matches!(result, Err(CliError::Config(_))));

        Ok(())
    }
}
