use repostats_series::PageData;
use repostats_vis::dashboard::Dashboard;
use repostats_vis::dashboard::DashboardConfig;
use repostats_vis::render::Render;
use repostats_vis::render::output::OutputFile;

use crate::cli::PathExt;
use crate::cli::RenderArgs;
use crate::error::CliError;

pub(crate) async fn render(args: RenderArgs) -> Result<(), CliError> {
    let output_path = args.output_path.or_current_dir()?;
    let client = args.endpoint.client()?;

    let config = match args.page_data {
        Some(path) => {
            let data = PageData::from_path(&path)?;
            let repo = if args.endpoint.names_repo() {
                args.endpoint.repo_id(None, None)?
            } else {
                let payload = client.fetch_stats(false).await?;
                args.endpoint.repo_id(payload.owner, payload.repo)?
            };

            DashboardConfig {
                stars_by_day: data.stars_by_day,
                issues_by_day: data.issues_by_day,
                pulls_by_day: data.pulls_by_day,
                owner: repo.owner,
                repo: repo.repo,
                endpoint_url: args.endpoint.url.clone(),
            }
        }
        None => {
            let payload = client.fetch_stats(false).await?;
            let repo = args.endpoint.repo_id(payload.owner, payload.repo)?;

            DashboardConfig {
                stars_by_day: payload.stargazers.unwrap_or_default(),
                issues_by_day: payload.open_issues.unwrap_or_default(),
                pulls_by_day: payload.open_pulls.unwrap_or_default(),
                owner: repo.owner,
                repo: repo.repo,
                endpoint_url: args.endpoint.url.clone(),
            }
        }
    };

    println!(
        "repostats renders the `{}/{}` dashboard into: `{}`",
        config.owner,
        config.repo,
        output_path.display()
    );

    let mut dashboard = Dashboard::init(config);
    dashboard.load_labels(&client).await;

    let mut output = OutputFile::new(&output_path)?;
    dashboard.render(&mut output)?;
    let path = output.finish()?;

    tracing::info!(path = %path.display(), labels = %dashboard.status(), "dashboard written");

    Ok(())
}
