//! Standalone HTML rendering of a comparison

use crate::asset::Asset;
use crate::diff::ComparisonResult;
use crate::vcs::Commit;

use super::ReportMetadata;

const STYLE: &str = r#"
        body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #333; background: #f8f9fa; }
        h1, h2 { color: #2c3e50; }
        .card { background: #fff; padding: 1.5rem; border: 1px solid #ddd; border-radius: 8px; margin-bottom: 2rem; }
        .metadata p { margin: 0.5rem 0; }
        .summary { display: flex; gap: 2rem; margin-bottom: 2rem; }
        .stat { flex: 1; min-width: 150px; text-align: center; background: #fff; padding: 1.5rem; border: 1px solid #ddd; border-radius: 8px; }
        .stat-val { font-size: 2rem; font-weight: bold; }
        .added { color: #28a745; }
        .removed { color: #dc3545; }
        .modified { color: #ffc107; }
        .warning { border-color: #ffc107; }
        table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
        th, td { text-align: left; padding: 12px; border-bottom: 1px solid #eee; }
        th { background: #f1f1f1; }
        .mono { font-family: monospace; }
        .tag { padding: 4px 8px; border-radius: 12px; font-size: 0.85em; color: #fff; display: inline-block; }
        .bg-added { background: #28a745; }
        .bg-removed { background: #dc3545; }
        .bg-modified { background: #ffc107; }
"#;

/// Escape text for use in HTML element content and attribute values
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full report page
#[must_use]
pub fn render_html(
    result: &ComparisonResult,
    metadata: &ReportMetadata,
    commits: &[Commit],
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Branch Compare: {}</title>\n<style>{STYLE}</style>\n",
        escape(&metadata.repo_name)
    ));
    html.push_str("</head>\n<body>\n<h1>Code Comparison Report</h1>\n");

    html.push_str(&metadata_card(metadata));
    html.push_str(&summary_cards(result));
    if !result.duplicates.is_empty() {
        html.push_str(&duplicates_card(result));
    }
    if !commits.is_empty() {
        html.push_str(&commits_card(metadata, commits));
    }
    html.push_str(&differences_card(result));

    html.push_str("</body>\n</html>\n");
    html
}

fn metadata_card(metadata: &ReportMetadata) -> String {
    let mut card = String::from("<div class=\"card metadata\">\n");
    card.push_str(&format!(
        "<p><strong>Scenario:</strong> {}</p>\n",
        escape(metadata.scenario.label())
    ));
    card.push_str(&format!(
        "<p><strong>{}:</strong> <b>{}</b> {}</p>\n",
        escape(&metadata.source_label),
        escape(&metadata.base_label),
        escape(&metadata.source_suffix())
    ));
    card.push_str(&format!(
        "<p><strong>{}:</strong> <b>{}</b> {}</p>\n",
        escape(&metadata.target_label),
        escape(&metadata.head_label),
        escape(&metadata.target_suffix())
    ));
    if let Some(path) = &metadata.local_packages {
        card.push_str(&format!(
            "<p><strong>Local Packages:</strong> {}</p>\n",
            escape(&path.display().to_string())
        ));
    }
    if let Some(path) = &metadata.local_properties {
        card.push_str(&format!(
            "<p><strong>Local Properties:</strong> {}</p>\n",
            escape(&path.display().to_string())
        ));
    }
    card.push_str(&format!(
        "<p><strong>Repository:</strong> {}</p>\n",
        escape(&metadata.repo_url)
    ));
    card.push_str(&format!(
        "<p><strong>Date:</strong> {}</p>\n<p><strong>Run:</strong> <span class=\"mono\">{}</span></p>\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        escape(&metadata.run_id)
    ));
    card.push_str("</div>\n");
    card
}

fn summary_cards(result: &ComparisonResult) -> String {
    let summary = result.summary();
    let stat = |class: &str, count: usize, label: &str| {
        format!(
            "<div class=\"stat\"><div class=\"stat-val {class}\">{count}</div><div>{label}</div></div>\n"
        )
    };
    let mut cards = String::from("<div class=\"summary\">\n");
    cards.push_str(&stat("added", summary.added, "Added Assets"));
    cards.push_str(&stat("removed", summary.removed, "Removed Assets"));
    cards.push_str(&stat("modified", summary.modified, "Modified Assets"));
    cards.push_str("</div>\n");
    cards
}

fn duplicates_card(result: &ComparisonResult) -> String {
    let mut card = String::from(
        "<div class=\"card warning\">\n<h2>Duplicate Identities</h2>\n\
         <p>These identities occurred more than once in one snapshot; the last occurrence was compared.</p>\n\
         <table>\n<thead><tr><th>Snapshot</th><th>Identity</th><th>Occurrences</th></tr></thead>\n<tbody>\n",
    );
    for dup in &result.duplicates {
        card.push_str(&format!(
            "<tr><td>{}</td><td class=\"mono\">{}</td><td>{}</td></tr>\n",
            dup.side,
            escape(dup.asset_id.as_str()),
            dup.occurrences
        ));
    }
    card.push_str("</tbody>\n</table>\n</div>\n");
    card
}

fn commits_card(metadata: &ReportMetadata, commits: &[Commit]) -> String {
    let mut card = format!(
        "<div class=\"card\">\n<h2>Commit Log ({} commits)</h2>\n\
         <p>Commits present in <b>{}</b> on {} but not in <b>{}</b> on {}.</p>\n\
         <table>\n<thead><tr><th>#</th><th>Hash</th><th>Author</th><th>Date</th><th>Message</th><th>Changes</th></tr></thead>\n<tbody>\n",
        commits.len(),
        escape(&metadata.head_label),
        escape(&metadata.repo_name),
        escape(&metadata.base_label),
        escape(&metadata.repo_name)
    );
    for (i, commit) in commits.iter().enumerate() {
        let changes = if commit.changes.is_empty() {
            "No file changes detected".to_string()
        } else {
            commit
                .changes
                .iter()
                .map(|c| format!("<b>{}</b> {}", escape(&c.status), escape(&c.path)))
                .collect::<Vec<_>>()
                .join("<br>")
        };
        card.push_str(&format!(
            "<tr><td>{}</td><td class=\"mono\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            escape(&commit.hash),
            escape(&commit.author),
            escape(&commit.date),
            escape(&commit.message),
            changes
        ));
    }
    card.push_str("</tbody>\n</table>\n</div>\n");
    card
}

fn differences_card(result: &ComparisonResult) -> String {
    let mut card = String::from(
        "<div class=\"card\">\n<h2>Asset Differences</h2>\n\
         <table>\n<thead><tr><th>Status</th><th>Type</th><th>Name</th><th>Details</th></tr></thead>\n<tbody>\n",
    );
    for asset in &result.added {
        card.push_str(&row("added", "Added", asset, &describe(asset)));
    }
    for asset in &result.removed {
        card.push_str(&row("removed", "Removed", asset, &describe(asset)));
    }
    for change in &result.modified {
        let details = format!(
            "{} &rarr; {}",
            short_fingerprint(&change.base),
            short_fingerprint(&change.head)
        );
        card.push_str(&row("modified", "Modified", &change.base, &details));
    }
    card.push_str("</tbody>\n</table>\n</div>\n");
    card
}

fn row(class: &str, status: &str, asset: &Asset, details: &str) -> String {
    format!(
        "<tr><td><span class=\"tag bg-{class}\">{status}</span></td><td>{}</td><td>{}</td><td class=\"mono\">{details}</td></tr>\n",
        asset.kind(),
        escape(asset.name())
    )
}

/// Kind-specific context for added and removed rows
fn describe(asset: &Asset) -> String {
    match asset {
        Asset::Package(package) => format!("{} services", package.services().len()),
        Asset::Service(service) => format!("in {}", escape(service.package_name())),
        Asset::Properties(properties) => format!("env {}", properties.environment()),
    }
}

fn short_fingerprint(asset: &Asset) -> String {
    asset
        .fingerprint()
        .map_or_else(|| "unreadable".to_string(), |fp| fp.short(12).to_string())
}
