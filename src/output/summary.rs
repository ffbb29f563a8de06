use std::collections::BTreeMap;
use std::fmt::Write;

use crate::pipeline::PipelineView;

use super::styling::{bright, bright_yellow, cyan, dim, status_style};
use super::tables::{color_coded_status_cell, create_table, cyan_header, time_cell};

/// Prints a human-readable overview of pipeline views to stdout.
///
/// Displays:
/// - Overview: pipeline count, locale, and a per-status breakdown
/// - Pipelines: one row per pipeline with its ref, relative creation time,
///   duration, absolute creation time and first line of the commit message
pub fn print_pipelines(views: &[PipelineView], locale: &str) {
    println!("{}", render_pipelines(views, locale));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", bright(emoji), bright(title).underlined());
}

fn status_counts(views: &[PipelineView]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for view in views {
        *counts.entry(view.status).or_insert(0) += 1;
    }
    counts
}

fn render_pipelines(views: &[PipelineView], locale: &str) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📊", "Overview");

    let breakdown = status_counts(views)
        .into_iter()
        .map(|(status, count)| format!("{} {}", status_style(status), count))
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(
        output,
        "  {} {}\n  {} {}\n  {} {}\n",
        dim("Pipelines:"),
        bright_yellow(views.len()),
        dim("Locale:"),
        cyan(locale),
        dim("Statuses:"),
        breakdown
    );

    if views.is_empty() {
        let _ = writeln!(output, "{}", bright_yellow("No pipeline data found."));
        return output;
    }

    add_section_header(&mut output, "📋", "Pipelines");

    let mut table = create_table();
    table.set_header(cyan_header(&[
        "#", "Status", "Ref", "Since", "Duration", "Created", "Message",
    ]));

    for view in views {
        let title = if view.pr_title.is_empty() {
            &view.short_message
        } else {
            &view.pr_title
        };

        table.add_row(vec![
            comfy_table::Cell::new(view.number),
            color_coded_status_cell(view.status),
            comfy_table::Cell::new(&view.pretty_ref),
            time_cell(&view.since),
            time_cell(&view.duration),
            time_cell(view.created.as_deref().unwrap_or(crate::pipeline::PLACEHOLDER)),
            comfy_table::Cell::new(title),
        ]);
    }

    let _ = writeln!(output, "{table}");
    output
}

/// One-line description of a pipeline for the live spinner.
pub fn render_live_line(view: &PipelineView) -> String {
    format!(
        "#{} {} · {} · {} · {}",
        view.number, view.status, view.pretty_ref, view.duration, view.since
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(number: u64, status: &'static str) -> PipelineView {
        PipelineView {
            number,
            status,
            since: "3h ago".to_string(),
            duration: "2m 5s".to_string(),
            message: "fix parser\nbody".to_string(),
            short_message: "fix parser".to_string(),
            pr_title: String::new(),
            pr_title_with_description: String::new(),
            pretty_ref: "main".to_string(),
            created: None,
        }
    }

    #[test]
    fn test_status_counts() {
        let views = vec![view(1, "success"), view(2, "failure"), view(3, "success")];
        let counts = status_counts(&views);
        assert_eq!(counts.get("success"), Some(&2));
        assert_eq!(counts.get("failure"), Some(&1));
    }

    #[test]
    fn test_render_pipelines_contains_rows() {
        let output = render_pipelines(&[view(7, "success")], "en");
        assert!(output.contains("Overview"));
        assert!(output.contains("fix parser"));
        assert!(output.contains("2m 5s"));
        assert!(output.contains("main"));
    }

    #[test]
    fn test_render_pipelines_empty() {
        let output = render_pipelines(&[], "en");
        assert!(output.contains("No pipeline data found."));
    }

    #[test]
    fn test_render_live_line() {
        assert_eq!(
            render_live_line(&view(7, "running")),
            "#7 running · main · 2m 5s · 3h ago"
        );
    }
}
