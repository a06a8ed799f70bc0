use console_core::{AppViewModel, DownloadStatus, EnrichedJobRow, ModalContent};

const HEADERS: [&str; 9] = [
    "", "UUID", "NAME", "PROVIDER", "PUBLISHER", "CREATED", "COMPLETED", "DURATION", "STATUS",
];

pub fn startup_failure(reason: &str) -> String {
    format!("Console unavailable: startup failed.\n  {reason}\nCheck the backend and try again.")
}

pub fn about(view: &AppViewModel) -> String {
    match &view.about {
        Some(about) => format!("{} {}", about.application_name, about.version),
        None => "(application info not loaded)".to_string(),
    }
}

fn row_cells(row: &EnrichedJobRow) -> [String; 9] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        row.status.icon.symbol().to_string(),
        row.uuid.clone(),
        row.name.clone(),
        row.provider.to_string(),
        row.publisher
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        text(&row.created),
        text(&row.completed),
        text(&row.duration),
        row.status.label.text.clone(),
    ]
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn jobs_table(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.jobs.is_empty() {
        out.push_str("No jobs.\n");
    } else {
        let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        let rows: Vec<[String; 9]> = view.jobs.iter().map(row_cells).collect();
        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        push_line(&mut out, &header, &widths);
        for cells in &rows {
            push_line(&mut out, cells, &widths);
        }
    }
    if let Some(error) = &view.jobs_error {
        out.push_str(&format!("! Job list failed: {error}\n"));
    }
    out.trim_end().to_string()
}

pub fn detail(view: &AppViewModel) -> String {
    let Some(detail) = &view.detail else {
        return "(no job selected)".to_string();
    };
    let width = detail
        .fields
        .iter()
        .map(|field| field.name.len())
        .max()
        .unwrap_or(0);
    let mut lines: Vec<String> = detail
        .fields
        .iter()
        .map(|field| format!("{:>width$}: {}", field.name, field.value))
        .collect();
    lines.push(format!(
        "{:>width$}: {} {}",
        "status",
        detail.status.icon.symbol(),
        detail.status.label.text
    ));
    lines.join("\n")
}

pub fn modal(view: &AppViewModel) -> String {
    let Some(modal) = &view.modal else {
        return String::new();
    };
    let mut out = format!("== {} ==\n", modal.title);
    if let Some(decoded) = modal.decode_toggle {
        out.push_str(if decoded { "[decode: on]\n" } else { "[decode: off]\n" });
    }
    match &modal.content {
        ModalContent::Loading => out.push_str("(loading)"),
        ModalContent::Loaded(text) => out.push_str(text),
        ModalContent::Failed { message } => {
            out.push_str(&format!("Error: {message} (retry available)"))
        }
    }
    out
}

pub fn download(view: &AppViewModel) -> String {
    match &view.download {
        None => String::new(),
        Some(DownloadStatus::InFlight { uuid, api }) => format!("Downloading {api} of {uuid}"),
        Some(DownloadStatus::Saved { location }) => format!("Saved to {location}"),
        Some(DownloadStatus::Failed { message }) => format!("Download failed: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::{
        enrich, AppViewModel, ApplicationInfo, JobRecord, JobState, ModalView,
        PluginDescriptor, PluginDirectory, PluginKind,
    };
    use pretty_assertions::assert_eq;

    fn view_with_jobs() -> AppViewModel {
        let directory = PluginDirectory::new(
            vec![PluginDescriptor::new(PluginKind::Provider, "p1", "Provider One")],
            vec![],
        );
        let mut record = JobRecord::new("u1", "p1");
        record.name = "nightly".into();
        record.created = Some(1000);
        record.completed = Some(1000 + 3_600_000);
        record.state = JobState::Completed;
        record.success = Some(false);
        AppViewModel {
            about: Some(ApplicationInfo {
                application_name: "Job Controller".into(),
                version: "1.0".into(),
            }),
            jobs: enrich(&directory, &[record]),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn about_line() {
        assert_eq!(about(&view_with_jobs()), "Job Controller 1.0");
    }

    #[test]
    fn table_lists_enriched_rows() {
        let table = jobs_table(&view_with_jobs());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("UUID"));
        assert!(lines[1].contains("Provider One"));
        assert!(lines[1].contains("60 min"));
        assert!(lines[1].ends_with("Failed"));
    }

    #[test]
    fn empty_table_with_error_banner() {
        let view = AppViewModel {
            jobs_error: Some("network error".into()),
            ..AppViewModel::default()
        };
        assert_eq!(jobs_table(&view), "No jobs.\n! Job list failed: network error");
    }

    #[test]
    fn modal_shows_toggle_and_retryable_error() {
        let view = AppViewModel {
            modal: Some(ModalView {
                title: "Result".into(),
                api: "/result".into(),
                decode_toggle: Some(true),
                content: ModalContent::Failed {
                    message: "timeout".into(),
                },
            }),
            ..AppViewModel::default()
        };
        assert_eq!(
            modal(&view),
            "== Result ==\n[decode: on]\nError: timeout (retry available)"
        );
    }
}
