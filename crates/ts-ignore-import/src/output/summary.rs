use tsignore_operations::operations::AddIgnoresOutput;

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

pub(crate) fn format_summary(output: &AddIgnoresOutput, dry_run: bool) -> String {
    if output.ignored.is_empty() {
        return format!(
            "No external dependencies found in {}",
            plural(output.source_file_count, "declaration file", "declaration files")
        );
    }

    let verb = if dry_run { "would update" } else { "updated" };
    format!(
        "Ignored {} in {}, {verb} {}",
        plural(output.ignored.len(), "dependency", "dependencies"),
        plural(output.source_file_count, "declaration file", "declaration files"),
        plural(output.modified_files.len(), "file", "files"),
    )
}
