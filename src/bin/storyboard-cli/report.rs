//! Human-readable output for the CLI.

use chrono::{DateTime, Utc};

use storyboard_flow::{Project, ProjectFormat};

fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{} ms", millis))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Prints project metadata and counts.
pub fn print_summary(project: &Project, format: ProjectFormat) {
    println!("Project:      {}", project.name);
    println!("Format:       {:?}", format);
    println!("Created:      {}", format_millis(project.created_at));
    println!("Modified:     {}", format_millis(project.modified_at));
    println!("Aspect ratio: {}", project.aspect_ratio);
    println!("Frame rate:   {} fps", project.frame_rate);
    println!("Panels:       {}", project.panels.len());
    println!("Characters:   {}", project.characters.len());
    println!("Running time: {:.1}s", project.total_duration());
}

/// Prints one line per panel.
pub fn print_panels(project: &Project) {
    println!(
        "{:>5}  {:<16}  {:<10}  {:<10}  {:>6}  {}",
        "order", "id", "shot", "move", "secs", "action"
    );
    for panel in &project.panels {
        println!(
            "{:>5}  {:<16}  {:<10}  {:<10}  {:>6.2}  {}",
            panel.order,
            panel.id,
            truncate(&panel.shot_type, 10),
            truncate(&panel.camera_move, 10),
            panel.duration,
            truncate(&panel.action_notes, 40)
        );
    }
}

/// Prints before/after sizes for a format conversion.
pub fn print_conversion_stats(project: &Project, input_bytes: u64, output_bytes: u64) {
    println!();
    println!("Conversion statistics:");
    println!("  Project: {}", project.name);
    println!();
    println!("  Input:      {:>10} bytes", input_bytes);
    println!("  Output:     {:>10} bytes", output_bytes);
    if output_bytes > 0 {
        println!(
            "  Ratio:      {:>10.2}x",
            input_bytes as f64 / output_bytes as f64
        );
    }
    println!();
    println!("  Panels:     {}", project.panels.len());
    println!("  Characters: {}", project.characters.len());
}
