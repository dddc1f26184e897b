use crate::OutputFormat;
use anyhow::Result;
use feedscrape_core::ItemRecord;
use feedscrape_core::artifact::Artifact;

pub fn print_artifact(artifact: &Artifact, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(artifact),
        OutputFormat::Table => {
            print!("{}", render_table(&artifact.videos));
            Ok(())
        }
        OutputFormat::Pretty => {
            output_pretty(artifact);
            Ok(())
        }
    }
}

fn output_pretty(artifact: &Artifact) {
    use console::style;

    if artifact.videos.is_empty() {
        println!("{}", style("No videos found.").yellow());
        return;
    }

    println!(
        "\n{} {}",
        style("Total videos collected:").bold().cyan(),
        artifact.videos.len()
    );
    println!("{}", style(format!("Scraped at {}", artifact.timestamp)).dim());

    for (idx, video) in artifact.videos.iter().enumerate() {
        println!("\n{}. {} {}", idx + 1, style("Title:").bold(), video.title);
        println!("   {} {}", style("URL:").bold(), video.url);
        println!("   {} {}", style("Duration:").bold(), video.duration_display);
        println!("   {} {}", style("Description:").bold(), video.description);
        match &video.thumbnail_url {
            Some(url) => println!("   {} {}", style("Thumbnail:").bold(), url),
            None => println!("   {} Not available", style("Thumbnail:").bold()),
        }
    }

    println!();
}

fn output_json(artifact: &Artifact) -> Result<()> {
    let json = serde_json::to_string_pretty(artifact)?;
    println!("{}", json);
    Ok(())
}

/// Comma-separated rows with a header line
pub fn render_table(videos: &[ItemRecord]) -> String {
    let mut out = String::from("Title,URL,Duration,Description,Thumbnail\n");
    for video in videos {
        let row = [
            video.title.as_str(),
            video.url.as_str(),
            video.duration_display.as_str(),
            video.description.as_str(),
            video.thumbnail_url.as_deref().unwrap_or(""),
        ];
        let row: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
