//! CLI for BookScene - book passages to Imagen scenes.

use bookscene::prompt::{sample_passage, StyleField, SAMPLE_PASSAGES};
use bookscene::{
    compose_prompt, GenerationRequest, ImageProvider, ImagenModel, ImagenProvider, StyleOptions,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bookscene")]
#[command(about = "Visualize book passages as images via Vertex AI Imagen")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the Imagen prompt without calling the service
    Compose(ComposeArgs),

    /// Generate scene images from a passage
    Generate(GenerateArgs),

    /// List the style options for every field
    Options,

    /// List the built-in sample passages
    Samples,
}

#[derive(Args)]
struct PassageArgs {
    /// The passage describing the scene (free text)
    passage: Option<String>,

    /// Prefill the passage from a named sample (see `bookscene samples`)
    #[arg(short, long)]
    sample: Option<String>,
}

#[derive(Args)]
struct StyleArgs {
    /// Art style, e.g. "수채화 일러스트"
    #[arg(long, value_parser = parse_art_style)]
    art_style: Option<String>,

    /// Mood, e.g. "어둡고 미스터리한"
    #[arg(long, value_parser = parse_mood)]
    mood: Option<String>,

    /// Colour palette, e.g. "파스텔"
    #[arg(long, value_parser = parse_palette)]
    palette: Option<String>,

    /// Detail level, e.g. "초고해상도"
    #[arg(long, value_parser = parse_detail)]
    detail: Option<String>,

    /// Camera framing, e.g. "클로즈업"
    #[arg(long, value_parser = parse_camera)]
    camera: Option<String>,

    /// Era / setting, e.g. "사이버펑크"
    #[arg(long, value_parser = parse_era)]
    era: Option<String>,
}

#[derive(Args)]
struct ComposeArgs {
    #[command(flatten)]
    passage: PassageArgs,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    passage: PassageArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Output file path (extras are numbered alongside it)
    #[arg(short, long, default_value = "scene.png")]
    output: PathBuf,

    /// How many images to request (1-4)
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Aspect ratio (e.g. 1:1, 16:9, 9:16)
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// GCP project ID (defaults to VERTEX_AI_PROJECT)
    #[arg(long)]
    project: Option<String>,

    /// GCP location (defaults to VERTEX_AI_LOCATION, then us-central1)
    #[arg(long)]
    location: Option<String>,

    /// Imagen model variant
    #[arg(long, value_enum, default_value = "imagen-4")]
    model: ModelArg,

    /// Service-account key file to verify before any request
    #[arg(long)]
    credentials: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    #[value(name = "imagen-4")]
    Imagen4,
    #[value(name = "imagen-4-fast")]
    Imagen4Fast,
    #[value(name = "imagen-4-ultra")]
    Imagen4Ultra,
}

impl From<ModelArg> for ImagenModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Imagen4 => ImagenModel::Imagen4,
            ModelArg::Imagen4Fast => ImagenModel::Imagen4Fast,
            ModelArg::Imagen4Ultra => ImagenModel::Imagen4Ultra,
        }
    }
}

fn validate_choice(field: StyleField, value: &str) -> Result<String, String> {
    if field.is_valid_choice(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "not a {} option; valid values: {}",
            field.label(),
            field.choices().join(", ")
        ))
    }
}

fn parse_art_style(s: &str) -> Result<String, String> {
    validate_choice(StyleField::ArtStyle, s)
}
fn parse_mood(s: &str) -> Result<String, String> {
    validate_choice(StyleField::Mood, s)
}
fn parse_palette(s: &str) -> Result<String, String> {
    validate_choice(StyleField::ColorPalette, s)
}
fn parse_detail(s: &str) -> Result<String, String> {
    validate_choice(StyleField::DetailLevel, s)
}
fn parse_camera(s: &str) -> Result<String, String> {
    validate_choice(StyleField::CameraFocus, s)
}
fn parse_era(s: &str) -> Result<String, String> {
    validate_choice(StyleField::Era, s)
}

impl StyleArgs {
    fn to_options(&self) -> StyleOptions {
        let mut options = StyleOptions::new();
        if let Some(ref v) = self.art_style {
            options = options.with_art_style(v);
        }
        if let Some(ref v) = self.mood {
            options = options.with_mood(v);
        }
        if let Some(ref v) = self.palette {
            options = options.with_color_palette(v);
        }
        if let Some(ref v) = self.detail {
            options = options.with_detail_level(v);
        }
        if let Some(ref v) = self.camera {
            options = options.with_camera_focus(v);
        }
        if let Some(ref v) = self.era {
            options = options.with_era(v);
        }
        options
    }
}

impl PassageArgs {
    /// Resolves the passage text, preferring explicit text over a sample.
    fn resolve(&self) -> anyhow::Result<String> {
        if let Some(ref passage) = self.passage {
            return Ok(passage.clone());
        }
        if let Some(ref label) = self.sample {
            return sample_passage(label).map(str::to_string).ok_or_else(|| {
                let known: Vec<&str> = SAMPLE_PASSAGES.iter().map(|(name, _)| *name).collect();
                anyhow::anyhow!("unknown sample '{}'; known samples: {}", label, known.join(", "))
            });
        }
        Ok(String::new())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookscene=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compose(args) => {
            compose(args, cli.json)?;
        }
        Commands::Generate(args) => {
            generate(args, cli.json).await?;
        }
        Commands::Options => {
            list_options(cli.json)?;
        }
        Commands::Samples => {
            list_samples(cli.json)?;
        }
    }

    Ok(())
}

fn compose(args: ComposeArgs, json_output: bool) -> anyhow::Result<()> {
    let passage = args.passage.resolve()?;
    let options = args.style.to_options();
    let prompt = compose_prompt(&passage, &options);

    if json_output {
        let result = serde_json::json!({
            "prompt": prompt,
            "empty": prompt.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{prompt}");
    }
    Ok(())
}

async fn generate(args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let passage = args.passage.resolve()?;
    if passage.trim().is_empty() {
        anyhow::bail!("passage is empty; provide a passage or --sample before generating");
    }

    let options = args.style.to_options();
    let prompt = compose_prompt(&passage, &options);

    let mut builder = ImagenProvider::builder().model(args.model.into());
    if let Some(project) = args.project {
        builder = builder.project(project);
    }
    if let Some(location) = args.location {
        builder = builder.location(location);
    }
    if let Some(credentials) = args.credentials {
        builder = builder.credentials(credentials);
    }
    let provider = builder.build()?;

    let mut request = GenerationRequest::new(&prompt).with_sample_count(args.count);
    if let Some(ratio) = args.aspect_ratio {
        request = request.with_aspect_ratio(ratio);
    }

    eprintln!("Generating with {}...", provider.name());
    let images = provider.generate(&request).await?;

    let mut saved = Vec::new();
    for (index, image) in images.iter().enumerate() {
        let path = numbered_path(&args.output, index);
        image.save(&path)?;
        saved.push(path);
    }

    let first = &images[0];
    if json_output {
        let result = serde_json::json!({
            "success": true,
            "prompt": prompt,
            "outputs": saved.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            "size_bytes": first.size(),
            "format": first.format.extension(),
            "model": first.metadata.model,
            "duration_ms": first.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Prompt: {prompt}");
        for (path, image) in saved.iter().zip(&images) {
            println!("Saved {} ({} bytes)", path.display(), image.size());
        }
        if let Some(duration) = first.metadata.duration_ms {
            println!("Duration: {duration}ms");
        }
    }

    Ok(())
}

/// `scene.png` stays as-is for the first image; extras become `scene_2.png`.
fn numbered_path(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene");
    let name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, index + 1, ext),
        None => format!("{}_{}", stem, index + 1),
    };
    base.with_file_name(name)
}

fn list_options(json_output: bool) -> anyhow::Result<()> {
    if json_output {
        let fields: Vec<serde_json::Value> = StyleField::ALL
            .iter()
            .map(|field| {
                serde_json::json!({
                    "label": field.label(),
                    "sentinel": field.sentinel(),
                    "choices": field.choices(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else {
        for field in StyleField::ALL {
            println!("{}:", field.label());
            for choice in field.choices() {
                if *choice == field.sentinel() {
                    println!("  {} (default)", choice);
                } else {
                    println!("  {}", choice);
                }
            }
            println!();
        }
    }
    Ok(())
}

fn list_samples(json_output: bool) -> anyhow::Result<()> {
    if json_output {
        let samples: Vec<serde_json::Value> = SAMPLE_PASSAGES
            .iter()
            .map(|(label, passage)| serde_json::json!({ "label": label, "passage": passage }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        for (label, passage) in SAMPLE_PASSAGES {
            println!("{label}:");
            println!("  {passage}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_path() {
        let base = PathBuf::from("out/scene.png");
        assert_eq!(numbered_path(&base, 0), PathBuf::from("out/scene.png"));
        assert_eq!(numbered_path(&base, 1), PathBuf::from("out/scene_2.png"));
        assert_eq!(
            numbered_path(&PathBuf::from("scene"), 2),
            PathBuf::from("scene_3")
        );
    }

    #[test]
    fn test_style_choice_validation() {
        assert!(parse_art_style("유화").is_ok());
        assert!(parse_art_style("기본").is_ok());
        assert!(parse_art_style("not-a-style").is_err());
        assert!(parse_era("현대").is_ok());
        assert!(parse_era("유화").is_err());
    }

    #[test]
    fn test_passage_resolution() {
        let explicit = PassageArgs {
            passage: Some("A dark castle.".into()),
            sample: None,
        };
        assert_eq!(explicit.resolve().unwrap(), "A dark castle.");

        let sampled = PassageArgs {
            passage: None,
            sample: Some("SF 우주 정거장".into()),
        };
        assert!(sampled.resolve().unwrap().contains("푸른 행성"));

        let unknown = PassageArgs {
            passage: None,
            sample: Some("없는 장면".into()),
        };
        assert!(unknown.resolve().is_err());

        let neither = PassageArgs {
            passage: None,
            sample: None,
        };
        assert_eq!(neither.resolve().unwrap(), "");
    }
}
