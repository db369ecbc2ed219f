//! Command handlers.

use dreamtales::{
    ArtifactReference, ArtifactStorage, DreamTalesConfig, DreamTalesResult, FileSystemStorage,
    GenerationRequest, OpenAiClient, PdfRenderer, SessionOutcome, SessionRegistry, StorageError,
    StorageErrorKind, StoryBundle, StoryLength, StoryOrchestrator, WordLimitedGenerator,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// What `dreamtales generate` was asked to do.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Topics, requested in order
    pub topics: Vec<String>,
    /// Length class for every topic
    pub length: StoryLength,
    /// Optional child name
    pub subject: Option<String>,
    /// Where to copy finished artifacts
    pub out: Option<PathBuf>,
    /// Persistent artifact directory
    pub storage: Option<PathBuf>,
}

/// Load settings from `path`, or from the layered locations.
pub fn load_config(path: Option<&Path>) -> DreamTalesResult<DreamTalesConfig> {
    match path {
        Some(path) => DreamTalesConfig::from_file(path),
        None => DreamTalesConfig::load(),
    }
}

/// Print the effective settings.
pub fn print_config(config: &DreamTalesConfig) -> DreamTalesResult<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

fn openai_client(base_url: Option<&str>) -> DreamTalesResult<Arc<OpenAiClient>> {
    let client = OpenAiClient::new()?;
    let client = match base_url {
        Some(url) => client.with_base_url(url),
        None => client,
    };
    Ok(Arc::new(client))
}

/// Request every topic in one session and report each outcome.
#[instrument(skip_all, fields(topics = options.topics.len(), length = %options.length))]
pub async fn run_generate(
    config: &DreamTalesConfig,
    options: &GenerateOptions,
    base_url: Option<&str>,
) -> DreamTalesResult<()> {
    let client = openai_client(base_url)?;

    let storage: Arc<FileSystemStorage> = match &options.storage {
        Some(dir) => Arc::new(FileSystemStorage::new(dir)?),
        None => Arc::new(FileSystemStorage::temporary()?),
    };
    info!(path = %storage.base_path().display(), "Artifact storage ready");

    let orchestrator = StoryOrchestrator::builder()
        .text(client.clone())
        .image(client.clone())
        .speech(client.clone())
        .fetcher(client)
        .renderer(Arc::new(PdfRenderer::new(config.render().clone())?))
        .storage(storage.clone())
        .models(config.models().clone())
        .pipeline(config.pipeline().clone())
        .build()?;

    let registry = SessionRegistry::new(
        Arc::new(orchestrator),
        config.quota().clone(),
        config.cache().clone(),
    );
    let (session_id, session) = registry.open().await;
    info!(session = %session_id, "Session opened");

    if let Some(out) = &options.out {
        tokio::fs::create_dir_all(out).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                out.display(),
                e
            )))
        })?;
    }

    for (index, topic) in options.topics.iter().enumerate() {
        println!("{:=<80}", "");
        println!("[{}] {}", index + 1, topic);

        let request = match story_request(topic, options.length, options.subject.as_deref()) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, index, "Skipping invalid topic");
                println!("Skipped: {}", e);
                continue;
            }
        };

        match session.request(&request).await {
            Ok(SessionOutcome::Delivered(bundle)) => {
                print_bundle(&bundle);
                if let Some(out) = &options.out {
                    export_bundle(storage.as_ref(), &bundle, out, index, topic).await?;
                }
            }
            Ok(SessionOutcome::QuotaExhausted { retry_after }) => {
                println!(
                    "Story quota used up. Try again in {}.",
                    format_wait(retry_after)
                );
            }
            Err(e) => {
                warn!(error = %e, "Story generation failed");
                println!("Could not write this story: {}", e);
            }
        }
    }

    println!("{:=<80}", "");
    println!(
        "Stories left this window: {} ({} cached)",
        session.remaining().await,
        session.cached().await
    );

    registry.close(session_id).await;
    Ok(())
}

fn story_request(
    topic: &str,
    length: StoryLength,
    subject: Option<&str>,
) -> DreamTalesResult<GenerationRequest> {
    let request = GenerationRequest::new(topic, length)?;
    Ok(match subject {
        Some(subject) => request.with_subject_name(subject),
        None => request,
    })
}

fn print_bundle(bundle: &StoryBundle) {
    if *bundle.refused() {
        println!("{}", bundle.story());
        return;
    }

    if *bundle.from_cache() {
        println!("(from cache)");
    }
    println!();
    println!("{}", bundle.story());
    println!();

    match bundle.image_url() {
        Some(url) => println!("Illustration: {}", url),
        None => println!("Illustration: unavailable"),
    }
    match bundle.audio() {
        Some(audio) => println!("Narration: {} bytes", audio.size_bytes),
        None => println!("Narration: unavailable"),
    }
    match bundle.document() {
        Some(document) => println!("Storybook: {} bytes", document.size_bytes),
        None => println!("Storybook: unavailable"),
    }
    println!("Took {:.1}s", bundle.timings().total().as_secs_f64());
}

async fn export_bundle(
    storage: &dyn ArtifactStorage,
    bundle: &StoryBundle,
    out: &Path,
    index: usize,
    topic: &str,
) -> DreamTalesResult<()> {
    let artifacts = [bundle.audio().as_ref(), bundle.document().as_ref()];
    for reference in artifacts.into_iter().flatten() {
        let path = out.join(artifact_file_name(index, topic, reference));
        let bytes = storage.retrieve(reference).await?;
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

/// File name for an exported artifact, such as `01-a-sleepy-bunny.pdf`.
fn artifact_file_name(index: usize, topic: &str, reference: &ArtifactReference) -> String {
    let extension = match reference.mime_type.as_str() {
        "application/pdf" => "pdf",
        "audio/mpeg" => "mp3",
        "image/png" => "png",
        _ => "bin",
    };
    format!("{:02}-{}.{}", index + 1, slug(topic), extension)
}

fn slug(topic: &str) -> String {
    let slug = topic
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "story".to_string()
    } else {
        slug
    }
}

fn format_wait(wait: Duration) -> String {
    let minutes = wait.as_secs().div_ceil(60);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Write one story near `words` words and print it.
#[instrument(skip(config, base_url))]
pub async fn run_story(
    config: &DreamTalesConfig,
    idea: &str,
    words: Option<usize>,
    base_url: Option<&str>,
) -> DreamTalesResult<()> {
    let client = openai_client(base_url)?;
    let generator =
        WordLimitedGenerator::new(client, config.models().clone(), config.word_limit().clone())?
            .with_stage_timeout(config.pipeline().stage_timeout());

    let story = match words {
        Some(words) => generator.generate(idea, words).await?,
        None => generator.generate_default(idea).await?,
    };

    println!("{}", story);
    println!();
    println!("({} words)", story.split_whitespace().count());
    Ok(())
}
