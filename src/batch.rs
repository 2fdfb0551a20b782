//! Sequential batch image generation.
//!
//! Each slot is generated, recorded, and followed by a pause before the next
//! request. A failed slot never stops the run; only a run with no successes is
//! reported as a failure.

use crate::{
    error::Result,
    models::{AspectRatio, GenerationRequest, GenerationResult, ImageSize},
    traits::{ImageGenerator, Pacer},
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_COUNT: usize = 10;
pub const DEFAULT_OUTPUT_DIR: &str = "./nanobanana-images";
pub const DEFAULT_PREFIX: &str = "image";
pub const DEFAULT_DELAY_SECS: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub prompt: String,
    pub count: usize,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub aspect_ratio: Option<AspectRatio>,
    pub image_size: Option<ImageSize>,
    /// Seconds between requests; zero, negative or non-finite disables pacing.
    pub delay_secs: f64,
    pub verbose: bool,
}

impl BatchOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: DEFAULT_COUNT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            aspect_ratio: None,
            image_size: None,
            delay_secs: DEFAULT_DELAY_SECS,
            verbose: true,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: Option<AspectRatio>) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    pub fn with_image_size(mut self, size: Option<ImageSize>) -> Self {
        self.image_size = size;
        self
    }

    pub fn with_delay(mut self, secs: f64) -> Self {
        self.delay_secs = secs;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Pause between slots. Delays past what `Duration` can hold saturate at
    /// `Duration::MAX`; zero, negative and NaN mean no pause.
    pub fn pause_duration(&self) -> Option<Duration> {
        if self.delay_secs > 0.0 {
            Some(Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::MAX))
        } else {
            None
        }
    }

    fn request_for(&self, output_path: PathBuf) -> GenerationRequest {
        GenerationRequest::new(self.prompt.clone(), output_path)
            .with_aspect_ratio(self.aspect_ratio)
            .with_image_size(self.image_size)
    }
}

/// Ordered results of one batch, one entry per slot.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub id: Uuid,
    pub results: Vec<GenerationResult>,
}

impl BatchRun {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    pub fn is_success(&self) -> bool {
        self.success_count() > 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// `{prefix}-{index}.png` with the index padded to two digits.
pub fn slot_filename(prefix: &str, index: usize) -> String {
    format!("{}-{:02}.png", prefix, index)
}

/// Creates the directory and any missing parents. Succeeds if it already exists.
pub async fn ensure_output_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}

struct Progress<'a, W: Write> {
    out: &'a mut W,
    enabled: bool,
}

impl<'a, W: Write> Progress<'a, W> {
    fn line(&mut self, text: &str) {
        if self.enabled {
            let _ = writeln!(self.out, "{}", text);
        }
    }

    fn partial(&mut self, text: &str) {
        if self.enabled {
            let _ = write!(self.out, "{} ", text);
            let _ = self.out.flush();
        }
    }
}

/// Runs `options.count` generations in order. Only output-directory creation
/// can fail the call; per-slot errors are recorded in the returned run.
pub async fn batch_generate<W: Write>(
    generator: &dyn ImageGenerator,
    pacer: &dyn Pacer,
    options: &BatchOptions,
    progress: &mut W,
) -> Result<BatchRun> {
    ensure_output_dir(&options.output_dir).await?;

    let run_id = Uuid::new_v4();
    let count = options.count;
    let pause = options.pause_duration();
    let dir_display = options.output_dir.display().to_string();
    let mut progress = Progress {
        out: progress,
        enabled: options.verbose,
    };

    log::info!(
        "Batch {} started: {} image(s) into {}",
        run_id,
        count,
        dir_display
    );

    progress.line(&format!("Generating {} images...", count));
    progress.line(&format!("Prompt: {}", options.prompt));
    progress.line(&format!("Output: {}/{}-XX.png", dir_display, options.prefix));
    if let Some(ratio) = options.aspect_ratio {
        progress.line(&format!("Aspect ratio: {}", ratio));
    }
    if let Some(size) = options.image_size {
        progress.line(&format!("Size: {}", size));
    }
    progress.line("");

    let mut results = Vec::with_capacity(count);
    for index in 1..=count {
        let filename = slot_filename(&options.prefix, index);
        let output_path = options.output_dir.join(&filename);

        progress.partial(&format!("[{}/{}] Generating {}...", index, count, filename));

        let request = options.request_for(output_path);
        let result = match generator.generate(&request).await {
            Ok(path) => {
                progress.line("OK");
                GenerationResult::succeeded(index, filename, path)
            }
            Err(e) => {
                log::warn!("Batch {} slot {} failed: {}", run_id, index, e);
                progress.line(&format!("FAILED: {}", e));
                GenerationResult::failed(index, filename, e.to_string())
            }
        };
        results.push(result);

        if index < count {
            if let Some(delay) = pause {
                pacer.pause(delay).await;
            }
        }
    }

    let run = BatchRun {
        id: run_id,
        results,
    };

    progress.line("");
    progress.line(&format!(
        "Complete: {}/{} images generated",
        run.success_count(),
        count
    ));
    progress.line(&format!("Saved to: {}/", dir_display));

    log::info!(
        "Batch {} finished: {} succeeded, {} failed",
        run_id,
        run.success_count(),
        run.failure_count()
    );
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_filename_padding() {
        assert_eq!(slot_filename("image", 1), "image-01.png");
        assert_eq!(slot_filename("logo", 12), "logo-12.png");
        assert_eq!(slot_filename("logo", 100), "logo-100.png");
    }

    #[test]
    fn test_pause_duration() {
        assert_eq!(
            BatchOptions::new("p").pause_duration(),
            Some(Duration::from_secs(3))
        );
        assert_eq!(
            BatchOptions::new("p").with_delay(0.5).pause_duration(),
            Some(Duration::from_millis(500))
        );
        assert_eq!(BatchOptions::new("p").with_delay(0.0).pause_duration(), None);
        assert_eq!(BatchOptions::new("p").with_delay(-2.0).pause_duration(), None);
        assert_eq!(
            BatchOptions::new("p").with_delay(f64::NAN).pause_duration(),
            None
        );
    }

    #[test]
    fn test_huge_delay_saturates() {
        assert_eq!(
            BatchOptions::new("p").with_delay(1e30).pause_duration(),
            Some(Duration::MAX)
        );
        assert_eq!(
            BatchOptions::new("p")
                .with_delay(f64::INFINITY)
                .pause_duration(),
            Some(Duration::MAX)
        );
    }

    #[test]
    fn test_exit_code_follows_success_count() {
        let ok = GenerationResult::succeeded(1, "a-01.png".into(), PathBuf::from("a-01.png"));
        let bad = GenerationResult::failed(2, "a-02.png".into(), "boom");

        let run = BatchRun {
            id: Uuid::new_v4(),
            results: vec![bad.clone(), bad.clone()],
        };
        assert_eq!(run.success_count(), 0);
        assert_eq!(run.exit_code(), 1);

        let run = BatchRun {
            id: Uuid::new_v4(),
            results: vec![bad, ok],
        };
        assert_eq!(run.success_count(), 1);
        assert_eq!(run.failure_count(), 1);
        assert_eq!(run.exit_code(), 0);

        let empty = BatchRun {
            id: Uuid::new_v4(),
            results: vec![],
        };
        assert_eq!(empty.exit_code(), 1);
    }
}
