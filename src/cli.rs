use crate::{
    batch::{BatchOptions, DEFAULT_OUTPUT_DIR, DEFAULT_PREFIX},
    models::{AspectRatio, DomainQuery, ImageSize, DEFAULT_LOCATION_CODE},
};
use clap::Parser;
use std::path::PathBuf;

/// Batch generate images using Nano Banana
#[derive(Parser, Debug)]
#[command(name = "batch_generate")]
#[command(version)]
#[command(after_help = "Examples:
  batch_generate \"pixel art logo\" -n 20 -d ./logos -p logo
  batch_generate \"product photo\" -n 10 --ratio 1:1 --size 4K
  batch_generate \"landscape painting\" -n 5 --ratio 16:9 --delay 5")]
pub struct BatchArgs {
    /// Text prompt for image generation
    pub prompt: String,

    /// Number of images to generate
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Output directory
    #[arg(short = 'd', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub dir: PathBuf,

    /// Filename prefix
    #[arg(short = 'p', long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Aspect ratio
    #[arg(short = 'r', long, value_enum)]
    pub ratio: Option<AspectRatio>,

    /// Image size (2K or 4K)
    #[arg(short = 's', long)]
    pub size: Option<ImageSize>,

    /// Delay between generations in seconds
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub delay: f64,

    /// Suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl BatchArgs {
    pub fn into_options(self) -> BatchOptions {
        BatchOptions::new(self.prompt)
            .with_count(self.count)
            .with_output_dir(self.dir)
            .with_prefix(self.prefix)
            .with_aspect_ratio(self.ratio)
            .with_image_size(self.size)
            .with_delay(self.delay)
            .with_verbose(!self.quiet)
    }
}

/// Domain overview using DataForSEO API
#[derive(Parser, Debug)]
#[command(name = "domain_overview")]
#[command(version)]
pub struct OverviewArgs {
    /// Target domain
    pub domain: String,

    /// Location code (default: 2840 = US)
    #[arg(long, short = 'l', visible_alias = "loc", default_value_t = DEFAULT_LOCATION_CODE)]
    pub location: u32,
}

impl OverviewArgs {
    pub fn query(&self) -> DomainQuery {
        DomainQuery::new(self.domain.clone()).with_location(self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_batch_defaults() {
        let args = BatchArgs::try_parse_from(["batch_generate", "pixel art logo"]).unwrap();
        let options = args.into_options();
        assert_eq!(options.prompt, "pixel art logo");
        assert_eq!(options.count, 10);
        assert_eq!(options.output_dir, PathBuf::from("./nanobanana-images"));
        assert_eq!(options.prefix, "image");
        assert_eq!(options.delay_secs, 3.0);
        assert!(options.verbose);
        assert!(options.aspect_ratio.is_none());
    }

    #[test]
    fn test_batch_flags() {
        let args = BatchArgs::try_parse_from([
            "batch_generate",
            "product photo",
            "-n",
            "4",
            "-d",
            "./logos",
            "-p",
            "logo",
            "--ratio",
            "16:9",
            "-s",
            "4k",
            "--delay",
            "0",
            "-q",
        ])
        .unwrap();
        let options = args.into_options();
        assert_eq!(options.count, 4);
        assert_eq!(options.prefix, "logo");
        assert_eq!(options.aspect_ratio, Some(AspectRatio::Landscape16x9));
        assert_eq!(options.image_size, Some(ImageSize::FourK));
        assert_eq!(options.delay_secs, 0.0);
        assert!(!options.verbose);
    }

    #[test]
    fn test_batch_rejects_unknown_ratio() {
        assert!(BatchArgs::try_parse_from(["batch_generate", "x", "-r", "7:5"]).is_err());
        assert!(BatchArgs::try_parse_from(["batch_generate", "x", "-s", "8K"]).is_err());
    }

    #[test]
    fn test_ratio_values_are_listed() {
        let command = BatchArgs::command();
        let ratio = command
            .get_arguments()
            .find(|a| a.get_id() == "ratio")
            .unwrap();
        let names: Vec<String> = ratio
            .get_possible_values()
            .iter()
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"16:9".to_string()));
        assert!(names.contains(&"21:9".to_string()));

        let err = BatchArgs::try_parse_from(["batch_generate", "x", "-r", "7:5"]).unwrap_err();
        assert!(err.to_string().contains("9:16"));
    }

    #[test]
    fn test_overview_location() {
        let args = OverviewArgs::try_parse_from(["domain_overview", "example.com"]).unwrap();
        assert_eq!(args.query().location_code, 2840);

        let args =
            OverviewArgs::try_parse_from(["domain_overview", "example.com", "--loc", "2826"])
                .unwrap();
        assert_eq!(args.query(), DomainQuery::new("example.com").with_location(2826));

        let args = OverviewArgs::try_parse_from(["domain_overview", "example.com", "-l", "2276"])
            .unwrap();
        assert_eq!(args.location, 2276);
    }
}
