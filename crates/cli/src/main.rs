mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Serialize;

use facemood_core::conversation::infrastructure::gemini_response_generator::GeminiResponseGenerator;
use facemood_core::detection::domain::face_locator::FaceLocator;
use facemood_core::detection::infrastructure::onnx_yolo_locator::OnnxYoloLocator;
use facemood_core::emotion::domain::emotion_distribution::EmotionLabel;
use facemood_core::emotion::domain::emotion_scorer::EmotionScorer;
use facemood_core::emotion::infrastructure::heuristic_emotion_scorer::HeuristicEmotionScorer;
use facemood_core::landmarks::domain::landmark_synthesizer::LandmarkSynthesizer;
use facemood_core::overlay::domain::overlay_renderer::OverlayRenderer;
use facemood_core::overlay::infrastructure::mesh_overlay_renderer::MeshOverlayRenderer;
use facemood_core::pipeline::analyze_frame_use_case::{AnalyzeFrameUseCase, FrameAnalysis};
use facemood_core::pipeline::chat_use_case::ChatUseCase;
use facemood_core::pipeline::pipeline_logger::SummaryPipelineLogger;
use facemood_core::session::domain::emotion_history::EmotionHistory;
use facemood_core::shared::constants::{IMAGE_EXTENSIONS, YOLO_MODEL_NAME, YOLO_MODEL_URL};
use facemood_core::shared::model_resolver;
use facemood_core::video::domain::image_reader::ImageReader;
use facemood_core::video::domain::image_writer::ImageWriter;
use facemood_core::video::infrastructure::image_file_reader::ImageFileReader;
use facemood_core::video::infrastructure::image_file_writer::ImageFileWriter;

use settings::Settings;

/// Facial landmarks and emotion scores for still images.
#[derive(Parser)]
#[command(name = "facemood")]
struct Cli {
    /// Input image files, each analysed as one frame.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Seed for landmark jitter and emotion scores (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Write an overlay image per input into this directory.
    #[arg(long)]
    overlay_dir: Option<PathBuf>,

    /// Send this message to the chat model with the last detected emotion.
    #[arg(long)]
    message: Option<String>,

    /// Chat model name.
    #[arg(long)]
    model: Option<String>,

    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Use this face detection model instead of the cached download.
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

/// Effective options after merging flags over saved settings.
struct Options {
    confidence: f64,
    chat_model: String,
    overlay_dir: Option<PathBuf>,
    pretty: bool,
}

impl Options {
    fn merge(cli: &Cli, settings: Settings) -> Self {
        Self {
            confidence: cli.confidence.unwrap_or(settings.confidence),
            chat_model: cli.model.clone().unwrap_or(settings.chat_model),
            overlay_dir: cli.overlay_dir.clone().or(settings.overlay_dir),
            pretty: cli.pretty || settings.pretty,
        }
    }
}

#[derive(Serialize)]
struct DominantEmotion {
    emotion: EmotionLabel,
    confidence: f64,
}

#[derive(Serialize)]
struct FrameReport<'a> {
    source: &'a Path,
    dominant: DominantEmotion,
    #[serde(flatten)]
    analysis: &'a FrameAnalysis,
}

impl<'a> FrameReport<'a> {
    fn new(source: &'a Path, analysis: &'a FrameAnalysis) -> Self {
        let (emotion, confidence) = analysis.dominant();
        Self {
            source,
            dominant: DominantEmotion {
                emotion,
                confidence,
            },
            analysis,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = Options::merge(&cli, Settings::load());
    validate(&cli, &options)?;

    let locator = build_locator(cli.model_path.as_deref(), options.confidence)?;
    let (synthesizer, scorer) = build_generators(cli.seed);
    let mut use_case = AnalyzeFrameUseCase::new(
        locator,
        synthesizer,
        scorer,
        Box::new(SummaryPipelineLogger::new()),
    );

    let reader = ImageFileReader::new();
    let writer = ImageFileWriter::new();
    let renderer = MeshOverlayRenderer::new();
    let mut history = EmotionHistory::new();
    let total = cli.images.len();

    for (index, path) in cli.images.iter().enumerate() {
        use_case.logger_mut().progress(index + 1, total);
        let frame = reader.read(path, index)?;
        let analysis = use_case.execute(&frame);
        history.record(&analysis.emotions);

        print_json(&FrameReport::new(path, &analysis), options.pretty)?;

        if let Some(dir) = &options.overlay_dir {
            let mut overlay = frame;
            renderer.render(&mut overlay, &analysis)?;
            let out = overlay_path(dir, path);
            writer.write(&out, &overlay)?;
            log::info!("Overlay written to {}", out.display());
        }
    }
    use_case.logger().summary();

    if let (Some(message), Some(latest)) = (&cli.message, history.latest()) {
        let api_key = cli.api_key.as_deref().unwrap_or_default();
        let generator = GeminiResponseGenerator::new(api_key, Some(&options.chat_model))?;
        let mut chat = ChatUseCase::new(Box::new(generator));
        let reply = chat.respond(message, latest.emotion.as_str(), latest.confidence);
        print_json(&reply, options.pretty)?;
    }

    Ok(())
}

fn build_locator(
    explicit: Option<&Path>,
    confidence: f64,
) -> Result<Box<dyn FaceLocator>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {YOLO_MODEL_NAME}");
    let model_path = model_resolver::resolve(
        YOLO_MODEL_NAME,
        YOLO_MODEL_URL,
        explicit,
        Some(Box::new(download_progress)),
    )?;
    Ok(Box::new(OnnxYoloLocator::new(&model_path, confidence)?))
}

fn build_generators(seed: Option<u64>) -> (LandmarkSynthesizer, Box<dyn EmotionScorer>) {
    match seed {
        Some(seed) => (
            LandmarkSynthesizer::seeded(seed),
            Box::new(HeuristicEmotionScorer::seeded(seed)),
        ),
        None => (
            LandmarkSynthesizer::from_entropy(),
            Box::new(HeuristicEmotionScorer::from_entropy()),
        ),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn validate(cli: &Cli, options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    for image in &cli.images {
        if !image.exists() {
            return Err(format!("Input file not found: {}", image.display()).into());
        }
        if !is_image(image) {
            return Err(format!("Not a supported image file: {}", image.display()).into());
        }
    }
    if !(0.0..=1.0).contains(&options.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            options.confidence
        )
        .into());
    }
    if let Some(path) = &cli.model_path {
        if !path.exists() {
            return Err(format!("Model file not found: {}", path.display()).into());
        }
    }
    if cli.message.is_some() && cli.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        return Err("--message requires --api-key or GEMINI_API_KEY".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn overlay_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    dir.join(format!("{stem}_overlay.png"))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("facemood").chain(args.iter().copied())).unwrap()
    }

    fn touch(dir: &Path, name: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, b"").unwrap();
        path.to_string_lossy().into_owned()
    }

    fn validate_args(args: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
        let cli = cli(args);
        let options = Options::merge(&cli, Settings::default());
        validate(&cli, &options)
    }

    #[test]
    fn test_images_required() {
        assert!(Cli::try_parse_from(["facemood"]).is_err());
    }

    #[test]
    fn test_valid_args_pass() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.png");
        let b = touch(dir.path(), "b.JPG");
        assert!(validate_args(&[&a, &b, "--confidence", "0.3"]).is_ok());
    }

    #[test]
    fn test_missing_input_rejected() {
        let err = validate_args(&["/nonexistent/face.png"]).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_non_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let clip = touch(dir.path(), "clip.mp4");
        assert!(validate_args(&[&clip]).is_err());
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.png");
        assert!(validate_args(&[&a, "--confidence", "1.5"]).is_err());
    }

    #[test]
    fn test_message_requires_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.png");
        assert!(validate_args(&[&a, "--message", "hi", "--api-key", " "]).is_err());
        assert!(validate_args(&[&a, "--message", "hi", "--api-key", "secret"]).is_ok());
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            confidence: 0.2,
            chat_model: "saved-model".to_string(),
            overlay_dir: Some(PathBuf::from("/saved")),
            pretty: true,
        };
        let options = Options::merge(
            &cli(&["a.png", "--confidence", "0.9", "--model", "flag-model"]),
            settings.clone(),
        );
        assert_eq!(options.confidence, 0.9);
        assert_eq!(options.chat_model, "flag-model");
        assert_eq!(options.overlay_dir, Some(PathBuf::from("/saved")));
        assert!(options.pretty);

        let options = Options::merge(&cli(&["a.png"]), settings);
        assert_eq!(options.confidence, 0.2);
        assert_eq!(options.chat_model, "saved-model");
    }

    #[test]
    fn test_overlay_path_uses_stem() {
        assert_eq!(
            overlay_path(Path::new("/out"), Path::new("/in/me.jpeg")),
            PathBuf::from("/out/me_overlay.png")
        );
    }

    #[test]
    fn test_report_includes_source_and_dominant() {
        let analysis = FrameAnalysis::empty();
        let json = serde_json::to_value(FrameReport::new(Path::new("a.png"), &analysis)).unwrap();
        assert_eq!(json["source"], "a.png");
        assert_eq!(json["dominant"]["emotion"], "neutral");
        assert_eq!(json["dominant"]["confidence"], 0.7);
        assert_eq!(json["faces"], serde_json::json!([]));
        assert_eq!(json["emotions"]["neutral"], 0.7);
    }
}
