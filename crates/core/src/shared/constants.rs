pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// Dense landmark count produced per face (MediaPipe face mesh size).
pub const LANDMARK_COUNT: usize = 468;

/// Below this many landmarks no region or feature is derived.
pub const MIN_LANDMARKS_FOR_REGIONS: usize = 50;

/// Entries kept by the in-memory emotion log.
pub const EMOTION_HISTORY_LIMIT: usize = 50;

/// Exchanges kept by the in-memory conversation log.
pub const CONVERSATION_HISTORY_LIMIT: usize = 20;

pub const DEFAULT_CHAT_MODEL: &str = "gemma-2-27b-it";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
