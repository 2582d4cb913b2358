/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Maximum value of an 8-bit channel.
pub const CHANNEL_MAX_8BIT: f32 = 255.0;

/// Reference level contrast scales around, in normalized units (127.5 / 255).
pub const CONTRAST_MIDPOINT: f32 = 0.5;

/// 3x3 sharpening kernel: identity plus the negated 4-neighbour Laplacian.
pub const SHARPEN_KERNEL: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Suffix inserted between the input stem and extension to name the output.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_enhanced";

/// Extension used when the input path has none.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "mp4";

/// Preferred video encoder for remuxing.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

/// Default x264 constant rate factor.
pub const DEFAULT_CRF: u8 = 23;

/// Default x264 preset.
pub const DEFAULT_PRESET: &str = "medium";

/// Default encoder thread count.
pub const DEFAULT_ENCODER_THREADS: usize = 4;

/// Default HTTP bind address of the enhancement service.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8006";
