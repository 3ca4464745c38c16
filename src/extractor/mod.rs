pub mod options;
pub mod traits;
pub mod ytdlp;

pub use options::{DownloadOptions, PostProcessor};
pub use traits::Extractor;
pub use ytdlp::{find_ffmpeg, find_ytdlp, YtDlpExtractor};
