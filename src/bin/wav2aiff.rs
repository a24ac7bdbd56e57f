//! wav2aiff - 将WAV文件批量转换为AIFF

use lossless2aiff::{FormatProfile, tools};

fn main() {
    std::process::exit(tools::run(FormatProfile::Wav));
}
