//! dsd2aiff - 将DSD (DSF/DFF)文件批量转换为AIFF

use lossless2aiff::{FormatProfile, tools};

fn main() {
    std::process::exit(tools::run(FormatProfile::Dsd));
}
