use std::path::Path;

use console::Style;
use vivid_core::frame::VideoInfo;
use vivid_core::pipeline::config::{EnhancementParams, VividConfig};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_enhance_summary(
    input: &Path,
    output: &Path,
    params: &EnhancementParams,
    config: &VividConfig,
) {
    let s = Styles::new();
    print_title(&s, "Vivid Enhancement");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Execution"),
        s.method.apply_to(config.execution.mode)
    );
    println!();

    print_params_section(&s, params);

    println!("  {}", s.header.apply_to("Encoder"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Codec"),
        s.method.apply_to(&config.encoder.codec)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("CRF"),
        s.value.apply_to(config.encoder.crf)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Preset"),
        s.value.apply_to(&config.encoder.preset)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threads"),
        s.value.apply_to(config.encoder.threads)
    );
    println!();
}

pub fn print_still_summary(input: &Path, output: &Path, params: &EnhancementParams) {
    let s = Styles::new();
    print_title(&s, "Still Enhancement");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!();

    print_params_section(&s, params);
}

fn print_params_section(s: &Styles, params: &EnhancementParams) {
    let defaults = EnhancementParams::default();
    let rows = [
        ("Sharpness", params.sharpness, defaults.sharpness),
        ("Contrast", params.contrast, defaults.contrast),
        ("Brightness", params.brightness, defaults.brightness),
        ("Saturation", params.saturation, defaults.saturation),
        ("Color Boost", params.color_boost, defaults.color_boost),
    ];

    println!("  {}", s.header.apply_to("Adjustments"));
    for (label, value, neutral) in rows {
        if value == neutral {
            println!(
                "    {:<12}{}",
                s.label.apply_to(label),
                s.disabled.apply_to(format!("{value} (unchanged)"))
            );
        } else {
            println!(
                "    {:<12}{}",
                s.label.apply_to(label),
                s.value.apply_to(value)
            );
        }
    }
    println!();
}

pub fn print_video_info(info: &VideoInfo) {
    let s = Styles::new();
    print_title(&s, "Video Info");

    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(info.path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", info.width, info.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frame Rate"),
        s.value.apply_to(info.frame_rate)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(info.frame_count)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Duration"),
        s.value.apply_to(format!("{:.2} s", info.duration_secs))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Video Codec"),
        s.method.apply_to(&info.video_codec)
    );
    match info.audio_codec {
        Some(ref codec) => println!(
            "  {:<14}{}",
            s.label.apply_to("Audio Codec"),
            s.method.apply_to(codec)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Audio Codec"),
            s.disabled.apply_to("none")
        ),
    }
    println!();
}
