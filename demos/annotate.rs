//! Replays a list of clicks on an image and saves the resulting overlay.
//!
//! ```text
//! cargo run --example annotate -- <image> [x,y | undo]...
//! ```
//!
//! The overlay is written next to the input as `<stem>_grains.png`.

use std::{env, path::Path, process::ExitCode};

use grain_sphericity::{
    EngineConfig, InteractionController, PointerEvent, RenderUpdate, ThresholdSegmenter,
    overlay::render_to_image,
};
use imageproc::point::Point;

fn parse_event(token: &str) -> Option<PointerEvent> {
    if token.eq_ignore_ascii_case("undo") {
        return Some(PointerEvent::Secondary);
    }
    let (x, y) = token.split_once(',')?;
    Some(PointerEvent::Primary(Point::new(
        x.trim().parse().ok()?,
        y.trim().parse().ok()?,
    )))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let Some(image_path) = args.next() else {
        eprintln!("usage: annotate <image> [x,y | undo]...");
        return ExitCode::from(2);
    };

    let config = EngineConfig::default();
    let mut controller =
        match InteractionController::open(&image_path, ThresholdSegmenter::default(), config) {
            Ok(controller) => controller,
            Err(e) => {
                eprintln!("{image_path}: {e}");
                return ExitCode::from(1);
            }
        };

    let mut last: Option<RenderUpdate> = None;
    for token in args {
        let Some(event) = parse_event(&token) else {
            log::warn!("skipping unrecognised event {token:?}");
            continue;
        };
        match controller.handle(event) {
            Ok(update) => last = Some(update),
            Err(e) => {
                eprintln!("aborting: {e}");
                return ExitCode::from(1);
            }
        }
    }

    for (i, grain) in controller.session().all().iter().enumerate() {
        println!(
            "grain {}: click ({:.1}, {:.1}) radius {:.2} sphericity {:.2}",
            i + 1,
            grain.click.x,
            grain.click.y,
            grain.circle.radius,
            grain.sphericity
        );
    }
    if let Some(mean) = controller.session().mean_sphericity() {
        println!("mean sphericity: {mean:.2}");
    }

    if let Some(update) = last {
        let canvas = render_to_image(controller.image(), &update, &config.overlay);
        let stem = Path::new(&image_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let out = Path::new(&image_path).with_file_name(format!("{stem}_grains.png"));
        if let Err(e) = canvas.save(&out) {
            eprintln!("failed to write {}: {e}", out.display());
            return ExitCode::from(1);
        }
        println!("saved {}", out.display());
    }

    ExitCode::SUCCESS
}
