//! Frame loop: one window, one centered line of text

use tracing::{debug, info, warn};

use crate::common::types::Position;
use crate::config::AppConfig;
use crate::error::ShellResult;
use crate::font::{FontDirectoryCache, FontLoader};
use crate::graphics::{TextRenderer, Window};
use crate::platform::{Platform, PlatformEvent};

/// Run until the platform reports `Quit`.
///
/// Every native resource is released before this returns, on success and on error.
pub fn run<P: Platform>(
    platform: &P,
    config: &AppConfig,
    cache: FontDirectoryCache,
) -> ShellResult<()> {
    let mut loader = FontLoader::new(platform, cache);
    loader.cache_mut().rebuild();
    let cache = loader.cache();
    if cache.is_empty() {
        warn!(search_paths = ?cache.search_paths(), "No fonts found in any search path");
    } else {
        debug!(count = cache.len(), "Initial font scan complete");
    }

    let window = Window::new(platform, &config.title, config.window_size())?;
    let mut text = TextRenderer::load(&window, &mut loader, &config.font_name, config.font_size)?;
    text.set_text(&config.text, config.text_color())?;

    let clear_color = config.clear_color();
    let mut frames: u64 = 0;

    'frames: loop {
        for event in platform
            .poll_events()
            .map_err(crate::error::ShellError::render("event poll"))?
        {
            match event {
                PlatformEvent::Quit => break 'frames,
                PlatformEvent::Resized(size) => {
                    debug!(width = size.width, height = size.height, "Window resized");
                }
            }
        }

        window.set_clear_color(clear_color)?;
        window.clear()?;

        let position = Position::centered(window.size()?, text.dimensions());
        text.render(position.x, position.y)?;

        window.present()?;
        frames += 1;
        platform.frame_pause();
    }

    info!(frames = frames, "Quit requested, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::color::Rgba;
    use crate::common::types::{Dimensions, Rect};
    use crate::error::ShellError;
    use crate::platform::fake::{FakePlatform, GLYPH_WIDTH};
    use std::fs;
    use std::path::PathBuf;

    fn font_dir(dir: &tempfile::TempDir) -> PathBuf {
        let fonts = dir.path().join("assets").join("fonts");
        fs::create_dir_all(&fonts).unwrap();
        fs::write(fonts.join("OpenSans-Regular.ttf"), b"font-bytes").unwrap();
        dir.path().join("assets")
    }

    #[test]
    fn test_queued_quit_draws_one_centered_frame() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FontDirectoryCache::with_search_paths(vec![font_dir(&dir)]);
        let platform = FakePlatform::new();
        let config = AppConfig::default();

        // One frame renders, the second poll sees the quit
        platform.push_event(PlatformEvent::Resized(Dimensions::new(800, 600)));
        platform.quit_after_polls(1);
        run(&platform, &config, cache).unwrap();

        let width = GLYPH_WIDTH * 12;
        assert_eq!(
            platform.draws(),
            vec![Rect {
                x: ((800 - width) / 2) as i32,
                y: (600 - 36) / 2,
                width,
                height: 36,
            }]
        );
        assert_eq!(platform.presents(), 1);
        assert_eq!(platform.draw_color(), Some(Rgba::BLACK));
        assert_eq!(platform.live_total(), 0);
    }

    #[test]
    fn test_immediate_quit_draws_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FontDirectoryCache::with_search_paths(vec![font_dir(&dir)]);
        let platform = FakePlatform::new();
        platform.push_event(PlatformEvent::Quit);

        run(&platform, &AppConfig::default(), cache).unwrap();
        assert!(platform.draws().is_empty());
        assert_eq!(platform.created("texture"), 1);
        assert_eq!(platform.live_total(), 0);
    }

    #[test]
    fn test_missing_font_releases_window() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FontDirectoryCache::with_search_paths(vec![dir.path().to_path_buf()]);
        let platform = FakePlatform::new();

        let err = run(&platform, &AppConfig::default(), cache).unwrap_err();
        assert!(matches!(err, ShellError::FontNotFound { ref name } if name == "OpenSans-Regular.ttf"));
        assert_eq!(platform.created("window"), 1);
        assert_eq!(platform.live_total(), 0);
    }

    #[test]
    fn test_present_failure_releases_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FontDirectoryCache::with_search_paths(vec![font_dir(&dir)]);
        let platform = FakePlatform::new();
        platform.fail_next("present");

        let err = run(&platform, &AppConfig::default(), cache).unwrap_err();
        assert!(matches!(err, ShellError::Render { stage: "present", .. }));
        assert_eq!(platform.live_total(), 0);
    }
}
