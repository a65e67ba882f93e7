use crate::error::ViewerError;
use crate::io::config::Config;
use crate::pipeline::buffers::MeshBuffers;
use crate::pipeline::passes::render_frame;
use crate::pipeline::renderer::Renderer;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use crate::ui::input::{Action, KeyBindings};
use log::{debug, info};
use minifb::{Window, WindowOptions};
use std::time::{Duration, Instant};

/// Runs the interactive session until the window is closed or Escape is
/// pressed.
///
/// Every iteration reads input, updates the interaction state, renders and
/// presents, strictly in that order.
pub fn run(config: &Config, mesh: &Mesh) -> Result<(), ViewerError> {
    let width = config.window.width;
    let height = config.window.height;
    let lighting = config.lighting();
    let bindings = KeyBindings::default();

    let mut state = config.initial_state()?;

    info!("Opening window ({}x{})...", width, height);
    info!("Controls: {}", bindings.summary());

    let mut window = Window::new(
        &config.window.title,
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;
    window.limit_update_rate(frame_interval(config.window.target_fps));

    let buffers = MeshBuffers::upload(mesh);
    let mut renderer = Renderer::new(width, height, config.window.samples);
    let mut camera = Camera::new_orbit(
        state.camera_distance,
        config.camera.fov.to_radians(),
        renderer.aspect_ratio(),
        config.camera.near,
        config.camera.far,
    );
    let mut pixels = vec![0u32; width * height];

    let mut last_frame = Instant::now();
    let mut frame_count = 0u32;
    let mut last_fps_report = Instant::now();

    while window.is_open() {
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        // --- Input ---
        let input = bindings.capture(&window);
        if input.is_held(Action::Exit) {
            info!("Exit requested.");
            break;
        }

        let previous = (state.shading, state.channel);
        state.update(&input, dt);
        if state.shading != previous.0 {
            debug!("Shading model: {} (shininess {})", state.shading, state.shininess);
        }
        if state.channel != previous.1 {
            debug!("Color channel: {:?}", state.channel);
        }

        // --- Render ---
        render_frame(&mut renderer, &mut camera, &buffers, &state, &lighting);

        // --- Present ---
        renderer.framebuffer.resolve_into(&mut pixels);
        window.update_with_buffer(&pixels, width, height)?;

        window.set_title(&format!(
            "{} - {} - distance {:.1} - color ({:.2}, {:.2}, {:.2})",
            config.window.title,
            state.shading,
            state.camera_distance,
            state.color.x,
            state.color.y,
            state.color.z
        ));

        frame_count += 1;
        let elapsed = last_fps_report.elapsed().as_secs_f32();
        if elapsed >= 2.0 {
            info!("Average FPS: {:.1}", frame_count as f32 / elapsed);
            frame_count = 0;
            last_fps_report = Instant::now();
        }
    }

    Ok(())
}

/// Minimum time between presented frames; `0` disables the limit.
fn frame_interval(target_fps: usize) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_micros(1_000_000 / target_fps as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_follows_target_fps() {
        assert_eq!(frame_interval(60), Some(Duration::from_micros(16_666)));
        assert_eq!(frame_interval(1), Some(Duration::from_secs(1)));
        assert_eq!(frame_interval(0), None);
    }
}
