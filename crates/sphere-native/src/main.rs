mod gpu;

use instant::Instant;
use std::time::Duration;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, ModifiersState},
    window::WindowBuilder,
};

use gpu::GpuState;
use sphere_core::{FrameReport, Modifiers, ParamId, Visualizer, VisualizerConfig};

const READOUT_INTERVAL: Duration = Duration::from_secs(1);

fn modifiers_from(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        meta: state.super_key(),
    }
}

fn log_readout(vis: &Visualizer, report: &FrameReport) {
    let v = &report.params;
    log::info!(
        "[fps] {} | quality L{} ({:.0}%) | points {}/{}",
        report.fps,
        vis.quality().level(),
        vis.quality().scale() * 100.0,
        report.draw_count,
        vis.sphere().max_count()
    );
    log::info!(
        "[params] hue {:.2} sat {:.2} light {:.2} rot ({:.4}, {:.4}) noise {:.2} cycle {:.2}",
        v[ParamId::Hue],
        v[ParamId::Saturation],
        v[ParamId::Lightness],
        v[ParamId::RotationX],
        v[ParamId::RotationY],
        v[ParamId::NoiseStrength],
        v[ParamId::ColorCycleSpeed]
    );
    let p = &report.passes;
    log::info!(
        "[effects] bloom {} trail {} warp {} glitch {} aberration {}",
        p.bloom.enabled,
        p.trail.enabled,
        p.warp.enabled,
        p.glitch.enabled,
        p.aberration.enabled
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Particle Sphere (native)")
        .build(&event_loop)?;

    let start = Instant::now();
    let mut vis = Visualizer::new(VisualizerConfig::default(), start)?;
    let mut state = match pollster::block_on(GpuState::new(&window, vis.sphere().max_count())) {
        Ok(state) => state,
        Err(err) => {
            log::error!("[gpu] init failed: {err:#}");
            return Err(err);
        }
    };
    vis.attach(state.points_mut())?;

    let mut mods = Modifiers::default();
    let mut last_frame = start;
    let mut last_readout = start;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => {
                vis.dispose(Some(state.points_mut()));
                elwt.exit();
            }
            WindowEvent::Focused(false) => vis.release_keys(),
            WindowEvent::ModifiersChanged(m) => {
                mods = modifiers_from(m.state());
                vis.set_shift(mods.shift);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let Key::Character(text) = &event.logical_key else {
                    return;
                };
                let Some(c) = text.chars().next() else {
                    return;
                };
                match event.state {
                    ElementState::Pressed if !event.repeat => vis.key_down(c, mods),
                    ElementState::Released => vis.key_up(c, mods),
                    _ => {}
                }
            }
            _ => {}
        },
        Event::AboutToWait if vis.sphere().is_ready() => {
            let now = Instant::now();
            let dt = now.saturating_duration_since(last_frame).as_secs_f32();
            last_frame = now;
            let elapsed = now.saturating_duration_since(start).as_secs_f32();

            let report = vis.tick(now, elapsed, dt);
            if let Err(err) = vis.sync(state.points_mut()) {
                log::warn!("[sphere] sync skipped: {err}");
            }
            let readout_due = now.saturating_duration_since(last_readout) >= READOUT_INTERVAL;
            if vis.debug_readout() && readout_due {
                last_readout = now;
                log_readout(&vis, &report);
            }

            match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    vis.dispose(Some(state.points_mut()));
                    elwt.exit();
                }
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
